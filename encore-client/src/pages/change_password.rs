use leptos::*;
use leptos_router::use_navigate;

use encore_common::{auth::ChangePasswordRequest, validate::password_pair};

use crate::{
    components::{error::ErrorText, modal::AlertModal},
    pages::Page,
    session::require_api,
};

/// Change the signed-in user's password. The call itself is bearer
/// authenticated; a rejected token routes back to login.
#[component]
pub fn ChangePassword(cx: Scope) -> impl IntoView {
    let (old_password, set_old_password) = create_signal(cx, String::new());
    let (password, set_password) = create_signal(cx, String::new());
    let (confirmation, set_confirmation) = create_signal(cx, String::new());
    let (page_error, set_page_error) = create_signal(cx, None::<String>);
    let (done, set_done) = create_signal(cx, None::<String>);

    let change_action = create_action(cx, move |request: &ChangePasswordRequest| {
        let request = request.clone();
        async move {
            let result = async { require_api()?.change_password(&request).await }.await;
            match result {
                Ok(()) => {
                    set_page_error.update(|error| *error = None);
                    set_done.update(|message| *message = Some("Password changed.".to_owned()));
                }
                Err(error) if error.is_unauthorized() => {
                    let navigate = use_navigate(cx);
                    if let Err(error) = navigate(Page::Login.path(), Default::default()) {
                        log::error!("{error}");
                    }
                }
                Err(error) => set_page_error.update(|message| *message = Some(error.to_string())),
            }
        }
    });

    let submit = move |_| {
        let new_password = password.get_untracked();
        if let Err(message) = password_pair(&new_password, &confirmation.get_untracked()) {
            set_page_error.update(|error| *error = Some(message));
            return;
        }
        change_action.dispatch(ChangePasswordRequest {
            old_password: old_password.get_untracked(),
            new_password,
        });
    };

    view! { cx,
        <main class="container py-4">
            <h3>"Change your password"</h3>
            <form on:submit=|ev| ev.prevent_default()>
                <div class="form-group mb-3">
                    <label for="old-password">"Current password"</label>
                    <input
                        class="form-control"
                        type="password"
                        id="old-password"
                        name="old-password"
                        required
                        on:input=move |ev| {
                            set_old_password.update(|value| *value = event_target_value(&ev));
                        }
                    />
                </div>
                <div class="form-group mb-3">
                    <label for="new-password">"New password"</label>
                    <input
                        class="form-control"
                        type="password"
                        id="new-password"
                        name="new-password"
                        required
                        on:input=move |ev| {
                            set_password.update(|value| *value = event_target_value(&ev));
                        }
                    />
                </div>
                <div class="form-group mb-3">
                    <label for="confirm-password">"Confirm new password"</label>
                    <input
                        class="form-control"
                        type="password"
                        id="confirm-password"
                        name="confirm-password"
                        required
                        on:input=move |ev| {
                            set_confirmation.update(|value| *value = event_target_value(&ev));
                        }
                    />
                </div>
                <ErrorText error=page_error.into()/>
                <button class="btn btn-primary" type="submit" on:click=submit>
                    "Change password"
                </button>
            </form>
            <AlertModal message=done on_close=move || set_done.update(|message| *message = None)/>
        </main>
    }
}
