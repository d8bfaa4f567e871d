use leptos::*;
use leptos_router::{use_navigate, use_params_map};

use encore_common::{auth::ResetPasswordRequest, validate::password_pair};

use crate::{
    api::UnauthorizedApi,
    components::{error::ErrorText, modal::AlertModal},
    config,
    pages::Page,
};

/// Set a new password using the token from the reset email, carried in
/// the `:token` route parameter.
#[component]
pub fn ResetPassword(cx: Scope) -> impl IntoView {
    let params = use_params_map(cx);
    let (password, set_password) = create_signal(cx, String::new());
    let (confirmation, set_confirmation) = create_signal(cx, String::new());
    let (page_error, set_page_error) = create_signal(cx, None::<String>);
    let (done, set_done) = create_signal(cx, None::<String>);

    let reset_action = create_action(cx, move |request: &ResetPasswordRequest| {
        let request = request.clone();
        async move {
            let api = UnauthorizedApi::new(config::api_url());
            match api.reset_password(&request).await {
                Ok(()) => {
                    set_page_error.update(|error| *error = None);
                    set_done.update(|message| {
                        *message = Some("Password updated. Sign in with the new one.".to_owned());
                    });
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
        let Some(token) = params.with_untracked(|params| params.get("token").cloned()) else {
            set_page_error.update(|error| *error = Some("This reset link is incomplete".to_owned()));
            return;
        };
        reset_action.dispatch(ResetPasswordRequest {
            token,
            new_password,
        });
    };

    let close_done = move || {
        set_done.update(|message| *message = None);
        let navigate = use_navigate(cx);
        if let Err(error) = navigate(Page::Login.path(), Default::default()) {
            log::error!("{error}");
        }
    };

    view! { cx,
        <main class="container py-4">
            <h3>"Choose a new password"</h3>
            <form on:submit=|ev| ev.prevent_default()>
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
                    <label for="confirm-password">"Confirm password"</label>
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
                    "Update password"
                </button>
            </form>
            <AlertModal message=done on_close=close_done/>
        </main>
    }
}
