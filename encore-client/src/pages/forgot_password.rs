use leptos::*;

use encore_common::auth::ForgotPasswordRequest;

use crate::{
    api::UnauthorizedApi,
    components::{error::ErrorText, modal::AlertModal},
    config,
};

/// Request a password-reset email. One attempt per submission; the
/// confirmation is deliberately the same whether or not the address
/// exists.
#[component]
pub fn ForgotPassword(cx: Scope) -> impl IntoView {
    let (email, set_email) = create_signal(cx, String::new());
    let (page_error, set_page_error) = create_signal(cx, None::<String>);
    let (sent, set_sent) = create_signal(cx, None::<String>);

    let send_action = create_action(cx, move |email: &String| {
        let request = ForgotPasswordRequest {
            email: email.clone(),
        };
        async move {
            let api = UnauthorizedApi::new(config::api_url());
            match api.forgot_password(&request).await {
                Ok(()) => {
                    set_page_error.update(|error| *error = None);
                    set_sent.update(|message| {
                        *message =
                            Some("If that address has an account, a reset link is on its way.".to_owned());
                    });
                }
                Err(error) => set_page_error.update(|message| *message = Some(error.to_string())),
            }
        }
    });

    let submit = move |_| {
        let email = email.get_untracked();
        if email.trim().is_empty() {
            set_page_error.update(|error| *error = Some("Enter your email address".to_owned()));
            return;
        }
        send_action.dispatch(email);
    };

    view! { cx,
        <main class="container py-4">
            <h3>"Forgot your password?"</h3>
            <form on:submit=|ev| ev.prevent_default()>
                <div class="form-group mb-3">
                    <label for="email">"Email"</label>
                    <input
                        class="form-control"
                        type="email"
                        id="email"
                        name="email"
                        required
                        on:input=move |ev| set_email.update(|value| *value = event_target_value(&ev))
                    />
                </div>
                <ErrorText error=page_error.into()/>
                <button class="btn btn-primary" type="submit" on:click=submit>
                    "Send reset link"
                </button>
            </form>
            <AlertModal message=sent on_close=move || set_sent.update(|message| *message = None)/>
        </main>
    }
}
