use leptos::*;
use leptos_router::{use_navigate, A};

use encore_common::auth::Credentials;

use crate::{
    api::UnauthorizedApi,
    components::credentials::CredentialsForm,
    config,
    pages::Page,
    session::{self, use_session, BrowserTokenStore},
};

/// Sign-in page. On success the bearer token is persisted, the session is
/// populated with the user behind it, and the app navigates home.
#[component]
pub fn Login(cx: Scope) -> impl IntoView {
    let session = use_session(cx);
    let (login_error, set_login_error) = create_signal(cx, None::<String>);
    let (wait_for_response, set_wait_for_response) = create_signal(cx, false);
    let login_action = create_action(cx, move |credentials: &Credentials| {
        let credentials = credentials.clone();
        let username = credentials.username.clone();
        async move {
            let api = UnauthorizedApi::new(config::api_url());
            set_wait_for_response.update(|waiting| *waiting = true);
            let result = session::complete_login(
                session,
                &BrowserTokenStore,
                async move { Ok(api.login(&credentials).await?.0) },
                |authorized| async move { authorized.current_user().await },
            )
            .await;
            set_wait_for_response.update(|waiting| *waiting = false);
            match result {
                Ok(_user) => {
                    set_login_error.update(|error| *error = None);
                    let navigate = use_navigate(cx);
                    if let Err(error) = navigate(Page::Home.path(), Default::default()) {
                        log::error!("{error}");
                    }
                }
                Err(error) => {
                    log::error!("Unable to login with {username}: {error}");
                    set_login_error.update(|message| *message = Some(error.to_string()));
                }
            }
        }
    });
    let disabled = Signal::derive(cx, move || wait_for_response.get());
    view! { cx,
        <main class="container py-4">
            <CredentialsForm
                title="Login to Encore"
                action_label="Login"
                action=login_action
                error=login_error.into()
                disabled/>
            <p class="mt-3">
                "No account yet? "
                <A href=Page::Register.path()>"Register"</A>
                " or "
                <A href=Page::ForgotPassword.path()>"reset your password"</A>
                "."
            </p>
        </main>
    }
}
