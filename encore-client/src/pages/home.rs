use leptos::*;
use leptos_router::A;

use crate::{components::loading::Loading, pages::Page, session::use_session};

/// Landing page; greets the signed-in user or points at login.
#[component]
pub fn Home(cx: Scope) -> impl IntoView {
    let session = use_session(cx);
    view! { cx,
        <main class="container py-4">
            <h2>"Encore"</h2>
            <p class="lead">
                "A marketplace for creative services: build a profile, agree contracts, schedule events."
            </p>
            {move || {
                if session.is_loading() {
                    return view! { cx, <Loading/> }.into_view(cx);
                }
                match session.user() {
                    Some(user) => view! { cx,
                        <p>"You are logged in as " {user.full_name()} "."</p>
                        <div class="d-flex gap-2">
                            <A class="btn btn-primary" href=Page::Contracts.path()>"Your contracts"</A>
                            <A class="btn btn-outline-primary" href=Page::MyProfile.path()>"Your profile"</A>
                            <A class="btn btn-outline-primary" href=Page::NewContract.path()>"New contract"</A>
                        </div>
                    }
                    .into_view(cx),
                    None => view! { cx,
                        <p>"You are not logged in."</p>
                        <A href=Page::Login.path()>"Login now."</A>
                    }
                    .into_view(cx),
                }
            }}
        </main>
    }
}
