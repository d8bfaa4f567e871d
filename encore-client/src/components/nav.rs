use leptos::*;
use leptos_router::{use_navigate, A};

use crate::{
    pages::Page,
    session::{self, use_session, BrowserTokenStore},
};

#[component]
pub fn NavBar(cx: Scope) -> impl IntoView {
    view! { cx,
        <nav class="navbar navbar-expand-lg bg-body-tertiary" id="mainNavBar">
            <div class="container-fluid">
                <A class="navbar-brand" href=Page::Home.path()>"Encore"</A>
                <ul class="navbar-nav me-auto my-2 my-lg-0 navbar-nav-scroll" style="--bs-scroll-height: 100px;">
                    <li class="nav-item">
                        <A class="nav-link" href=Page::Home.path()>"Home"</A>
                    </li>
                    <li class="nav-item">
                        <A class="nav-link" href=Page::Contracts.path()>"Contracts"</A>
                    </li>
                    <li class="nav-item">
                        <A class="nav-link" href=Page::MyProfile.path()>"My Profile"</A>
                    </li>
                </ul>
                <ul class="navbar-nav ms-auto my-2 my-lg-0 navbar-nav-scroll" style="--bs-scroll-height: 100px;">
                    <UserMenu/>
                </ul>
            </div>
        </nav>
    }
}

/// Right-hand side of the nav bar: the signed-in user's dropdown, or a
/// login link once the session has settled without one.
#[component]
fn UserMenu(cx: Scope) -> impl IntoView {
    let session = use_session(cx);
    move || {
        if session.is_loading() {
            return view! { cx,
                <li class="nav-item">
                    <span class="nav-link disabled">"..."</span>
                </li>
            }
            .into_view(cx);
        }
        match session.user() {
            Some(user) => view! { cx,
                <li class="nav-item dropdown">
                    <a class="nav-link dropdown-toggle" href="#" role="button" data-bs-toggle="dropdown"
                        aria-expanded="false">
                        {user.full_name()}
                    </a>
                    <ul class="dropdown-menu dropdown-menu-end">
                        <li><A class="dropdown-item" href=Page::Account.path()>"Account"</A></li>
                        <li><A class="dropdown-item" href=Page::ChangePassword.path()>"Change password"</A></li>
                        <li><LogoutButton/></li>
                    </ul>
                </li>
            }
            .into_view(cx),
            None => view! { cx,
                <li class="nav-item">
                    <A class="nav-link" href=Page::Login.path()>"Login"</A>
                </li>
            }
            .into_view(cx),
        }
    }
}

#[component]
fn LogoutButton(cx: Scope) -> impl IntoView {
    let session = use_session(cx);
    let logout = move |_| {
        session::sign_out(session, &BrowserTokenStore);
        let navigate = use_navigate(cx);
        if let Err(error) = navigate(Page::Login.path(), Default::default()) {
            log::error!("{error}");
        }
    };
    view! { cx,
        <button class="dropdown-item" on:click=logout>"Logout"</button>
    }
}
