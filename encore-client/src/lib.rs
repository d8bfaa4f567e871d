//! Encore — browser client for a creative-services marketplace.
//!
//! A client-side rendered Leptos application compiled to WebAssembly. It
//! holds no state of its own beyond the signed-in session and one bearer
//! token in local storage; everything else lives behind the REST API.

pub mod api;
mod components;
pub mod config;
pub mod error;
pub mod fetch;
mod forms;
mod pages;
pub mod session;

use leptos::*;
use leptos_router::*;

use crate::{
    components::nav::NavBar,
    pages::{
        account::Account, change_password::ChangePassword, contract::Contract,
        contracts::Contracts, event::Event, forgot_password::ForgotPassword, home::Home,
        login::Login, new_contract::NewContract, new_event::NewEvent, profile::MyProfile,
        profile::ProfileView, register::Register, reset_password::ResetPassword, Page,
    },
    session::BrowserTokenStore,
};

/// Root of the component tree: provides the session context, kicks off
/// the one-time token exchange, and mounts the router.
#[component]
pub fn App(cx: Scope) -> impl IntoView {
    let session = session::provide_session(cx);
    session.initialize(BrowserTokenStore);
    view! { cx,
        <Router>
            <NavBar/>
            <Routes>
                <Route path=Page::Home.path() view=move |cx| view! { cx, <Home/> }/>
                <Route path=Page::Login.path() view=move |cx| view! { cx, <Login/> }/>
                <Route path=Page::Register.path() view=move |cx| view! { cx, <Register/> }/>
                <Route
                    path=Page::ForgotPassword.path()
                    view=move |cx| view! { cx, <ForgotPassword/> }
                />
                <Route
                    path=Page::ResetPassword.path()
                    view=move |cx| view! { cx, <ResetPassword/> }
                />
                <Route
                    path=Page::ChangePassword.path()
                    view=move |cx| view! { cx, <ChangePassword/> }
                />
                <Route path=Page::Account.path() view=move |cx| view! { cx, <Account/> }/>
                <Route path=Page::MyProfile.path() view=move |cx| view! { cx, <MyProfile/> }/>
                <Route path=Page::Profile.path() view=move |cx| view! { cx, <ProfileView/> }/>
                <Route path=Page::Contracts.path() view=move |cx| view! { cx, <Contracts/> }/>
                <Route
                    path=Page::NewContract.path()
                    view=move |cx| view! { cx, <NewContract/> }
                />
                <Route path=Page::Contract.path() view=move |cx| view! { cx, <Contract/> }/>
                <Route path=Page::NewEvent.path() view=move |cx| view! { cx, <NewEvent/> }/>
                <Route path=Page::Event.path() view=move |cx| view! { cx, <Event/> }/>
            </Routes>
        </Router>
    }
}
