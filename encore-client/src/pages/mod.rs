pub mod account;
pub mod change_password;
pub mod contract;
pub mod contracts;
pub mod event;
pub mod forgot_password;
pub mod home;
pub mod login;
pub mod new_contract;
pub mod new_event;
pub mod profile;
pub mod register;
pub mod reset_password;

/// Every routable page and its path template.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Login,
    Register,
    ForgotPassword,
    ResetPassword,
    ChangePassword,
    Account,
    MyProfile,
    Profile,
    Contracts,
    NewContract,
    Contract,
    NewEvent,
    Event,
}

impl Page {
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::ForgotPassword => "/forgot-password",
            Self::ResetPassword => "/reset-password/:token",
            Self::ChangePassword => "/change-password",
            Self::Account => "/account",
            Self::MyProfile => "/profile",
            Self::Profile => "/profile/:id",
            Self::Contracts => "/contracts",
            Self::NewContract => "/contract/new",
            Self::Contract => "/contract/:id",
            Self::NewEvent => "/contract/:id/event/new",
            Self::Event => "/event/:id",
        }
    }
}

pub fn contract_path(id: i64) -> String {
    format!("/contract/{id}")
}

pub fn new_event_path(contract_id: i64) -> String {
    format!("/contract/{contract_id}/event/new")
}

pub fn event_path(id: i64) -> String {
    format!("/event/{id}")
}
