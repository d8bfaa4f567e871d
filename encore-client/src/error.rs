use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// All possible error types that may occur when talking to the
/// marketplace backend. Every variant renders as a user-facing message;
/// only [Error::Unauthorized] routes the user back to the login page.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Could not reach the server\n{0}")]
    Fetch(#[from] gloo_net::Error),
    #[error("Your session has expired. Please sign in again")]
    Unauthorized,
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("Unexpected response from the server\n{0}")]
    Schema(String),
    #[error("Server response was missing `{0}`")]
    MissingField(&'static str),
    #[error("Could not prepare the file upload")]
    Upload,
}

impl Error {
    /// Whether the failure should route the user back to the login page
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}
