use serde::{Deserialize, Serialize};

/// Credential pair submitted to the token endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Body of a successful `POST /token` exchange. `access_token` stays
/// optional: a 200 without it must surface as a failed login, not as a
/// decode error.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenPayload {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
}

/// Payload for `POST /forgot-password`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Payload for `POST /reset-password`. The token arrives out of band in
/// the reset email.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

/// Payload for the bearer-authenticated `POST /change_password`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[cfg(test)]
mod test {
    use super::TokenPayload;

    #[test]
    fn token_payload_should_parse_without_access_token() {
        let payload: TokenPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.access_token.is_none());
    }

    #[test]
    fn token_payload_should_parse_bearer_response() {
        let payload: TokenPayload =
            serde_json::from_str(r#"{"access_token":"abc123","token_type":"bearer"}"#).unwrap();
        assert_eq!(payload.access_token.as_deref(), Some("abc123"));
    }
}
