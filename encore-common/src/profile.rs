use serde::{Deserialize, Serialize};

/// Public professional profile attached to an account.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub discipline: String,
    pub bio: Option<String>,
    pub website: Option<String>,
    #[serde(default)]
    pub portfolio_urls: Vec<String>,
}

/// Payload for creating a profile
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateProfileRequest {
    pub title: String,
    pub discipline: String,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub portfolio_urls: Vec<String>,
}

/// Payload for updating a profile. Fields left absent are untouched by
/// the backend.
#[derive(Clone, Debug, Default, Serialize)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discipline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio_urls: Option<Vec<String>>,
}

#[cfg(test)]
mod test {
    use super::Profile;

    #[test]
    fn profile_should_default_missing_portfolio_to_empty() {
        let profile: Profile = serde_json::from_str(
            r#"{"id":3,"user_id":7,"title":"Cellist","discipline":"music","bio":null,"website":null}"#,
        )
        .unwrap();
        assert!(profile.portfolio_urls.is_empty());
    }
}
