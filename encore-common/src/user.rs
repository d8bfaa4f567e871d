use serde::{Deserialize, Serialize};

/// Legal classification of an account holder. Companies carry VAT and
/// bank details for invoicing; individuals may leave them absent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Individual,
    Company,
}

impl EntityKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Company => "company",
        }
    }
}

/// Marketplace account as the backend returns it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub type_of_entity: EntityKind,
    pub vat_id: Option<String>,
    pub bank_account: Option<String>,
    pub is_active: bool,
}

impl User {
    /// First name and last name of the user in a single string
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

/// Payload for creating a new account
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub type_of_entity: EntityKind,
    pub vat_id: Option<String>,
    pub bank_account: Option<String>,
}

/// Payload for updating the authenticated account. Fields left absent are
/// untouched by the backend.
#[derive(Clone, Debug, Default, Serialize)]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_account: Option<String>,
}

#[cfg(test)]
mod test {
    use super::{EntityKind, User};

    fn test_user() -> User {
        User {
            id: 7,
            username: "alice".to_owned(),
            name: "Alice".to_owned(),
            surname: "Moreau".to_owned(),
            email: "alice@example.com".to_owned(),
            phone_number: None,
            type_of_entity: EntityKind::Individual,
            vat_id: None,
            bank_account: None,
            is_active: true,
        }
    }

    #[test]
    fn full_name_should_join_name_and_surname() {
        assert_eq!(test_user().full_name(), "Alice Moreau");
    }

    #[test]
    fn entity_kind_should_round_trip_snake_case() {
        let json = serde_json::to_string(&EntityKind::Company).unwrap();
        assert_eq!(json, "\"company\"");
        let parsed: EntityKind = serde_json::from_str("\"individual\"").unwrap();
        assert_eq!(parsed, EntityKind::Individual);
    }
}
