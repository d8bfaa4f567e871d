use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Engagement scheduled under a contract.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub contract_id: i64,
    pub name: String,
    pub venue: String,
    pub starts_on: NaiveDate,
    pub description: Option<String>,
}

/// Payload for creating an event
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub contract_id: i64,
    pub name: String,
    pub venue: String,
    pub starts_on: NaiveDate,
    pub description: Option<String>,
}
