//! Records and request payloads shared between the Encore client and the
//! marketplace REST API, plus the client-side validators applied before a
//! payload leaves the browser.

pub mod auth;
pub mod contract;
pub mod event;
pub mod profile;
pub mod user;
pub mod validate;

use serde::{Deserialize, Serialize};

/// Create responses are consumed only for the id of the new record. The
/// field stays optional so an absent id surfaces as a missing-field error
/// instead of a decode failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedId {
    pub id: Option<i64>,
}

/// Body of a successful multipart upload.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub urls: Vec<String>,
}
