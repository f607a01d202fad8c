//! Endpoint handlers, one module per resource.

pub mod alerts;
pub mod dosages;
pub mod medications;
pub mod misc;
pub mod patients;

use serde::Serialize;

/// Simple confirmation body for delete operations and the home route.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
