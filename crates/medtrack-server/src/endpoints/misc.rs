//! Home route.

use super::MessageResponse;
use crate::extract::Json;

/// `GET /` — service banner.
pub async fn home() -> Json<MessageResponse> {
    Json(MessageResponse::new("Medication Tracker API"))
}
