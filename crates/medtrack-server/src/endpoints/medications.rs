//! Medication endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;

use medtrack_core::{MedTracker, Medication, MedicationInput, MedicationPatch};

use super::MessageResponse;
use crate::error::ApiError;
use crate::extract::Json;

/// `GET /medications` — all medications.
pub async fn list(
    State(tracker): State<Arc<MedTracker>>,
) -> Result<Json<Vec<Medication>>, ApiError> {
    Ok(Json(tracker.list_medications()?))
}

/// `GET /medications/:id` — single medication.
pub async fn get(
    State(tracker): State<Arc<MedTracker>>,
    Path(id): Path<String>,
) -> Result<Json<Medication>, ApiError> {
    Ok(Json(tracker.get_medication(&id)?))
}

/// `POST /medications` — create, returning the stored record.
pub async fn create(
    State(tracker): State<Arc<MedTracker>>,
    Json(input): Json<MedicationInput>,
) -> Result<(StatusCode, Json<Medication>), ApiError> {
    let med = tracker.create_medication(input)?;
    Ok((StatusCode::CREATED, Json(med)))
}

/// `PUT /medications/:id` — partial update, returning the merged record.
pub async fn update(
    State(tracker): State<Arc<MedTracker>>,
    Path(id): Path<String>,
    Json(patch): Json<MedicationPatch>,
) -> Result<Json<Medication>, ApiError> {
    Ok(Json(tracker.update_medication(&id, patch)?))
}

/// `DELETE /medications/:id`.
pub async fn delete(
    State(tracker): State<Arc<MedTracker>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    tracker.delete_medication(&id)?;
    Ok(Json(MessageResponse::new("Medication deleted successfully")))
}
