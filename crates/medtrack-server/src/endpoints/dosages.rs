//! Dosage endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;

use medtrack_core::{Dosage, DosageInput, DosagePatch, MedTracker};

use super::MessageResponse;
use crate::error::ApiError;
use crate::extract::Json;

/// `GET /dosages` — all recorded dosages.
pub async fn list(State(tracker): State<Arc<MedTracker>>) -> Result<Json<Vec<Dosage>>, ApiError> {
    Ok(Json(tracker.list_dosages()?))
}

/// `GET /dosages/:id` — single dosage.
pub async fn get(
    State(tracker): State<Arc<MedTracker>>,
    Path(id): Path<String>,
) -> Result<Json<Dosage>, ApiError> {
    Ok(Json(tracker.get_dosage(&id)?))
}

/// `POST /dosages` — record an administration, returning the stored record.
pub async fn create(
    State(tracker): State<Arc<MedTracker>>,
    Json(input): Json<DosageInput>,
) -> Result<(StatusCode, Json<Dosage>), ApiError> {
    let dosage = tracker.record_dosage(input)?;
    Ok((StatusCode::CREATED, Json(dosage)))
}

/// `PUT /dosages/:id` — partial update, returning the merged record.
pub async fn update(
    State(tracker): State<Arc<MedTracker>>,
    Path(id): Path<String>,
    Json(patch): Json<DosagePatch>,
) -> Result<Json<Dosage>, ApiError> {
    Ok(Json(tracker.update_dosage(&id, patch)?))
}

/// `DELETE /dosages/:id`.
pub async fn delete(
    State(tracker): State<Arc<MedTracker>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    tracker.delete_dosage(&id)?;
    Ok(Json(MessageResponse::new("Dosage deleted successfully")))
}
