//! Patient endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;

use medtrack_core::{MedTracker, Patient, PatientInput, PatientPatch};

use super::MessageResponse;
use crate::error::ApiError;
use crate::extract::Json;

/// `GET /patients` — all patients.
pub async fn list(State(tracker): State<Arc<MedTracker>>) -> Result<Json<Vec<Patient>>, ApiError> {
    Ok(Json(tracker.list_patients()?))
}

/// `GET /patients/:id` — single patient.
pub async fn get(
    State(tracker): State<Arc<MedTracker>>,
    Path(id): Path<String>,
) -> Result<Json<Patient>, ApiError> {
    Ok(Json(tracker.get_patient(&id)?))
}

/// `POST /patients` — create, returning the stored record.
pub async fn create(
    State(tracker): State<Arc<MedTracker>>,
    Json(input): Json<PatientInput>,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    let patient = tracker.create_patient(input)?;
    Ok((StatusCode::CREATED, Json(patient)))
}

/// `PUT /patients/:id` — partial update, returning the merged record.
pub async fn update(
    State(tracker): State<Arc<MedTracker>>,
    Path(id): Path<String>,
    Json(patch): Json<PatientPatch>,
) -> Result<Json<Patient>, ApiError> {
    Ok(Json(tracker.update_patient(&id, patch)?))
}

/// `DELETE /patients/:id`.
pub async fn delete(
    State(tracker): State<Arc<MedTracker>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    tracker.delete_patient(&id)?;
    Ok(Json(MessageResponse::new("Patient deleted successfully")))
}
