//! Low-stock alert endpoint.

use std::sync::Arc;

use axum::extract::State;

use medtrack_core::{MedTracker, StockAlert};

use crate::error::ApiError;
use crate::extract::Json;

/// `GET /alerts` — medications currently below their threshold.
///
/// Derived on every call; the client polls this on a fixed interval.
pub async fn list(State(tracker): State<Arc<MedTracker>>) -> Result<Json<Vec<StockAlert>>, ApiError> {
    Ok(Json(tracker.low_stock_alerts()?))
}
