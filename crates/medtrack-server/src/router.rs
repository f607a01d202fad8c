//! REST router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Every route is backed by the shared `MedTracker` service; no per-route
//! middleware is required.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use medtrack_core::MedTracker;

use crate::endpoints;

/// Build the tracker API router.
pub fn app(tracker: Arc<MedTracker>) -> Router {
    Router::new()
        .route("/", get(endpoints::misc::home))
        .route(
            "/medications",
            get(endpoints::medications::list).post(endpoints::medications::create),
        )
        .route(
            "/medications/:id",
            get(endpoints::medications::get)
                .put(endpoints::medications::update)
                .delete(endpoints::medications::delete),
        )
        .route(
            "/patients",
            get(endpoints::patients::list).post(endpoints::patients::create),
        )
        .route(
            "/patients/:id",
            get(endpoints::patients::get)
                .put(endpoints::patients::update)
                .delete(endpoints::patients::delete),
        )
        .route(
            "/dosages",
            get(endpoints::dosages::list).post(endpoints::dosages::create),
        )
        .route(
            "/dosages/:id",
            get(endpoints::dosages::get)
                .put(endpoints::dosages::update)
                .delete(endpoints::dosages::delete),
        )
        .route("/alerts", get(endpoints::alerts::list))
        .with_state(tracker)
}
