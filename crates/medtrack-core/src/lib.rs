//! MedTrack Core Library
//!
//! Domain service for tracking medications, patients, and dosage
//! administrations, with derived low-stock alerts.
//!
//! # Architecture
//!
//! ```text
//!                 ┌─────────────────────────────┐
//!                 │          MedTracker         │
//!                 │  validation + id assignment │
//!                 └──────┬───────────────┬──────┘
//!                        │               │
//!                ┌───────▼──────┐  ┌─────▼──────┐
//!                │   Database   │  │   alerts   │
//!                │   (SQLite)   │  │ (pure fn)  │
//!                └──────────────┘  └────────────┘
//! ```
//!
//! # Core Principles
//!
//! - **Every write re-validates the full record.** A partial update can
//!   never leave an entity with a negative stock or a blank required field.
//! - **Alerts are derived, never stored.** `low_stock_alerts()` is a pure
//!   function of current medication state and is safe to poll.
//! - **Referential integrity at write time.** Dosage foreign keys are
//!   checked in the same transaction as the insert, and entities with
//!   dosage history cannot be deleted.
//!
//! # Modules
//!
//! - [`db`]: SQLite database layer
//! - [`models`]: Domain types (Medication, Patient, Dosage, StockAlert)
//! - [`alerts`]: Low-stock alert evaluation
//! - [`service`]: The [`MedTracker`] service object

pub mod alerts;
pub mod db;
pub mod error;
pub mod models;
pub mod service;

// Re-export commonly used types
pub use db::Database;
pub use error::{TrackerError, TrackerResult};
pub use models::{
    Dosage, DosageInput, DosagePatch, Medication, MedicationInput, MedicationPatch, Patient,
    PatientInput, PatientPatch, StockAlert,
};
pub use service::{MedTracker, ServiceConfig};
