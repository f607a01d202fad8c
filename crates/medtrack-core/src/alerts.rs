//! Low-stock alert evaluation.
//!
//! Alerts are a pure function of the current medication state: a medication
//! is in low-stock condition when `current_stock < threshold` (strict).
//! Nothing is persisted and there is no acknowledgement concept, so the
//! evaluator can be polled at any frequency without side effects.

use crate::models::{Medication, StockAlert};

/// Derive the low-stock alerts for a set of medications, ordered by
/// medication id.
pub fn evaluate(medications: &[Medication]) -> Vec<StockAlert> {
    let mut alerts: Vec<StockAlert> = medications
        .iter()
        .filter(|med| med.is_low_stock())
        .map(StockAlert::for_medication)
        .collect();

    alerts.sort_by(|a, b| a.medication_id.cmp(&b.medication_id));
    alerts
}
