//! Low-stock alert model.

use serde::{Deserialize, Serialize};

use super::Medication;

/// A derived low-stock alert. Never persisted; computed from the current
/// medication state on every read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockAlert {
    /// ID of the medication in low-stock condition
    pub medication_id: String,
    /// Medication name
    pub name: String,
    /// Units currently on hand
    pub current_stock: i64,
    /// Low-stock threshold
    pub threshold: i64,
    /// `current_stock - threshold`, always negative for an alert
    pub difference: i64,
}

impl StockAlert {
    /// Build the alert for a medication. The caller is responsible for only
    /// doing this when the medication is actually below threshold.
    pub fn for_medication(med: &Medication) -> Self {
        Self {
            medication_id: med.id.clone(),
            name: med.name.clone(),
            current_stock: med.current_stock,
            threshold: med.threshold,
            difference: med.current_stock - med.threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difference() {
        let med = Medication::new("Aspirin".into(), 5, 10);
        let alert = StockAlert::for_medication(&med);
        assert_eq!(alert.difference, -5);
        assert_eq!(alert.name, "Aspirin");
    }
}
