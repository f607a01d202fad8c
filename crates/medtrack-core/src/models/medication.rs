//! Medication models.

use serde::{Deserialize, Serialize};

/// A medication with its current inventory level and low-stock threshold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Medication {
    /// Unique ID, assigned at creation and immutable afterwards
    pub id: String,
    /// Display name
    pub name: String,
    /// Free-form description
    pub description: Option<String>,
    /// Units currently on hand (never negative)
    pub current_stock: i64,
    /// Low-stock threshold (never negative)
    pub threshold: i64,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl Medication {
    /// Create a new medication with required fields.
    pub fn new(name: String, current_stock: i64, threshold: i64) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            description: None,
            current_stock,
            threshold,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Whether the medication is in low-stock condition.
    pub fn is_low_stock(&self) -> bool {
        self.current_stock < self.threshold
    }
}

/// Payload for creating a medication.
#[derive(Debug, Clone, Deserialize)]
pub struct MedicationInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub current_stock: i64,
    pub threshold: i64,
}

/// Partial update for a medication. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MedicationPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub current_stock: Option<i64>,
    pub threshold: Option<i64>,
}

impl MedicationPatch {
    /// Apply this patch on top of an existing record.
    pub fn apply(self, med: &mut Medication) {
        if let Some(name) = self.name {
            med.name = name;
        }
        if let Some(description) = self.description {
            med.description = Some(description);
        }
        if let Some(current_stock) = self.current_stock {
            med.current_stock = current_stock;
        }
        if let Some(threshold) = self.threshold {
            med.threshold = threshold;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_medication() {
        let med = Medication::new("Aspirin".into(), 50, 10);
        assert_eq!(med.name, "Aspirin");
        assert_eq!(med.current_stock, 50);
        assert_eq!(med.threshold, 10);
        assert_eq!(med.id.len(), 36); // UUID format
        assert!(!med.is_low_stock());
    }

    #[test]
    fn test_low_stock_is_strict() {
        let mut med = Medication::new("Aspirin".into(), 10, 10);
        assert!(!med.is_low_stock()); // equal is not low

        med.current_stock = 9;
        assert!(med.is_low_stock());
    }

    #[test]
    fn test_patch_keeps_absent_fields() {
        let mut med = Medication::new("Aspirin".into(), 50, 10);
        med.description = Some("pain relief".into());

        let patch = MedicationPatch {
            current_stock: Some(5),
            ..Default::default()
        };
        patch.apply(&mut med);

        assert_eq!(med.name, "Aspirin");
        assert_eq!(med.description, Some("pain relief".into()));
        assert_eq!(med.current_stock, 5);
        assert_eq!(med.threshold, 10);
    }
}
