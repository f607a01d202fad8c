//! Patient models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A patient record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Unique ID, assigned at creation
    pub id: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Date of birth (calendar date, no time component)
    pub date_of_birth: NaiveDate,
    /// Medical record number, unique across patients
    pub medical_record_number: String,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl Patient {
    /// Create a new patient with required fields.
    pub fn new(
        first_name: String,
        last_name: String,
        date_of_birth: NaiveDate,
        medical_record_number: String,
    ) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            first_name,
            last_name,
            date_of_birth,
            medical_record_number,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Full display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Payload for creating a patient.
#[derive(Debug, Clone, Deserialize)]
pub struct PatientInput {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub medical_record_number: String,
}

/// Partial update for a patient. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub medical_record_number: Option<String>,
}

impl PatientPatch {
    /// Apply this patch on top of an existing record.
    pub fn apply(self, patient: &mut Patient) {
        if let Some(first_name) = self.first_name {
            patient.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            patient.last_name = last_name;
        }
        if let Some(date_of_birth) = self.date_of_birth {
            patient.date_of_birth = date_of_birth;
        }
        if let Some(medical_record_number) = self.medical_record_number {
            patient.medical_record_number = medical_record_number;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dob() -> NaiveDate {
        NaiveDate::from_ymd_opt(1984, 6, 2).unwrap()
    }

    #[test]
    fn test_new_patient() {
        let patient = Patient::new("Jane".into(), "Doe".into(), dob(), "MRN-001".into());
        assert_eq!(patient.full_name(), "Jane Doe");
        assert_eq!(patient.id.len(), 36);
    }

    #[test]
    fn test_date_of_birth_serde_format() {
        let patient = Patient::new("Jane".into(), "Doe".into(), dob(), "MRN-001".into());
        let json = serde_json::to_value(&patient).unwrap();
        assert_eq!(json["date_of_birth"], "1984-06-02");
    }
}
