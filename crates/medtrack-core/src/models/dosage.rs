//! Dosage models.
//!
//! A dosage is a recorded administration event linking one medication and
//! one patient at a point in time.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A recorded dosage administration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dosage {
    /// Unique ID, assigned at creation
    pub id: String,
    /// Referenced medication (must exist at creation time)
    pub medication_id: String,
    /// Referenced patient (must exist at creation time)
    pub patient_id: String,
    /// Amount administered (never negative)
    pub dosage_amount: f64,
    /// When the dose was administered
    #[serde(with = "dosage_time_format")]
    pub dosage_time: NaiveDateTime,
    /// Who administered the dose
    pub administered_by: String,
    /// Free-form notes
    pub notes: Option<String>,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl Dosage {
    /// Create a new dosage record from an input payload.
    pub fn from_input(input: DosageInput) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            medication_id: input.medication_id,
            patient_id: input.patient_id,
            dosage_amount: input.dosage_amount,
            dosage_time: input.dosage_time,
            administered_by: input.administered_by,
            notes: input.notes,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Payload for recording a dosage.
#[derive(Debug, Clone, Deserialize)]
pub struct DosageInput {
    pub medication_id: String,
    pub patient_id: String,
    pub dosage_amount: f64,
    #[serde(with = "dosage_time_format")]
    pub dosage_time: NaiveDateTime,
    pub administered_by: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial update for a dosage. Absent fields keep their current value.
///
/// Repointing `medication_id`/`patient_id` is allowed but re-validated
/// against existing rows before the update is accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DosagePatch {
    pub medication_id: Option<String>,
    pub patient_id: Option<String>,
    pub dosage_amount: Option<f64>,
    #[serde(default, with = "optional_dosage_time_format")]
    pub dosage_time: Option<NaiveDateTime>,
    pub administered_by: Option<String>,
    pub notes: Option<String>,
}

impl DosagePatch {
    /// Apply this patch on top of an existing record.
    pub fn apply(self, dosage: &mut Dosage) {
        if let Some(medication_id) = self.medication_id {
            dosage.medication_id = medication_id;
        }
        if let Some(patient_id) = self.patient_id {
            dosage.patient_id = patient_id;
        }
        if let Some(dosage_amount) = self.dosage_amount {
            dosage.dosage_amount = dosage_amount;
        }
        if let Some(dosage_time) = self.dosage_time {
            dosage.dosage_time = dosage_time;
        }
        if let Some(administered_by) = self.administered_by {
            dosage.administered_by = administered_by;
        }
        if let Some(notes) = self.notes {
            dosage.notes = Some(notes);
        }
    }
}

/// Timestamp format for `dosage_time`.
///
/// Serializes as `YYYY-MM-DDTHH:MM:SS`. Accepts either the `T`-separated
/// ISO form or the space-separated form clients submit from form inputs.
pub mod dosage_time_format {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
    const SPACE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(ISO_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse(&s).map_err(serde::de::Error::custom)
    }

    pub(super) fn parse(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
        NaiveDateTime::parse_from_str(s, ISO_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(s, SPACE_FORMAT))
    }
}

/// `Option<NaiveDateTime>` wrapper around [`dosage_time_format`].
mod optional_dosage_time_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        match s {
            Some(s) => super::dosage_time_format::parse(&s)
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dosage_time_accepts_space_separator() {
        let json = r#"{
            "medication_id": "med-1",
            "patient_id": "pat-1",
            "dosage_amount": 5.0,
            "dosage_time": "2026-08-25 14:30:00",
            "administered_by": "Nurse Joy"
        }"#;
        let input: DosageInput = serde_json::from_str(json).unwrap();
        assert_eq!(
            input.dosage_time.format("%Y-%m-%dT%H:%M:%S").to_string(),
            "2026-08-25T14:30:00"
        );
        assert_eq!(input.notes, None);
    }

    #[test]
    fn test_dosage_time_round_trips_iso() {
        let json = r#"{
            "medication_id": "med-1",
            "patient_id": "pat-1",
            "dosage_amount": 5.0,
            "dosage_time": "2026-08-25T14:30:00",
            "administered_by": "Nurse Joy"
        }"#;
        let input: DosageInput = serde_json::from_str(json).unwrap();
        let dosage = Dosage::from_input(input);

        let value = serde_json::to_value(&dosage).unwrap();
        assert_eq!(value["dosage_time"], "2026-08-25T14:30:00");
    }

    #[test]
    fn test_invalid_dosage_time_rejected() {
        let json = r#"{
            "medication_id": "med-1",
            "patient_id": "pat-1",
            "dosage_amount": 5.0,
            "dosage_time": "yesterday",
            "administered_by": "Nurse Joy"
        }"#;
        assert!(serde_json::from_str::<DosageInput>(json).is_err());
    }

    #[test]
    fn test_patch_repoints_medication() {
        let input: DosageInput = serde_json::from_str(
            r#"{
                "medication_id": "med-1",
                "patient_id": "pat-1",
                "dosage_amount": 5.0,
                "dosage_time": "2026-08-25T14:30:00",
                "administered_by": "Nurse Joy"
            }"#,
        )
        .unwrap();
        let mut dosage = Dosage::from_input(input);

        let patch = DosagePatch {
            medication_id: Some("med-2".into()),
            ..Default::default()
        };
        patch.apply(&mut dosage);

        assert_eq!(dosage.medication_id, "med-2");
        assert_eq!(dosage.patient_id, "pat-1");
    }
}
