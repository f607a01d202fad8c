//! The tracker service: validation, identifier assignment, and the public
//! entry point for every entity operation.
//!
//! All writes re-validate the full merged record, so a partial update can
//! never leave an entity violating a field invariant.

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::alerts;
use crate::db::Database;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{
    Dosage, DosageInput, DosagePatch, Medication, MedicationInput, MedicationPatch, Patient,
    PatientInput, PatientPatch, StockAlert,
};

/// Service-level configuration, passed in explicitly at startup.
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    /// Decrement the referenced medication's stock by one dispensed unit
    /// (floored at zero) when a dosage is recorded. Off by default: the
    /// stock level is operator-maintained unless this is opted into.
    pub decrement_stock_on_dosage: bool,
}

/// Thread-safe tracker service over a single SQLite database.
pub struct MedTracker {
    db: Arc<Mutex<Database>>,
    config: ServiceConfig,
}

impl MedTracker {
    /// Open or create a database at the given path.
    pub fn open<P: AsRef<Path>>(path: P, config: ServiceConfig) -> TrackerResult<Self> {
        let db = Database::open(path)?;
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
            config,
        })
    }

    /// Create an in-memory service (for testing).
    pub fn open_in_memory() -> TrackerResult<Self> {
        Self::open_in_memory_with_config(ServiceConfig::default())
    }

    /// Create an in-memory service with explicit configuration.
    pub fn open_in_memory_with_config(config: ServiceConfig) -> TrackerResult<Self> {
        let db = Database::open_in_memory()?;
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
            config,
        })
    }

    // =========================================================================
    // Medication Operations
    // =========================================================================

    /// Create a new medication.
    pub fn create_medication(&self, input: MedicationInput) -> TrackerResult<Medication> {
        let mut med = Medication::new(input.name, input.current_stock, input.threshold);
        med.description = input.description;
        validate_medication(&med)?;

        let db = self.db.lock()?;
        db.insert_medication(&med)?;
        tracing::info!(id = %med.id, name = %med.name, "medication created");
        Ok(med)
    }

    /// Get a medication by ID.
    pub fn get_medication(&self, id: &str) -> TrackerResult<Medication> {
        let db = self.db.lock()?;
        db.get_medication(id)?
            .ok_or_else(|| TrackerError::NotFound(format!("medication '{}' not found", id)))
    }

    /// List all medications.
    pub fn list_medications(&self) -> TrackerResult<Vec<Medication>> {
        let db = self.db.lock()?;
        Ok(db.list_medications()?)
    }

    /// Apply a partial update and return the merged record.
    pub fn update_medication(&self, id: &str, patch: MedicationPatch) -> TrackerResult<Medication> {
        let db = self.db.lock()?;
        let mut med = db
            .get_medication(id)?
            .ok_or_else(|| TrackerError::NotFound(format!("medication '{}' not found", id)))?;

        patch.apply(&mut med);
        med.updated_at = chrono::Utc::now().to_rfc3339();
        validate_medication(&med)?;

        db.update_medication(&med)?;
        Ok(med)
    }

    /// Delete a medication. Blocked while dosage records reference it.
    pub fn delete_medication(&self, id: &str) -> TrackerResult<()> {
        let mut db = self.db.lock()?;
        db.delete_medication(id)?;
        tracing::info!(id, "medication deleted");
        Ok(())
    }

    // =========================================================================
    // Patient Operations
    // =========================================================================

    /// Create a new patient.
    pub fn create_patient(&self, input: PatientInput) -> TrackerResult<Patient> {
        let patient = Patient::new(
            input.first_name,
            input.last_name,
            input.date_of_birth,
            input.medical_record_number,
        );
        validate_patient(&patient)?;

        let db = self.db.lock()?;
        if db.find_patient_by_mrn(&patient.medical_record_number)?.is_some() {
            return Err(TrackerError::Conflict(format!(
                "medical_record_number '{}' is already in use",
                patient.medical_record_number
            )));
        }

        db.insert_patient(&patient)?;
        tracing::info!(id = %patient.id, "patient created");
        Ok(patient)
    }

    /// Get a patient by ID.
    pub fn get_patient(&self, id: &str) -> TrackerResult<Patient> {
        let db = self.db.lock()?;
        db.get_patient(id)?
            .ok_or_else(|| TrackerError::NotFound(format!("patient '{}' not found", id)))
    }

    /// List all patients.
    pub fn list_patients(&self) -> TrackerResult<Vec<Patient>> {
        let db = self.db.lock()?;
        Ok(db.list_patients()?)
    }

    /// Apply a partial update and return the merged record.
    pub fn update_patient(&self, id: &str, patch: PatientPatch) -> TrackerResult<Patient> {
        let db = self.db.lock()?;
        let mut patient = db
            .get_patient(id)?
            .ok_or_else(|| TrackerError::NotFound(format!("patient '{}' not found", id)))?;

        patch.apply(&mut patient);
        patient.updated_at = chrono::Utc::now().to_rfc3339();
        validate_patient(&patient)?;

        if let Some(other) = db.find_patient_by_mrn(&patient.medical_record_number)? {
            if other.id != patient.id {
                return Err(TrackerError::Conflict(format!(
                    "medical_record_number '{}' is already in use",
                    patient.medical_record_number
                )));
            }
        }

        db.update_patient(&patient)?;
        Ok(patient)
    }

    /// Delete a patient. Blocked while dosage records reference them.
    pub fn delete_patient(&self, id: &str) -> TrackerResult<()> {
        let mut db = self.db.lock()?;
        db.delete_patient(id)?;
        tracing::info!(id, "patient deleted");
        Ok(())
    }

    // =========================================================================
    // Dosage Operations
    // =========================================================================

    /// Record a dosage administration.
    ///
    /// Both foreign keys are verified and the row is written inside a single
    /// transaction; when configured, the stock decrement joins it.
    pub fn record_dosage(&self, input: DosageInput) -> TrackerResult<Dosage> {
        let dosage = Dosage::from_input(input);
        validate_dosage(&dosage)?;

        let mut db = self.db.lock()?;
        db.insert_dosage(&dosage, self.config.decrement_stock_on_dosage)?;
        tracing::info!(
            id = %dosage.id,
            medication_id = %dosage.medication_id,
            patient_id = %dosage.patient_id,
            "dosage recorded"
        );
        Ok(dosage)
    }

    /// Get a dosage by ID.
    pub fn get_dosage(&self, id: &str) -> TrackerResult<Dosage> {
        let db = self.db.lock()?;
        db.get_dosage(id)?
            .ok_or_else(|| TrackerError::NotFound(format!("dosage '{}' not found", id)))
    }

    /// List all dosages.
    pub fn list_dosages(&self) -> TrackerResult<Vec<Dosage>> {
        let db = self.db.lock()?;
        Ok(db.list_dosages()?)
    }

    /// Apply a partial update and return the merged record. Repointed
    /// foreign keys are re-verified before the update is accepted.
    pub fn update_dosage(&self, id: &str, patch: DosagePatch) -> TrackerResult<Dosage> {
        let mut db = self.db.lock()?;
        let mut dosage = db
            .get_dosage(id)?
            .ok_or_else(|| TrackerError::NotFound(format!("dosage '{}' not found", id)))?;

        patch.apply(&mut dosage);
        dosage.updated_at = chrono::Utc::now().to_rfc3339();
        validate_dosage(&dosage)?;

        db.update_dosage(&dosage)?;
        Ok(dosage)
    }

    /// Delete a dosage.
    pub fn delete_dosage(&self, id: &str) -> TrackerResult<()> {
        let db = self.db.lock()?;
        if !db.delete_dosage(id)? {
            return Err(TrackerError::NotFound(format!("dosage '{}' not found", id)));
        }
        Ok(())
    }

    // =========================================================================
    // Alert Operations
    // =========================================================================

    /// Derive the current low-stock alerts. Pure read, safe to poll.
    pub fn low_stock_alerts(&self) -> TrackerResult<Vec<StockAlert>> {
        let db = self.db.lock()?;
        let medications = db.list_medications()?;
        Ok(alerts::evaluate(&medications))
    }
}

fn validate_medication(med: &Medication) -> TrackerResult<()> {
    require_non_empty("name", &med.name)?;
    require_non_negative("current_stock", med.current_stock)?;
    require_non_negative("threshold", med.threshold)?;
    Ok(())
}

fn validate_patient(patient: &Patient) -> TrackerResult<()> {
    require_non_empty("first_name", &patient.first_name)?;
    require_non_empty("last_name", &patient.last_name)?;
    require_non_empty("medical_record_number", &patient.medical_record_number)?;
    Ok(())
}

fn validate_dosage(dosage: &Dosage) -> TrackerResult<()> {
    require_non_empty("administered_by", &dosage.administered_by)?;
    // `!(x >= 0.0)` also rejects NaN
    if !(dosage.dosage_amount >= 0.0) {
        return Err(TrackerError::validation(
            "dosage_amount",
            "must not be negative",
        ));
    }
    Ok(())
}

fn require_non_empty(field: &'static str, value: &str) -> TrackerResult<()> {
    if value.trim().is_empty() {
        return Err(TrackerError::validation(field, "must not be empty"));
    }
    Ok(())
}

fn require_non_negative(field: &'static str, value: i64) -> TrackerResult<()> {
    if value < 0 {
        return Err(TrackerError::validation(field, "must not be negative"));
    }
    Ok(())
}
