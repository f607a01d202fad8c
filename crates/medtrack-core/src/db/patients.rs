//! Patient database operations.

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::Patient;

const DATE_FORMAT: &str = "%Y-%m-%d";

impl Database {
    /// Insert a new patient.
    pub fn insert_patient(&self, patient: &Patient) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO patients (
                id, first_name, last_name, date_of_birth,
                medical_record_number, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                patient.id,
                patient.first_name,
                patient.last_name,
                patient.date_of_birth.format(DATE_FORMAT).to_string(),
                patient.medical_record_number,
                patient.created_at,
                patient.updated_at,
            ],
        )?;
        Ok(())
    }

    /// Update an existing patient.
    pub fn update_patient(&self, patient: &Patient) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE patients SET
                first_name = ?2,
                last_name = ?3,
                date_of_birth = ?4,
                medical_record_number = ?5,
                updated_at = ?6
            WHERE id = ?1
            "#,
            params![
                patient.id,
                patient.first_name,
                patient.last_name,
                patient.date_of_birth.format(DATE_FORMAT).to_string(),
                patient.medical_record_number,
                patient.updated_at,
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Get a patient by ID.
    pub fn get_patient(&self, id: &str) -> DbResult<Option<Patient>> {
        self.conn
            .query_row(
                r#"
                SELECT id, first_name, last_name, date_of_birth,
                       medical_record_number, created_at, updated_at
                FROM patients
                WHERE id = ?
                "#,
                [id],
                map_patient_row,
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// Find a patient by medical record number.
    pub fn find_patient_by_mrn(&self, mrn: &str) -> DbResult<Option<Patient>> {
        self.conn
            .query_row(
                r#"
                SELECT id, first_name, last_name, date_of_birth,
                       medical_record_number, created_at, updated_at
                FROM patients
                WHERE medical_record_number = ?
                "#,
                [mrn],
                map_patient_row,
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// List all patients in creation order.
    pub fn list_patients(&self) -> DbResult<Vec<Patient>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, first_name, last_name, date_of_birth,
                   medical_record_number, created_at, updated_at
            FROM patients
            ORDER BY created_at, id
            "#,
        )?;

        let rows = stmt.query_map([], map_patient_row)?;
        let mut patients = Vec::new();
        for row in rows {
            patients.push(row?.try_into()?);
        }
        Ok(patients)
    }

    /// Delete a patient. Blocked while dosage records reference them.
    pub fn delete_patient(&mut self, id: &str) -> DbResult<()> {
        let tx = self.conn.transaction()?;

        let dependents: i64 = tx.query_row(
            "SELECT COUNT(*) FROM dosages WHERE patient_id = ?",
            [id],
            |row| row.get(0),
        )?;
        if dependents > 0 {
            return Err(DbError::Constraint(format!(
                "patient '{}' has {} dosage record(s) and cannot be deleted",
                id, dependents
            )));
        }

        let rows_affected = tx.execute("DELETE FROM patients WHERE id = ?", [id])?;
        if rows_affected == 0 {
            return Err(DbError::NotFound(format!("patient '{}' not found", id)));
        }

        tx.commit()?;
        Ok(())
    }
}

/// Intermediate row struct for database mapping.
struct PatientRow {
    id: String,
    first_name: String,
    last_name: String,
    date_of_birth: String,
    medical_record_number: String,
    created_at: String,
    updated_at: String,
}

fn map_patient_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PatientRow> {
    Ok(PatientRow {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        date_of_birth: row.get(3)?,
        medical_record_number: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

impl TryFrom<PatientRow> for Patient {
    type Error = DbError;

    fn try_from(row: PatientRow) -> Result<Self, Self::Error> {
        let date_of_birth = NaiveDate::parse_from_str(&row.date_of_birth, DATE_FORMAT)
            .map_err(|e| {
                DbError::Constraint(format!("invalid date_of_birth '{}': {}", row.date_of_birth, e))
            })?;

        Ok(Patient {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            date_of_birth,
            medical_record_number: row.medical_record_number,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
