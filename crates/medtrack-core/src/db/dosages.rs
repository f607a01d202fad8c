//! Dosage database operations.
//!
//! Foreign-key checks and the row write always happen inside one
//! transaction, so a concurrent delete of the referenced medication or
//! patient cannot race the insert.

use chrono::NaiveDateTime;
use rusqlite::{params, OptionalExtension, Transaction};

use super::{Database, DbError, DbResult};
use crate::models::Dosage;

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

impl Database {
    /// Insert a new dosage after verifying both referenced records exist.
    ///
    /// With `decrement_stock` set, the referenced medication loses one
    /// dispensed unit (floored at zero) in the same transaction.
    pub fn insert_dosage(&mut self, dosage: &Dosage, decrement_stock: bool) -> DbResult<()> {
        let tx = self.conn.transaction()?;

        check_references(&tx, &dosage.medication_id, &dosage.patient_id)?;

        tx.execute(
            r#"
            INSERT INTO dosages (
                id, medication_id, patient_id, dosage_amount, dosage_time,
                administered_by, notes, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                dosage.id,
                dosage.medication_id,
                dosage.patient_id,
                dosage.dosage_amount,
                dosage.dosage_time.format(TIME_FORMAT).to_string(),
                dosage.administered_by,
                dosage.notes,
                dosage.created_at,
                dosage.updated_at,
            ],
        )?;

        if decrement_stock {
            tx.execute(
                r#"
                UPDATE medications SET
                    current_stock = MAX(current_stock - 1, 0),
                    updated_at = ?2
                WHERE id = ?1
                "#,
                params![dosage.medication_id, dosage.updated_at],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// Update an existing dosage, re-verifying the (possibly repointed)
    /// foreign keys.
    pub fn update_dosage(&mut self, dosage: &Dosage) -> DbResult<()> {
        let tx = self.conn.transaction()?;

        check_references(&tx, &dosage.medication_id, &dosage.patient_id)?;

        let rows_affected = tx.execute(
            r#"
            UPDATE dosages SET
                medication_id = ?2,
                patient_id = ?3,
                dosage_amount = ?4,
                dosage_time = ?5,
                administered_by = ?6,
                notes = ?7,
                updated_at = ?8
            WHERE id = ?1
            "#,
            params![
                dosage.id,
                dosage.medication_id,
                dosage.patient_id,
                dosage.dosage_amount,
                dosage.dosage_time.format(TIME_FORMAT).to_string(),
                dosage.administered_by,
                dosage.notes,
                dosage.updated_at,
            ],
        )?;
        if rows_affected == 0 {
            return Err(DbError::NotFound(format!("dosage '{}' not found", dosage.id)));
        }

        tx.commit()?;
        Ok(())
    }

    /// Get a dosage by ID.
    pub fn get_dosage(&self, id: &str) -> DbResult<Option<Dosage>> {
        self.conn
            .query_row(
                r#"
                SELECT id, medication_id, patient_id, dosage_amount, dosage_time,
                       administered_by, notes, created_at, updated_at
                FROM dosages
                WHERE id = ?
                "#,
                [id],
                map_dosage_row,
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// List all dosages in creation order.
    pub fn list_dosages(&self) -> DbResult<Vec<Dosage>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, medication_id, patient_id, dosage_amount, dosage_time,
                   administered_by, notes, created_at, updated_at
            FROM dosages
            ORDER BY created_at, id
            "#,
        )?;

        let rows = stmt.query_map([], map_dosage_row)?;
        let mut dosages = Vec::new();
        for row in rows {
            dosages.push(row?.try_into()?);
        }
        Ok(dosages)
    }

    /// Delete a dosage.
    pub fn delete_dosage(&self, id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM dosages WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }
}

/// Verify both foreign keys inside the caller's transaction.
fn check_references(tx: &Transaction<'_>, medication_id: &str, patient_id: &str) -> DbResult<()> {
    let med_exists: Option<i64> = tx
        .query_row(
            "SELECT 1 FROM medications WHERE id = ?",
            [medication_id],
            |row| row.get(0),
        )
        .optional()?;
    if med_exists.is_none() {
        return Err(DbError::NotFound(format!(
            "medication '{}' not found",
            medication_id
        )));
    }

    let patient_exists: Option<i64> = tx
        .query_row(
            "SELECT 1 FROM patients WHERE id = ?",
            [patient_id],
            |row| row.get(0),
        )
        .optional()?;
    if patient_exists.is_none() {
        return Err(DbError::NotFound(format!(
            "patient '{}' not found",
            patient_id
        )));
    }

    Ok(())
}

/// Intermediate row struct for database mapping.
struct DosageRow {
    id: String,
    medication_id: String,
    patient_id: String,
    dosage_amount: f64,
    dosage_time: String,
    administered_by: String,
    notes: Option<String>,
    created_at: String,
    updated_at: String,
}

fn map_dosage_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<DosageRow> {
    Ok(DosageRow {
        id: row.get(0)?,
        medication_id: row.get(1)?,
        patient_id: row.get(2)?,
        dosage_amount: row.get(3)?,
        dosage_time: row.get(4)?,
        administered_by: row.get(5)?,
        notes: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

impl TryFrom<DosageRow> for Dosage {
    type Error = DbError;

    fn try_from(row: DosageRow) -> Result<Self, Self::Error> {
        let dosage_time = NaiveDateTime::parse_from_str(&row.dosage_time, TIME_FORMAT)
            .map_err(|e| {
                DbError::Constraint(format!("invalid dosage_time '{}': {}", row.dosage_time, e))
            })?;

        Ok(Dosage {
            id: row.id,
            medication_id: row.medication_id,
            patient_id: row.patient_id,
            dosage_amount: row.dosage_amount,
            dosage_time,
            administered_by: row.administered_by,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
