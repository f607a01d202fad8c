//! Medication database operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::Medication;

impl Database {
    /// Insert a new medication.
    pub fn insert_medication(&self, med: &Medication) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO medications (
                id, name, description, current_stock, threshold,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                med.id,
                med.name,
                med.description,
                med.current_stock,
                med.threshold,
                med.created_at,
                med.updated_at,
            ],
        )?;
        Ok(())
    }

    /// Update an existing medication.
    pub fn update_medication(&self, med: &Medication) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE medications SET
                name = ?2,
                description = ?3,
                current_stock = ?4,
                threshold = ?5,
                updated_at = ?6
            WHERE id = ?1
            "#,
            params![
                med.id,
                med.name,
                med.description,
                med.current_stock,
                med.threshold,
                med.updated_at,
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Get a medication by ID.
    pub fn get_medication(&self, id: &str) -> DbResult<Option<Medication>> {
        self.conn
            .query_row(
                r#"
                SELECT id, name, description, current_stock, threshold,
                       created_at, updated_at
                FROM medications
                WHERE id = ?
                "#,
                [id],
                map_medication_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all medications in creation order.
    pub fn list_medications(&self) -> DbResult<Vec<Medication>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, name, description, current_stock, threshold,
                   created_at, updated_at
            FROM medications
            ORDER BY created_at, id
            "#,
        )?;

        let rows = stmt.query_map([], map_medication_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Delete a medication. Blocked while dosage records reference it.
    pub fn delete_medication(&mut self, id: &str) -> DbResult<()> {
        let tx = self.conn.transaction()?;

        let dependents: i64 = tx.query_row(
            "SELECT COUNT(*) FROM dosages WHERE medication_id = ?",
            [id],
            |row| row.get(0),
        )?;
        if dependents > 0 {
            return Err(DbError::Constraint(format!(
                "medication '{}' has {} dosage record(s) and cannot be deleted",
                id, dependents
            )));
        }

        let rows_affected = tx.execute("DELETE FROM medications WHERE id = ?", [id])?;
        if rows_affected == 0 {
            return Err(DbError::NotFound(format!("medication '{}' not found", id)));
        }

        tx.commit()?;
        Ok(())
    }
}

fn map_medication_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Medication> {
    Ok(Medication {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        current_stock: row.get(3)?,
        threshold: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}
