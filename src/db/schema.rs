// src/db/schema.rs

use std::fs;
use std::path::PathBuf;

use rusqlite::Connection;

use crate::db::connection::Database;
use crate::errors::AppError;

/// Canonical column set for the `orders` table. Compared
/// order-insensitively; anything else on disk counts as schema drift.
pub const EXPECTED_COLUMNS: &[&str] = &[
    "id",
    "customer_name",
    "address",
    "purchase_date",
    "planned_delivery_date",
    "model",
    "notes",
    "notified_two_days",
    "created_at",
];

const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

/// What `ensure_schema` did to the database.
#[derive(Debug)]
pub enum SchemaOutcome {
    /// No table existed; created fresh.
    Created,
    /// Table already matches the canonical columns.
    Unchanged,
    /// Columns drifted: file backed up, table dropped and recreated empty.
    Rebuilt { backup: PathBuf },
}

/// Idempotent startup check. Creates the data directory and the table if
/// missing; on schema drift copies the file to a timestamped backup and
/// recreates the table empty. No column-by-column data migration is
/// attempted, so the backup is the only way back.
pub fn ensure_schema(db: &Database) -> Result<SchemaOutcome, AppError> {
    if let Some(dir) = db.path().parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)
                .map_err(|e| AppError::Storage(format!("Create data dir failed: {e}")))?;
        }
    }

    db.with_conn(|conn| {
        let mut found = table_columns(conn, "orders")?;
        if found.is_empty() {
            apply_schema(conn)?;
            return Ok(SchemaOutcome::Created);
        }

        found.sort_unstable();
        let mut expected: Vec<&str> = EXPECTED_COLUMNS.to_vec();
        expected.sort_unstable();
        if found == expected {
            return Ok(SchemaOutcome::Unchanged);
        }

        let backup = backup_database(db)?;
        conn.execute("DROP TABLE IF EXISTS orders", [])
            .map_err(|e| AppError::Storage(format!("Drop orders failed: {e}")))?;
        apply_schema(conn)?;
        Ok(SchemaOutcome::Rebuilt { backup })
    })
}

/// Column names of a table, empty when the table does not exist.
fn table_columns(conn: &Connection, table: &str) -> Result<Vec<String>, AppError> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table})"))
        .map_err(|e| AppError::Storage(format!("table_info failed: {e}")))?;

    let rows = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .map_err(|e| AppError::Storage(format!("table_info failed: {e}")))?;

    let mut cols = Vec::new();
    for r in rows {
        cols.push(r.map_err(|e| AppError::Storage(format!("table_info failed: {e}")))?);
    }
    Ok(cols)
}

fn apply_schema(conn: &Connection) -> Result<(), AppError> {
    conn.execute_batch(SCHEMA_SQL)
        .map_err(|e| AppError::Storage(format!("Apply schema failed: {e}")))
}

/// Copy the database file to a timestamped sibling before the rebuild.
fn backup_database(db: &Database) -> Result<PathBuf, AppError> {
    let ts = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let backup = db.path().with_file_name(format!("orders_backup_{ts}.db"));

    fs::copy(db.path(), &backup).map_err(|e| {
        AppError::Storage(format!("Backup to {} failed: {e}", backup.display()))
    })?;
    Ok(backup)
}
