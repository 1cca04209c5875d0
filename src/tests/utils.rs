use std::time::{SystemTime, UNIX_EPOCH};

use crate::db::connection::Database;
use crate::db::schema::ensure_schema;

/// Initialize a fresh test DB with the production schema
pub fn init_test_db() -> Database {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let db = Database::new(
        std::env::temp_dir().join(format!("order_reminder_test_{nanos}.sqlite")),
    );

    if let Err(e) = ensure_schema(&db) {
        panic!("Database initialization failed: {e}");
    }

    db
}
