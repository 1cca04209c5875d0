use chrono::NaiveDate;
use rusqlite::{params, params_from_iter};

use crate::db::connection::Database;
use crate::domain::order::{self, DueOrder, Order, OrderInput};
use crate::errors::AppError;

const ORDER_COLUMNS: &str = "id, customer_name, address, purchase_date, \
     planned_delivery_date, model, notes, notified_two_days, created_at";

fn placeholders(n: usize) -> String {
    std::iter::repeat("?")
        .take(n)
        .collect::<Vec<_>>()
        .join(", ")
}

fn row_to_order(row: &rusqlite::Row) -> rusqlite::Result<Order> {
    Ok(Order {
        id: row.get(0)?,
        customer_name: row.get(1)?,
        address: row.get(2)?,
        purchase_date: row.get(3)?,
        planned_delivery_date: row.get(4)?,
        model: row.get(5)?,
        notes: row.get(6)?,
        notified_two_days: row.get(7)?,
        created_at: row.get(8)?,
    })
}

/// Full snapshot of the table, soonest delivery first, ids breaking ties.
pub fn list_orders(db: &Database) -> Result<Vec<Order>, AppError> {
    db.with_conn(|conn| {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {ORDER_COLUMNS} FROM orders \
                 ORDER BY date(planned_delivery_date) ASC, id ASC"
            ))
            .map_err(|e| AppError::Storage(format!("list orders failed: {e}")))?;

        let rows = stmt
            .query_map([], row_to_order)
            .map_err(|e| AppError::Storage(format!("list orders failed: {e}")))?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r.map_err(|e| AppError::Storage(format!("list orders failed: {e}")))?);
        }
        Ok(out)
    })
}

/// Validate first, then write; a validation failure leaves the table
/// untouched. Returns the stored row with its generated id and defaults.
pub fn insert_order(db: &Database, input: &OrderInput) -> Result<Order, AppError> {
    let new_order = order::validate(input)?;

    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO orders (
                customer_name, address, purchase_date, planned_delivery_date, model, notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                new_order.customer_name,
                new_order.address,
                new_order.purchase_date,
                new_order.planned_delivery_date,
                new_order.model,
                new_order.notes,
            ],
        )
        .map_err(|e| AppError::Storage(format!("insert order failed: {e}")))?;

        let id = conn.last_insert_rowid();
        conn.query_row(
            &format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1"),
            params![id],
            row_to_order,
        )
        .map_err(|e| AppError::Storage(format!("read back order {id} failed: {e}")))
    })
}

/// Remove all matching rows; ids with no row are no-ops. Returns how many
/// rows actually went away.
pub fn delete_orders(db: &Database, ids: &[i64]) -> Result<usize, AppError> {
    if ids.is_empty() {
        return Ok(0);
    }

    db.with_conn(|conn| {
        let sql = format!(
            "DELETE FROM orders WHERE id IN ({})",
            placeholders(ids.len())
        );
        conn.execute(&sql, params_from_iter(ids.iter()))
            .map_err(|e| AppError::Storage(format!("delete orders failed: {e}")))
    })
}

/// Flip the notified flag for exactly the given ids. Re-marking an
/// already-notified order is harmless; nothing ever clears the flag.
pub fn mark_notified(db: &Database, ids: &[i64]) -> Result<(), AppError> {
    if ids.is_empty() {
        return Ok(());
    }

    db.with_conn(|conn| {
        let sql = format!(
            "UPDATE orders SET notified_two_days = 1 WHERE id IN ({})",
            placeholders(ids.len())
        );
        conn.execute(&sql, params_from_iter(ids.iter()))
            .map_err(|e| AppError::Storage(format!("mark notified failed: {e}")))?;
        Ok(())
    })
}

/// Orders delivering on the target date that were never covered by a
/// digest, in id order.
pub fn due_for_reminder(db: &Database, target: NaiveDate) -> Result<Vec<DueOrder>, AppError> {
    db.with_conn(|conn| {
        let mut stmt = conn
            .prepare(
                "SELECT id, customer_name, model, planned_delivery_date
                 FROM orders
                 WHERE planned_delivery_date = ?1 AND notified_two_days = 0
                 ORDER BY id ASC",
            )
            .map_err(|e| AppError::Storage(format!("due query failed: {e}")))?;

        let rows = stmt
            .query_map(params![target], |row| {
                Ok(DueOrder {
                    id: row.get(0)?,
                    customer_name: row.get(1)?,
                    model: row.get(2)?,
                    planned_delivery_date: row.get(3)?,
                })
            })
            .map_err(|e| AppError::Storage(format!("due query failed: {e}")))?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r.map_err(|e| AppError::Storage(format!("due query failed: {e}")))?);
        }
        Ok(out)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::ensure_schema;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn make_test_db() -> Database {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let db = Database::new(std::env::temp_dir().join(format!("orders_test_{nanos}.sqlite")));
        ensure_schema(&db).expect("schema init failed");
        db
    }

    fn input(customer: &str, purchase: &str, planned: &str, model: &str) -> OrderInput {
        OrderInput {
            customer_name: customer.to_string(),
            purchase_date: purchase.to_string(),
            planned_delivery_date: planned.to_string(),
            model: model.to_string(),
            ..OrderInput::default()
        }
    }

    #[test]
    fn insert_then_list_roundtrip() {
        let db = make_test_db();

        let inserted = insert_order(&db, &input("Alice", "2024-01-01", "2024-01-10", "X1"))
            .expect("insert failed");
        assert!(inserted.id > 0);
        assert!(!inserted.notified_two_days);

        let listed = list_orders(&db).expect("list failed");
        assert_eq!(listed.len(), 1);

        let got = &listed[0];
        assert_eq!(got.id, inserted.id);
        assert_eq!(got.customer_name, "Alice");
        assert_eq!(got.model, "X1");
        assert_eq!(got.purchase_date.to_string(), "2024-01-01");
        assert_eq!(got.planned_delivery_date.to_string(), "2024-01-10");
        assert_eq!(got.address, None);
        assert_eq!(got.notes, None);
        assert!(!got.notified_two_days);
    }

    #[test]
    fn listing_sorts_by_delivery_date_then_id() {
        let db = make_test_db();

        let late = insert_order(&db, &input("Cara", "2024-01-01", "2024-03-01", "X3")).unwrap();
        let early_a = insert_order(&db, &input("Alice", "2024-01-01", "2024-02-01", "X1")).unwrap();
        let early_b = insert_order(&db, &input("Bob", "2024-01-01", "2024-02-01", "X2")).unwrap();

        // Fresh unique ids in insertion order.
        assert!(late.id < early_a.id && early_a.id < early_b.id);

        let ids: Vec<i64> = list_orders(&db).unwrap().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![early_a.id, early_b.id, late.id]);
    }

    #[test]
    fn validation_failure_writes_nothing() {
        let db = make_test_db();

        let err = insert_order(&db, &input("Bob", "not-a-date", "2024-01-10", "X1")).unwrap_err();
        match err {
            AppError::Validation(_) => {}
            other => panic!("expected validation error, got {other:?}"),
        }

        assert!(list_orders(&db).unwrap().is_empty());
    }

    #[test]
    fn delete_removes_exactly_given_ids_and_ignores_unknown() {
        let db = make_test_db();

        let a = insert_order(&db, &input("Alice", "2024-01-01", "2024-01-10", "X1")).unwrap();
        let b = insert_order(&db, &input("Bob", "2024-01-01", "2024-01-11", "X2")).unwrap();

        let removed = delete_orders(&db, &[a.id, 99_999]).expect("delete failed");
        assert_eq!(removed, 1);

        let remaining = list_orders(&db).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, b.id);

        // Deleting nothing that exists is still fine.
        assert_eq!(delete_orders(&db, &[99_999]).unwrap(), 0);
    }

    #[test]
    fn mark_notified_is_scoped_and_idempotent() {
        let db = make_test_db();

        let a = insert_order(&db, &input("Alice", "2024-01-01", "2024-01-10", "X1")).unwrap();
        let b = insert_order(&db, &input("Bob", "2024-01-01", "2024-01-10", "X2")).unwrap();

        mark_notified(&db, &[a.id]).expect("mark failed");
        mark_notified(&db, &[a.id]).expect("re-mark failed");

        let listed = list_orders(&db).unwrap();
        let flag_of = |id: i64| listed.iter().find(|o| o.id == id).unwrap().notified_two_days;
        assert!(flag_of(a.id));
        assert!(!flag_of(b.id));
    }

    #[test]
    fn due_for_reminder_filters_date_and_flag() {
        let db = make_test_db();
        let target = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();

        let due = insert_order(&db, &input("Alice", "2024-05-01", "2024-05-03", "X1")).unwrap();
        let wrong_day = insert_order(&db, &input("Bob", "2024-05-01", "2024-05-04", "X2")).unwrap();
        let already = insert_order(&db, &input("Cara", "2024-05-01", "2024-05-03", "X3")).unwrap();
        mark_notified(&db, &[already.id]).unwrap();

        let rows = due_for_reminder(&db, target).expect("due query failed");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, due.id);
        assert_eq!(rows[0].customer_name, "Alice");
        assert!(rows.iter().all(|r| r.id != wrong_day.id && r.id != already.id));
    }
}
