use chrono::{NaiveDate, NaiveDateTime};

use crate::errors::AppError;

/// One row of the `orders` table.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: i64,
    pub customer_name: String,
    pub address: Option<String>,
    pub purchase_date: NaiveDate,
    pub planned_delivery_date: NaiveDate,
    pub model: String,
    pub notes: Option<String>,
    pub notified_two_days: bool,
    pub created_at: NaiveDateTime,
}

/// Raw field values as collected from the add-order form.
#[derive(Debug, Default)]
pub struct OrderInput {
    pub customer_name: String,
    pub address: String,
    pub purchase_date: String,
    pub planned_delivery_date: String,
    pub model: String,
    pub notes: String,
}

/// A validated order, ready to insert.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_name: String,
    pub address: Option<String>,
    pub purchase_date: NaiveDate,
    pub planned_delivery_date: NaiveDate,
    pub model: String,
    pub notes: Option<String>,
}

/// Slim row for the reminder digest.
#[derive(Debug, Clone)]
pub struct DueOrder {
    pub id: i64,
    pub customer_name: String,
    pub model: String,
    pub planned_delivery_date: NaiveDate,
}

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Check required fields and date shapes before anything is written.
/// Blank optional fields collapse to NULL.
pub fn validate(input: &OrderInput) -> Result<NewOrder, AppError> {
    let customer_name = input.customer_name.trim();
    if customer_name.is_empty() {
        return Err(AppError::Validation("customer name is required".into()));
    }

    let model = input.model.trim();
    if model.is_empty() {
        return Err(AppError::Validation("model is required".into()));
    }

    let purchase_date = parse_date("purchase date", &input.purchase_date)?;
    let planned_delivery_date =
        parse_date("planned delivery date", &input.planned_delivery_date)?;

    let address = input.address.trim();
    let notes = input.notes.trim();

    Ok(NewOrder {
        customer_name: customer_name.to_string(),
        address: (!address.is_empty()).then(|| address.to_string()),
        purchase_date,
        planned_delivery_date,
        model: model.to_string(),
        notes: (!notes.is_empty()).then(|| notes.to_string()),
    })
}

fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| AppError::Validation(format!("{field} must be YYYY-MM-DD, got '{raw}'")))
}
