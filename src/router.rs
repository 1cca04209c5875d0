use std::collections::HashMap;
use std::io::Read;
use std::sync::Arc;

use astra::Request;
use chrono::{Duration, Local};

use crate::db::connection::Database;
use crate::db::orders;
use crate::domain::order::OrderInput;
use crate::errors::AppError;
use crate::mailer::Mailer;
use crate::notifier::{self, NotifyOutcome};
use crate::responses::{html_response, redirect_response, ResultResp};
use crate::templates::pages::add_order::add_order_page;
use crate::templates::pages::notify_result::notify_result_page;
use crate::templates::pages::orders::{orders_page, OrdersVm};

/// Shared handler context: the database handle plus the mail transport.
#[derive(Clone)]
pub struct App {
    pub db: Database,
    pub mailer: Arc<dyn Mailer + Send + Sync>,
}

pub fn handle(mut req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => {
            let status = parse_query(&req).remove("status");
            let orders = orders::list_orders(&app.db)?;
            html_response(orders_page(&OrdersVm {
                orders: &orders,
                status: status_message(status.as_deref()),
            }))
        }

        ("GET", "/orders/new") => {
            let today = Local::now().date_naive();
            html_response(add_order_page(today, today + Duration::days(7)))
        }

        ("POST", "/orders") => {
            let form = parse_form(&mut req)?;
            let input = OrderInput {
                customer_name: field(&form, "customer_name"),
                address: field(&form, "address"),
                purchase_date: field(&form, "purchase_date"),
                planned_delivery_date: field(&form, "planned_delivery_date"),
                model: field(&form, "model"),
                notes: field(&form, "notes"),
            };
            orders::insert_order(&app.db, &input)?;
            redirect_response("/?status=added")
        }

        ("POST", "/orders/delete") => {
            let form = parse_form(&mut req)?;
            let ids: Vec<i64> = form
                .iter()
                .filter(|(k, _)| k == "id")
                .filter_map(|(_, v)| v.parse().ok())
                .collect();
            orders::delete_orders(&app.db, &ids)?;
            redirect_response("/?status=deleted")
        }

        // Manual notifier trigger; both outcomes get reported to the user.
        ("POST", "/notify") => {
            let today = Local::now().date_naive();
            match notifier::send_due_reminders(&app.db, app.mailer.as_ref(), today)? {
                NotifyOutcome::NothingDue => html_response(notify_result_page(
                    "No orders due in 2 days (or already notified).",
                )),
                NotifyOutcome::Sent { count } => html_response(notify_result_page(&format!(
                    "Notification email sent for {count} order(s); marked as notified."
                ))),
            }
        }

        _ => Err(AppError::NotFound),
    }
}

fn status_message(code: Option<&str>) -> Option<&'static str> {
    match code {
        Some("added") => Some("Order added"),
        Some("deleted") => Some("Deleted selected orders"),
        _ => None,
    }
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    let mut map = HashMap::new();

    if let Some(q) = req.uri().query() {
        for pair in q.split('&') {
            let mut parts = pair.splitn(2, '=');
            if let (Some(k), Some(v)) = (parts.next(), parts.next()) {
                map.insert(k.to_string(), v.to_string());
            }
        }
    }

    map
}

/// Decode an application/x-www-form-urlencoded body into key/value pairs.
/// Keys may repeat (the delete form posts one `id` per checked row).
fn parse_form(req: &mut Request) -> Result<Vec<(String, String)>, AppError> {
    let mut bytes = Vec::new();
    req.body_mut()
        .reader()
        .read_to_end(&mut bytes)
        .map_err(|e| AppError::Validation(format!("read form body failed: {e}")))?;

    Ok(url::form_urlencoded::parse(&bytes).into_owned().collect())
}

fn field(form: &[(String, String)], name: &str) -> String {
    form.iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.clone())
        .unwrap_or_default()
}
