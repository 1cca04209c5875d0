use chrono::{Duration, NaiveDate};

use crate::db::connection::Database;
use crate::db::orders;
use crate::domain::order::DueOrder;
use crate::errors::AppError;
use crate::mailer::Mailer;

/// Days of notice before a planned delivery.
const REMINDER_WINDOW_DAYS: i64 = 2;

/// Result of one reminder pass.
#[derive(Debug, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// No unnotified orders due on the target date.
    NothingDue,
    /// One digest went out covering this many orders, now marked.
    Sent { count: usize },
}

/// Run one reminder pass: select orders due in two days that were never
/// notified, send a single digest for the batch, then flip their flags.
///
/// The mark runs only after the send returns Ok. A send failure leaves
/// every flag untouched, so the same batch is selected again next run.
pub fn send_due_reminders(
    db: &Database,
    mailer: &dyn Mailer,
    today: NaiveDate,
) -> Result<NotifyOutcome, AppError> {
    let target = today + Duration::days(REMINDER_WINDOW_DAYS);

    let due = orders::due_for_reminder(db, target)?;
    if due.is_empty() {
        return Ok(NotifyOutcome::NothingDue);
    }

    let (subject, body) = compose_digest(target, &due);
    mailer
        .send(&subject, &body)
        .map_err(|e| AppError::Transport(format!("send reminder digest failed: {e}")))?;

    let ids: Vec<i64> = due.iter().map(|o| o.id).collect();
    orders::mark_notified(db, &ids)?;

    Ok(NotifyOutcome::Sent { count: due.len() })
}

/// One deterministic subject/body pair for the whole batch, in query
/// order.
pub fn compose_digest(target: NaiveDate, due: &[DueOrder]) -> (String, String) {
    let subject = format!(
        "OrderReminder: {} order(s) due in 2 days ({})",
        due.len(),
        target.format("%Y-%m-%d")
    );

    let mut lines = vec![
        "You have the following order(s) due in 2 days:".to_string(),
        String::new(),
    ];
    for o in due {
        lines.push(format!(
            "- #{}: {} for {} (planned delivery {})",
            o.id,
            o.model,
            o.customer_name,
            o.planned_delivery_date.format("%Y-%m-%d")
        ));
    }
    lines.push(String::new());
    lines.push("This is an automated reminder from OrderReminder.".to_string());

    (subject, lines.join("\n"))
}
