use std::net::SocketAddr;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use astra::Server;
use chrono::Local;

use crate::config::AppConfig;
use crate::db::connection::Database;
use crate::db::schema::{ensure_schema, SchemaOutcome};
use crate::mailer::SmtpMailer;
use crate::notifier::NotifyOutcome;
use crate::responses::error_to_response;
use crate::router::{handle, App};

mod config;
mod db;
mod domain;
mod errors;
mod mailer;
mod notifier;
mod responses;
mod router;
mod templates;

#[cfg(test)]
mod tests;

/// Delay before the automatic post-startup reminder pass.
const STARTUP_NOTIFY_DELAY: Duration = Duration::from_millis(1500);

fn main() {
    let config = match AppConfig::load("config.json") {
        Ok(c) => c,
        Err(e) => {
            eprintln!("❌ Failed to load config.json: {e}");
            std::process::exit(1);
        }
    };

    let db = Database::new(config.db_path());

    match ensure_schema(&db) {
        Ok(SchemaOutcome::Created) => println!("✅ Created fresh orders table"),
        Ok(SchemaOutcome::Unchanged) => {}
        Ok(SchemaOutcome::Rebuilt { backup }) => {
            println!("Schema drift: backed up old database to {}", backup.display());
        }
        Err(e) => {
            eprintln!("❌ Database initialization failed: {e}");
            std::process::exit(1);
        }
    }

    let mailer = match SmtpMailer::new(&config.smtp) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("❌ Mailer setup failed: {e}");
            std::process::exit(1);
        }
    };

    let app = App {
        db,
        mailer: Arc::new(mailer),
    };

    // Automatic reminder pass shortly after startup. Silent: the empty
    // case says nothing and failures only reach stderr, unlike the
    // manual trigger.
    {
        let app = app.clone();
        thread::spawn(move || {
            thread::sleep(STARTUP_NOTIFY_DELAY);
            let today = Local::now().date_naive();
            match notifier::send_due_reminders(&app.db, app.mailer.as_ref(), today) {
                Ok(NotifyOutcome::Sent { count }) => {
                    println!("Sent startup reminder digest for {count} order(s)");
                }
                Ok(NotifyOutcome::NothingDue) => {}
                Err(e) => eprintln!("Startup reminder check failed: {e}"),
            }
        });
    }

    let addr: SocketAddr = match config.bind.parse() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("❌ Invalid bind address '{}': {e}", config.bind);
            std::process::exit(1);
        }
    };
    println!("Starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(8);

    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    });

    if let Err(e) = result {
        eprintln!("Server ended with error: {e}");
    }

    println!("Server shut down cleanly.");
}
