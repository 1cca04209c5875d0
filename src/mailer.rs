// src/mailer.rs

use std::fmt;
use std::time::Duration;

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::config::SmtpConfig;

#[derive(Debug)]
pub enum MailerError {
    InvalidAddress(String),
    BuildFailed(String),
    SendFailed(String),
}

impl fmt::Display for MailerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MailerError::InvalidAddress(msg) => write!(f, "Invalid address: {msg}"),
            MailerError::BuildFailed(msg) => write!(f, "Message build failed: {msg}"),
            MailerError::SendFailed(msg) => write!(f, "Send failed: {msg}"),
        }
    }
}

impl std::error::Error for MailerError {}

/// Anything that can deliver a digest. The notifier only sees this seam,
/// so tests can substitute a recording fake.
pub trait Mailer {
    fn send(&self, subject: &str, body: &str) -> Result<(), MailerError>;
}

/// Plain-text mail over submission SMTP: STARTTLS upgrade, login auth,
/// fixed sender and recipient list, bounded send timeout. lettre encodes
/// non-ASCII header and body text, so international names survive servers
/// without SMTPUTF8.
pub struct SmtpMailer {
    transport: SmtpTransport,
    from: String,
    recipients: Vec<String>,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, MailerError> {
        if config.recipients.is_empty() {
            return Err(MailerError::InvalidAddress(
                "no recipients configured".to_string(),
            ));
        }

        let transport = SmtpTransport::starttls_relay(&config.host)
            .map_err(|e| MailerError::SendFailed(format!("relay {} failed: {e}", config.host)))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        Ok(Self {
            transport,
            from: config.from.clone(),
            recipients: config.recipients.clone(),
        })
    }
}

impl Mailer for SmtpMailer {
    fn send(&self, subject: &str, body: &str) -> Result<(), MailerError> {
        let from = self
            .from
            .parse()
            .map_err(|e| MailerError::InvalidAddress(format!("from '{}': {e}", self.from)))?;

        let mut builder = Message::builder()
            .from(from)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN);

        for recipient in &self.recipients {
            let to = recipient
                .parse()
                .map_err(|e| MailerError::InvalidAddress(format!("recipient '{recipient}': {e}")))?;
            builder = builder.to(to);
        }

        let email = builder
            .body(body.to_string())
            .map_err(|e| MailerError::BuildFailed(e.to_string()))?;

        self.transport
            .send(&email)
            .map_err(|e| MailerError::SendFailed(e.to_string()))?;
        Ok(())
    }
}
