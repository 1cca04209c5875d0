// errors.rs
use std::fmt;

/// Errors originating from user input, the local store, or the mail
/// transport. Routing misses get their own variant so the surface can
/// map them to a 404.
#[derive(Debug)]
pub enum AppError {
    NotFound,
    Validation(String),
    Storage(String),
    Transport(String),
    Config(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound => write!(f, "Not Found"),
            AppError::Validation(msg) => write!(f, "Validation Error: {msg}"),
            AppError::Storage(msg) => write!(f, "Storage Error: {msg}"),
            AppError::Transport(msg) => write!(f, "Transport Error: {msg}"),
            AppError::Config(msg) => write!(f, "Config Error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}
