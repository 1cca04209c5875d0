use rusqlite::Connection;
use std::path::{Path, PathBuf};

use crate::errors::AppError;

/// Handle to the SQLite file. Every `with_conn` call opens its own
/// connection and drops it when the closure returns, on success and on
/// error alike.
#[derive(Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Provides a scoped mutable connection to the closure.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut Connection) -> Result<T, AppError>,
    {
        let mut conn = Connection::open(&self.path)
            .map_err(|e| AppError::Storage(format!("Open DB failed: {e}")))?;
        f(&mut conn)
    }
}
