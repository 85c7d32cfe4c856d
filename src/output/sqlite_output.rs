//! SQLite export
//!
//! Writes the provider table of a run to a SQLite database, replacing the
//! previous export.

use crate::output::traits::{Exporter, OutputError, OutputResult};
use crate::state::ProviderRecord;
use crate::storage::{Storage, StorageError};

/// Writes a result set through a storage backend
pub struct SqliteExporter<S: Storage> {
    storage: S,
    config_hash: String,
    pages_requested: u32,
}

impl<S: Storage> SqliteExporter<S> {
    pub fn new(storage: S, config_hash: impl Into<String>, pages_requested: u32) -> Self {
        Self {
            storage,
            config_hash: config_hash.into(),
            pages_requested,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl From<StorageError> for OutputError {
    fn from(err: StorageError) -> Self {
        OutputError::Storage(err.to_string())
    }
}

impl<S: Storage> Exporter for SqliteExporter<S> {
    fn export(&mut self, records: &[ProviderRecord]) -> OutputResult<()> {
        if let Err(e) = self
            .storage
            .write_export(&self.config_hash, self.pages_requested, records)
        {
            tracing::warn!("SQLite export rolled back, previous export kept: {}", e);
            return Err(e.into());
        }
        Ok(())
    }

    fn destination(&self) -> String {
        "SQLite database".to_string()
    }
}
