//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::state::ProviderRecord;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
pub trait Storage {
    /// Replaces the stored provider table with `records`
    ///
    /// # Arguments
    ///
    /// * `config_hash` - Hash of the configuration the run used
    /// * `pages_requested` - Listing page budget of the run
    /// * `records` - Accepted providers in first-seen order
    ///
    /// Either the whole export is stored or the previous one is left intact.
    fn write_export(
        &mut self,
        config_hash: &str,
        pages_requested: u32,
        records: &[ProviderRecord],
    ) -> StorageResult<()>;
}
