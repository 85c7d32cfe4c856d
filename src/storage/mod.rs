//! Storage module for the SQLite export
//!
//! This module writes the provider table of a finished run to SQLite:
//! - Schema initialization
//! - Providers and their cities, in export order
//! - The hash and page budget of the configuration that produced them
//!
//! Each export replaces the previous one.

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStorage;
pub use traits::{Storage, StorageError, StorageResult};

use crate::ScoutError;

use std::path::Path;

/// Initializes or opens a storage database
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
///
/// # Returns
///
/// * `Ok(SqliteStorage)` - Successfully initialized storage
/// * `Err(ScoutError)` - Failed to initialize storage
pub fn open_storage(path: &Path) -> Result<SqliteStorage, ScoutError> {
    SqliteStorage::new(path)
}
