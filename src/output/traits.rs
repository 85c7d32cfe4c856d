//! Exporter traits and error types
//!
//! This module defines the trait every export target implements and the
//! errors they can raise.

use crate::state::ProviderRecord;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination of a finished run's providers
pub trait Exporter {
    /// Writes `records` in order; the position is the row index
    fn export(&mut self, records: &[ProviderRecord]) -> OutputResult<()>;

    /// Human-readable name of the destination
    fn destination(&self) -> String;
}
