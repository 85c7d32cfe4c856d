//! State module for the data accumulated during a run
//!
//! # Components
//!
//! - `ProviderRecord`: structured data of one provider profile
//! - `ResultSet`: ordered, name-deduplicated accumulation of records

mod provider;
mod result_set;

// Re-export main types
pub use provider::{ProviderRecord, CITY_SEPARATOR, COLUMNS};
pub use result_set::ResultSet;
