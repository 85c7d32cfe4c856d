//! Output module for exporting results and reporting statistics
//!
//! # Components
//!
//! - `CsvExporter`: the provider table as a CSV file
//! - `SqliteExporter`: the provider table appended to the run history
//! - `CrawlStats`: run counters and their printed report

mod csv_output;
mod sqlite_output;
pub mod stats;
mod traits;

pub use csv_output::{write_csv, CsvExporter};
pub use sqlite_output::SqliteExporter;
pub use stats::{print_statistics, CrawlStats};
pub use traits::{Exporter, OutputError, OutputResult};
