//! CSV export
//!
//! The table has an unnamed leading column holding the zero-based row index,
//! followed by the seven provider columns.

use crate::output::traits::{Exporter, OutputResult};
use crate::state::{ProviderRecord, COLUMNS};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes providers to a CSV file, replacing any previous content
#[derive(Debug, Clone)]
pub struct CsvExporter {
    path: PathBuf,
}

impl CsvExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Exporter for CsvExporter {
    fn export(&mut self, records: &[ProviderRecord]) -> OutputResult<()> {
        let file = File::create(&self.path)?;
        write_csv(records, file)
    }

    fn destination(&self) -> String {
        self.path.display().to_string()
    }
}

/// Writes the provider table to any writer
pub fn write_csv<W: Write>(records: &[ProviderRecord], writer: W) -> OutputResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(std::iter::once("").chain(COLUMNS))?;
    for (index, record) in records.iter().enumerate() {
        csv_writer.write_record(std::iter::once(index.to_string()).chain(record.to_row()))?;
    }

    csv_writer.flush()?;
    Ok(())
}
