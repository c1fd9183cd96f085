//! Record collection and archive writing.

use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;

use fiskex_core::Record;
use tracing::debug;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::Result;

/// Accumulates export records grouped by their table file.
///
/// Tables appear in the archive in first-seen order; records keep their
/// insertion order within a table.
#[derive(Debug, Default)]
pub struct Collection {
    tables: Vec<(String, Vec<Record>)>,
}

impl Collection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record to its table's group.
    pub fn add(&mut self, record: Record) {
        let filename = record.filename().to_string();
        match self.tables.iter_mut().find(|(name, _)| *name == filename) {
            Some((_, records)) => records.push(record),
            None => self.tables.push((filename, vec![record])),
        }
    }

    /// Number of records across all tables.
    pub fn len(&self) -> usize {
        self.tables.iter().map(|(_, records)| records.len()).sum()
    }

    /// Returns true if no record has been added yet.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Writes the delivery archive to a file.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        self.write_to(file)
    }

    /// Writes the delivery archive to any seekable writer.
    ///
    /// Each table becomes one CSV entry: header row from the schema's
    /// field names, then one row per record with canonical values.
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut archive = ZipWriter::new(writer);
        let options = SimpleFileOptions::default();

        for (filename, records) in &self.tables {
            debug!(table = %filename, records = records.len(), "writing table");
            let mut csv = csv::Writer::from_writer(Vec::new());
            let schema = records[0].schema();
            csv.write_record(schema.field_names())?;
            for record in records {
                csv.write_record(record.values_in_order())?;
            }
            let bytes = csv
                .into_inner()
                .map_err(|e| std::io::Error::other(e.to_string()))?;

            archive.start_file(filename.as_str(), options)?;
            archive.write_all(&bytes)?;
        }

        archive.finish()?;
        Ok(())
    }
}
