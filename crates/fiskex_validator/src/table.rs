//! Streaming validation of one delimited table.
//!
//! The validator makes a single forward pass over the file: structural
//! preconditions first, then the header row, then every data row. Memory
//! use is constant in the file size; the compiled numeric patterns are the
//! only reusable state.

use csv::{ReaderBuilder, StringRecord, Terminator};
use fiskex_core::{ColumnKind, Diagnostic, Report, TableDeclaration};

use crate::{PatternBuilder, TableError, fits_max_length};

/// Validates a single delimited text source against one table declaration.
///
/// Terminal findings are returned as [`TableError`]; content findings are
/// appended to the report and scanning continues.
pub struct TableValidator<'a> {
    declaration: &'a TableDeclaration,
    patterns: &'a mut PatternBuilder,
}

impl<'a> TableValidator<'a> {
    /// Creates a validator for one table, sharing the run's pattern cache.
    pub fn new(declaration: &'a TableDeclaration, patterns: &'a mut PatternBuilder) -> Self {
        Self {
            declaration,
            patterns,
        }
    }

    /// Streams the table content, appending content findings to `report`.
    ///
    /// Returns `Err` on the first terminal finding; the caller converts it
    /// into the table's single diagnostic.
    pub fn validate(&mut self, content: &str, report: &mut Report) -> Result<(), TableError> {
        self.check_preconditions()?;

        let mut reader = self.reader(content);
        let mut record = StringRecord::new();
        let mut line = 0;
        while reader.read_record(&mut record)? {
            line += 1;
            let expected = self.declaration.columns.len();
            if record.len() != expected {
                return Err(TableError::FieldCount {
                    line,
                    actual: record.len(),
                    expected,
                });
            }
            if line == 1 {
                self.check_header(&record)?;
            } else {
                self.check_row(line, &record, report)?;
            }
        }
        Ok(())
    }

    /// Structural preconditions that make per-row validation meaningless.
    fn check_preconditions(&self) -> Result<(), TableError> {
        let declaration = self.declaration;

        // Row 1 must be the header for column identity to be certain.
        if declaration.range_start != 2 {
            return Err(TableError::UnsupportedRange);
        }
        if declaration.is_fixed_length {
            return Err(TableError::FixedLength);
        }
        if declaration.has_primary_key {
            return Err(TableError::PrimaryKey);
        }
        if declaration
            .columns
            .iter()
            .any(|c| c.kind == ColumnKind::Date)
        {
            return Err(TableError::Date);
        }
        if !declaration.column_delimiter.is_ascii() || !declaration.text_encapsulator.is_ascii() {
            return Err(TableError::NonAsciiDelimiter);
        }
        Ok(())
    }

    fn reader<'c>(&self, content: &'c str) -> csv::Reader<&'c [u8]> {
        let declaration = self.declaration;
        let mut builder = ReaderBuilder::new();
        builder
            .has_headers(false)
            .flexible(true)
            .delimiter(declaration.column_delimiter as u8)
            .quote(declaration.text_encapsulator as u8);
        // CRLF and LF line endings are covered by the default terminator;
        // any other single-byte record delimiter is honored as declared.
        let delimiter = declaration.record_delimiter.as_bytes();
        if delimiter.len() == 1 && !matches!(delimiter[0], b'\r' | b'\n') {
            builder.terminator(Terminator::Any(delimiter[0]));
        }
        builder.from_reader(content.as_bytes())
    }

    /// Compares header fields verbatim, position for position.
    fn check_header(&self, record: &StringRecord) -> Result<(), TableError> {
        for (index, column) in self.declaration.columns.iter().enumerate() {
            let actual = &record[index];
            if actual != column.name {
                return Err(TableError::HeaderMismatch {
                    column: index + 1,
                    expected: column.name.clone(),
                    actual: actual.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Applies each column's typed rule to one data row.
    fn check_row(
        &mut self,
        line: usize,
        record: &StringRecord,
        report: &mut Report,
    ) -> Result<(), TableError> {
        for (index, column) in self.declaration.columns.iter().enumerate() {
            let value = &record[index];
            match column.kind {
                ColumnKind::Numeric { decimal_places } => {
                    // It's unclear if empty strings are allowed in numeric
                    // fields; they are accepted here.
                    if value.is_empty() {
                        continue;
                    }
                    let pattern = self.patterns.numeric(
                        self.declaration.decimal_symbol,
                        self.declaration.digit_grouping_symbol,
                        decimal_places,
                    );
                    if !pattern.is_match(value) {
                        report.push(Diagnostic::table(
                            &self.declaration.url,
                            format!(
                                "Line {}: Value {} in column {} is not a valid decimal with {} places",
                                line,
                                value,
                                index + 1,
                                decimal_places
                            ),
                        ));
                    }
                }
                ColumnKind::AlphaNumeric {
                    max_length: Some(max),
                } => {
                    if !fits_max_length(value, Some(max)) {
                        report.push(Diagnostic::table(
                            &self.declaration.url,
                            format!(
                                "Line {}: Value {:?} in column {} is not allowed to have more than {} characters",
                                line,
                                value,
                                index + 1,
                                max
                            ),
                        ));
                    }
                }
                ColumnKind::AlphaNumeric { max_length: None } => {}
                // Unreachable after the precondition check; kept so a date
                // column can never slip through as silently valid.
                ColumnKind::Date => return Err(TableError::Date),
            }
        }
        Ok(())
    }
}
