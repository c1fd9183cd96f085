//! Builder pattern for table declarations.
//!
//! This module provides an ergonomic builder for constructing
//! [`TableDeclaration`]s with the domain's customary defaults, used by
//! tests and by programmatic manifest construction.

use crate::{ColumnDeclaration, TableDeclaration};

/// Builder for creating a [`TableDeclaration`].
///
/// Defaults follow the common shape of fiscal exports: UTF-8 encoding,
/// `,` decimal symbol, `.` digit grouping, CRLF record delimiter, `;`
/// column delimiter, `"` text encapsulator and data starting at row 2.
///
/// # Example
///
/// ```rust
/// use fiskex_core::{ColumnDeclaration, TableDeclarationBuilder};
///
/// let table = TableDeclarationBuilder::new("cash_per_currency.csv")
///     .column(ColumnDeclaration::alphanumeric("ZAHLART_WAEH", Some(3)))
///     .column(ColumnDeclaration::numeric("ZAHLART_BETRAG_WAEH", 2))
///     .build();
/// ```
#[derive(Debug)]
pub struct TableDeclarationBuilder {
    url: String,
    encoding_utf8: bool,
    decimal_symbol: char,
    digit_grouping_symbol: char,
    range_start: u64,
    record_delimiter: String,
    column_delimiter: char,
    text_encapsulator: char,
    is_fixed_length: bool,
    has_primary_key: bool,
    columns: Vec<ColumnDeclaration>,
}

impl TableDeclarationBuilder {
    /// Creates a new builder for the table stored under `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            encoding_utf8: true,
            decimal_symbol: ',',
            digit_grouping_symbol: '.',
            range_start: 2,
            record_delimiter: "\r\n".to_string(),
            column_delimiter: ';',
            text_encapsulator: '"',
            is_fixed_length: false,
            has_primary_key: false,
            columns: Vec::new(),
        }
    }

    /// Sets whether the table carries the UTF8 marker.
    pub fn encoding_utf8(mut self, utf8: bool) -> Self {
        self.encoding_utf8 = utf8;
        self
    }

    /// Sets the locale decimal symbol.
    pub fn decimal_symbol(mut self, symbol: char) -> Self {
        self.decimal_symbol = symbol;
        self
    }

    /// Sets the locale digit-grouping symbol.
    pub fn digit_grouping_symbol(mut self, symbol: char) -> Self {
        self.digit_grouping_symbol = symbol;
        self
    }

    /// Sets the declared first data row (1-based).
    pub fn range_start(mut self, row: u64) -> Self {
        self.range_start = row;
        self
    }

    /// Sets the record delimiter.
    pub fn record_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.record_delimiter = delimiter.into();
        self
    }

    /// Sets the column delimiter.
    pub fn column_delimiter(mut self, delimiter: char) -> Self {
        self.column_delimiter = delimiter;
        self
    }

    /// Sets the text encapsulator.
    pub fn text_encapsulator(mut self, encapsulator: char) -> Self {
        self.text_encapsulator = encapsulator;
        self
    }

    /// Marks the table as fixed-length.
    pub fn fixed_length(mut self, fixed: bool) -> Self {
        self.is_fixed_length = fixed;
        self
    }

    /// Marks the table as declaring a primary key.
    pub fn primary_key(mut self, primary_key: bool) -> Self {
        self.has_primary_key = primary_key;
        self
    }

    /// Adds a column to the declaration.
    pub fn column(mut self, column: ColumnDeclaration) -> Self {
        self.columns.push(column);
        self
    }

    /// Adds multiple columns to the declaration.
    pub fn columns(mut self, columns: Vec<ColumnDeclaration>) -> Self {
        self.columns.extend(columns);
        self
    }

    /// Builds the declaration.
    pub fn build(self) -> TableDeclaration {
        TableDeclaration {
            url: self.url,
            encoding_utf8: self.encoding_utf8,
            decimal_symbol: self.decimal_symbol,
            digit_grouping_symbol: self.digit_grouping_symbol,
            range_start: self.range_start,
            record_delimiter: self.record_delimiter,
            column_delimiter: self.column_delimiter,
            text_encapsulator: self.text_encapsulator,
            is_fixed_length: self.is_fixed_length,
            has_primary_key: self.has_primary_key,
            columns: self.columns,
        }
    }
}
