//! Error types for table validation.

use thiserror::Error;

/// Terminal findings that stop validation of one table.
///
/// Each variant surfaces as exactly one table-scoped diagnostic; once any
/// of them occurs, no further finding in that table can be trusted, so the
/// engine moves on to the next table. Content findings (bad numeric
/// format, overlong text) are not errors — they accumulate in the report
/// while scanning continues.
#[derive(Debug, Error)]
pub enum TableError {
    /// Data does not start at row 2, making header validation ambiguous
    #[error(
        "Range is != [2, End], this is not technically invalid but prevents column header validation."
    )]
    UnsupportedRange,

    /// Table declares a fixed-length (positional) layout
    #[error("Fixed length validation is currently not supported.")]
    FixedLength,

    /// Table declares a primary key
    #[error("Primary key validation is currently not supported.")]
    PrimaryKey,

    /// Table declares a date-typed column
    #[error("Date validation currently not supported")]
    Date,

    /// Column delimiter or text encapsulator is outside the ASCII range
    #[error("Column delimiter and text encapsulator must be ASCII characters")]
    NonAsciiDelimiter,

    /// A row's field count does not match the declared column count
    #[error("Line {line}: Row has {actual} fields but index.xml defines {expected} fields.")]
    FieldCount {
        /// 1-based line number
        line: usize,
        /// Fields found in the row
        actual: usize,
        /// Columns the manifest declares
        expected: usize,
    },

    /// A header field does not match the declared column name
    #[error("Expected column {column} to be {expected}, but headline is {actual}.")]
    HeaderMismatch {
        /// 1-based column index
        column: usize,
        /// Declared column name
        expected: String,
        /// Header text found in the file
        actual: String,
    },

    /// The delimited reader could not decode a row
    #[error("{0}")]
    Csv(#[from] csv::Error),
}
