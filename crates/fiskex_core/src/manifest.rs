//! Manifest model for a fiscal export package.
//!
//! This module contains the typed representation of the `index.xml`
//! manifest: the format version and the ordered list of table declarations
//! describing encoding, delimiter syntax and columns of each data file.
//! Instances are constructed once by the manifest parser and are read-only
//! for the remainder of a run.

use serde::Serialize;

/// File name of the manifest inside a package.
pub const MANIFEST_NAME: &str = "index.xml";

/// The only manifest format version the engine processes.
pub const SUPPORTED_VERSION: &str = "1.0";

/// A parsed package manifest.
///
/// Processing requires `version == "1.0"`; any other value aborts the run
/// with a single diagnostic before any table is touched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Manifest {
    /// Declared format version
    pub version: String,

    /// Table declarations in document order
    pub tables: Vec<TableDeclaration>,
}

impl Manifest {
    /// Returns true if the declared version is the supported one.
    pub fn is_supported_version(&self) -> bool {
        self.version == SUPPORTED_VERSION
    }
}

/// Schema declaration for one table of the package.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableDeclaration {
    /// Name by which the data file is located in the package
    pub url: String,

    /// Whether the table carries the UTF8 encoding marker
    pub encoding_utf8: bool,

    /// Locale decimal symbol used by numeric columns
    pub decimal_symbol: char,

    /// Locale digit-grouping symbol used by numeric columns
    pub digit_grouping_symbol: char,

    /// Declared first data row, 1-based; defaults to 1 when absent
    pub range_start: u64,

    /// Line separator of the underlying delimited file
    pub record_delimiter: String,

    /// Field separator of the underlying delimited file
    pub column_delimiter: char,

    /// Quote character for fields containing delimiter or quote
    pub text_encapsulator: char,

    /// True if the table declares a fixed-length (positional) layout
    pub is_fixed_length: bool,

    /// True if the table declares a primary key
    pub has_primary_key: bool,

    /// Column declarations in physical file order
    pub columns: Vec<ColumnDeclaration>,
}

/// One column of a table declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDeclaration {
    /// Expected literal header text in row 1 of the data file
    pub name: String,

    /// Declared value type
    pub kind: ColumnKind,
}

impl ColumnDeclaration {
    /// Declares a numeric column with a fixed number of decimal places.
    pub fn numeric(name: impl Into<String>, decimal_places: u32) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Numeric { decimal_places },
        }
    }

    /// Declares a text column with an optional maximum character length.
    pub fn alphanumeric(name: impl Into<String>, max_length: Option<usize>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::AlphaNumeric { max_length },
        }
    }

    /// Declares a date column. Date columns are rejected by the validator.
    pub fn date(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Date,
        }
    }
}

/// Declared type of a column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ColumnKind {
    /// Decimal value with a fixed number of decimal places
    Numeric {
        /// Exact number of digits after the decimal symbol
        decimal_places: u32,
    },

    /// Text value with an optional maximum length in characters
    AlphaNumeric {
        /// Maximum character count, unbounded when absent
        max_length: Option<usize>,
    },

    /// Date value; declared but not validated
    Date,
}
