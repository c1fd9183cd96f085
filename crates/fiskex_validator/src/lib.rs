//! # Fiscal Export Validator
//!
//! Validation engine for fiscal export packages. This crate checks a set of
//! delimited text tables against the schemas their `index.xml` manifest
//! declares, producing an ordered report of human-readable findings instead
//! of failing on the first problem:
//!
//! - Structural checks (column count, header names and order)
//! - Content checks (numeric format with locale symbols, text length)
//! - Package orchestration over directories and ZIP archives
//!
//! Structural mismatches abort the affected table with a single finding;
//! content mismatches accumulate and scanning continues, so an auditor gets
//! the full list of violations from one pass.
//!
//! ## Example
//!
//! ```rust
//! use fiskex_validator::{FileMap, validate_files};
//!
//! let mut files = FileMap::new();
//! // An empty package has no manifest to validate against.
//! let report = validate_files(&files);
//! assert_eq!(report.diagnostics()[0].to_string(), "No index.xml found");
//!
//! files.insert("index.xml".to_string(), b"<DataSet><Version>1.0</Version></DataSet>".to_vec());
//! let report = validate_files(&files);
//! assert!(report.is_empty());
//! ```

mod error;
mod package;
mod pattern;
mod table;

pub use error::*;
pub use package::*;
pub use pattern::*;
pub use table::*;
