//! # Fiscal Export Core
//!
//! Core data structures and types for the fiscal export toolkit.
//!
//! This crate provides the fundamental building blocks shared by the
//! validation engine and the export producer: the typed manifest model
//! describing a package's table schemas, the diagnostic/report types that
//! carry validation findings, and the typed field model used to build
//! records for export.
//!
//! ## Key Concepts
//!
//! - **Manifest**: the parsed `index.xml` declaration of a package
//! - **TableDeclaration**: one table's schema — encoding, delimiters, columns
//! - **Diagnostic / Report**: human-readable validation findings, collected
//!   in discovery order and never deduplicated
//! - **FieldDef / Record**: the producer-side typed field model with
//!   fail-fast coercion to canonical strings
//!
//! ## Example
//!
//! ```rust
//! use fiskex_core::{ColumnDeclaration, TableDeclarationBuilder};
//!
//! let table = TableDeclarationBuilder::new("transactions.csv")
//!     .column(ColumnDeclaration::alphanumeric("BON_ID", Some(40)))
//!     .column(ColumnDeclaration::numeric("UMS_BRUTTO", 2))
//!     .build();
//!
//! assert_eq!(table.columns.len(), 2);
//! assert!(table.encoding_utf8);
//! ```

pub mod builder;
pub mod diagnostic;
pub mod error;
pub mod fields;
pub mod manifest;
pub mod record;

pub use builder::*;
pub use diagnostic::*;
pub use error::*;
pub use fields::*;
pub use manifest::*;
pub use record::*;
