//! # Fiscal Export Writer
//!
//! Producer side of the fiscal export format: a [`Collection`] accumulates
//! typed records grouped by their table file and writes the delivery
//! artifact — a ZIP archive with one CSV entry per table, header row first,
//! records in insertion order.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use fiskex_core::{FieldDef, FieldKind, RecordBuilder, RecordSchema};
//! use fiskex_export::Collection;
//!
//! let schema = Arc::new(RecordSchema::new(
//!     "cash_per_currency.csv",
//!     vec![
//!         FieldDef::new("Z_KASSE_ID", FieldKind::Text).required(),
//!         FieldDef::new("ZAHLART_WAEH", FieldKind::Text),
//!     ],
//! ));
//!
//! let record = RecordBuilder::new(schema)
//!     .set("Z_KASSE_ID", "0").unwrap()
//!     .set("ZAHLART_WAEH", "EUR").unwrap()
//!     .build();
//!
//! let mut collection = Collection::new();
//! collection.add(record);
//!
//! let mut buffer = std::io::Cursor::new(Vec::new());
//! collection.write_to(&mut buffer).unwrap();
//! ```

mod collection;
mod error;

pub use collection::*;
pub use error::*;
