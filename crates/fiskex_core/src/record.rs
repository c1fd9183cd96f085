//! Record schemas and the record builder.
//!
//! A [`RecordSchema`] names the table file a record belongs to and lists
//! its fields in CSV column order. Records are built through a
//! [`RecordBuilder`] that coerces every assignment immediately; a built
//! [`Record`] is a read-only mapping from field name to canonical string.

use std::collections::HashMap;
use std::sync::Arc;

use crate::{FieldDef, FieldError, FieldValue};

/// Field layout of one export table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    /// File name the table's records are written to
    pub filename: String,

    /// Fields in CSV column order
    pub fields: Vec<FieldDef>,
}

impl RecordSchema {
    /// Creates a schema for the table stored under `filename`.
    pub fn new(filename: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self {
            filename: filename.into(),
            fields,
        }
    }

    /// Looks up a field declaration by name.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Field names in column order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}

/// Builder assembling one record, coercing values at assignment time.
#[derive(Debug)]
pub struct RecordBuilder {
    schema: Arc<RecordSchema>,
    values: HashMap<String, String>,
}

impl RecordBuilder {
    /// Creates a builder for one record of the given schema.
    pub fn new(schema: Arc<RecordSchema>) -> Self {
        Self {
            schema,
            values: HashMap::new(),
        }
    }

    /// Assigns a field, coercing the value to its canonical string.
    ///
    /// Rejects unknown fields and type mismatches immediately.
    pub fn set(mut self, name: &str, value: impl Into<FieldValue>) -> Result<Self, FieldError> {
        let field = self
            .schema
            .field(name)
            .ok_or_else(|| FieldError::unknown_field(name, &self.schema.filename))?;
        let canonical = field.coerce(value.into())?;
        self.values.insert(name.to_string(), canonical);
        Ok(self)
    }

    /// Finishes the record, filling unset fields with their defaults.
    pub fn build(mut self) -> Record {
        for field in &self.schema.fields {
            if !self.values.contains_key(&field.name) {
                self.values.insert(field.name.clone(), field.initial());
            }
        }
        Record {
            schema: self.schema,
            values: self.values,
        }
    }
}

/// One finished export record with canonical string values.
#[derive(Debug, Clone)]
pub struct Record {
    schema: Arc<RecordSchema>,
    values: HashMap<String, String>,
}

impl Record {
    /// The schema this record was built against.
    pub fn schema(&self) -> &Arc<RecordSchema> {
        &self.schema
    }

    /// File name the record is written to.
    pub fn filename(&self) -> &str {
        &self.schema.filename
    }

    /// Canonical value of a field, if the schema declares it.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Values in the schema's column order.
    pub fn values_in_order(&self) -> Vec<&str> {
        self.schema
            .fields
            .iter()
            .map(|f| self.values[&f.name].as_str())
            .collect()
    }
}
