//! Typed field model for export records.
//!
//! Each field of a table schema is described by a [`FieldDef`]: a name,
//! a declared kind and a coercion from a raw [`FieldValue`] to the
//! canonical string stored in a record. Coercion fails fast on type
//! mismatches at assignment time; reading an unset field yields the
//! kind's initialized default.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::FieldError;

/// Declared kind of an export field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free-form text, stored verbatim
    Text,

    /// Decimal value quantized to a fixed number of places, half-up
    Numeric {
        /// Digits after the decimal point in the canonical form
        places: u32,
    },

    /// Calendar date, stored as `YYYY-MM-DD`
    Date,

    /// Timezone-aware datetime stored as local wall time without offset
    LocalDateTime,

    /// Timezone-aware datetime stored in UTC with millisecond precision
    IsoDateTime,
}

impl FieldKind {
    /// Name of the kind, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Numeric { .. } => "decimal",
            FieldKind::Date => "date",
            FieldKind::LocalDateTime | FieldKind::IsoDateTime => "datetime",
        }
    }
}

/// A raw value assigned to a field before coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Text value
    Text(String),
    /// Decimal value
    Number(Decimal),
    /// Integer value, accepted wherever a decimal is
    Int(i64),
    /// Calendar date
    Date(NaiveDate),
    /// Timezone-aware datetime
    DateTime(DateTime<FixedOffset>),
    /// Datetime without timezone information; rejected by datetime fields
    NaiveDateTime(NaiveDateTime),
}

impl FieldValue {
    /// Name of the value's type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Number(_) => "decimal",
            FieldValue::Int(_) => "int",
            FieldValue::Date(_) => "date",
            FieldValue::DateTime(_) => "datetime",
            FieldValue::NaiveDateTime(_) => "naive datetime",
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<Decimal> for FieldValue {
    fn from(d: Decimal) -> Self {
        FieldValue::Number(d)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(d: NaiveDate) -> Self {
        FieldValue::Date(d)
    }
}

impl From<DateTime<FixedOffset>> for FieldValue {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        FieldValue::DateTime(dt)
    }
}

/// Declaration of one export field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Field name, also the CSV header text
    pub name: String,

    /// Whether the producing system must assign the field
    pub required: bool,

    /// Declared kind driving coercion and defaults
    pub kind: FieldKind,
}

impl FieldDef {
    /// Creates an optional field of the given kind.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            required: false,
            kind,
        }
    }

    /// Marks the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Coerces a raw value into the canonical string stored in a record.
    ///
    /// Fails immediately on a type mismatch so a producing system learns
    /// about a bad assignment at write time, not at export time.
    pub fn coerce(&self, value: FieldValue) -> Result<String, FieldError> {
        match (self.kind, value) {
            (FieldKind::Text, FieldValue::Text(s)) => Ok(s),

            (FieldKind::Numeric { places }, FieldValue::Number(d)) => {
                Ok(quantize(d, places))
            }
            (FieldKind::Numeric { places }, FieldValue::Int(i)) => {
                Ok(quantize(Decimal::from(i), places))
            }

            (FieldKind::Date, FieldValue::Date(d)) => Ok(d.format("%Y-%m-%d").to_string()),

            (FieldKind::LocalDateTime, FieldValue::DateTime(dt)) => {
                Ok(dt.format("%Y-%m-%dT%H:%M:%S").to_string())
            }
            (FieldKind::IsoDateTime, FieldValue::DateTime(dt)) => Ok(dt
                .with_timezone(&Utc)
                .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                .to_string()),

            (
                FieldKind::LocalDateTime | FieldKind::IsoDateTime,
                FieldValue::NaiveDateTime(_),
            ) => Err(FieldError::NaiveDateTime(self.name.clone())),

            (_, value) => Err(FieldError::type_mismatch(
                &self.name,
                self.kind.type_name(),
                value.type_name(),
            )),
        }
    }

    /// The canonical string an unset field reads back as.
    pub fn initial(&self) -> String {
        match self.kind {
            FieldKind::Numeric { places } => quantize(Decimal::ZERO, places),
            _ => String::new(),
        }
    }
}

/// Rounds half-up to exactly `places` decimal digits.
fn quantize(value: Decimal, places: u32) -> String {
    let rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", places as usize, rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_text_passthrough() {
        let field = FieldDef::new("ZAHLART_WAEH", FieldKind::Text);
        assert_eq!(field.coerce("EUR".into()).unwrap(), "EUR");
    }

    #[test]
    fn test_numeric_quantization_half_up() {
        let field = FieldDef::new("UMS_BRUTTO", FieldKind::Numeric { places: 2 });
        assert_eq!(field.coerce(dec("123.23").into()).unwrap(), "123.23");
        assert_eq!(field.coerce(dec("1.005").into()).unwrap(), "1.01");
        assert_eq!(field.coerce(dec("-1.005").into()).unwrap(), "-1.01");
        assert_eq!(field.coerce(FieldValue::Int(7)).unwrap(), "7.00");
    }

    #[test]
    fn test_numeric_zero_places() {
        let field = FieldDef::new("Z_NR", FieldKind::Numeric { places: 0 });
        assert_eq!(field.coerce(FieldValue::Int(1)).unwrap(), "1");
        assert_eq!(field.coerce(dec("2.6").into()).unwrap(), "3");
    }

    #[test]
    fn test_numeric_rejects_text() {
        let field = FieldDef::new("Z_NR", FieldKind::Numeric { places: 0 });
        let err = field.coerce("1".into()).unwrap_err();
        assert!(matches!(err, FieldError::TypeMismatch { .. }));
    }

    #[test]
    fn test_date_format() {
        let field = FieldDef::new("Z_DATUM", FieldKind::Date);
        let date = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        assert_eq!(field.coerce(date.into()).unwrap(), "2024-03-31");
    }

    #[test]
    fn test_local_datetime_keeps_wall_time() {
        let field = FieldDef::new("Z_ERSTELLUNG", FieldKind::LocalDateTime);
        let offset = FixedOffset::east_opt(3600).unwrap();
        let dt = offset.with_ymd_and_hms(2024, 3, 31, 23, 59, 30).unwrap();
        assert_eq!(field.coerce(dt.into()).unwrap(), "2024-03-31T23:59:30");
    }

    #[test]
    fn test_iso_datetime_converts_to_utc() {
        let field = FieldDef::new("BON_START", FieldKind::IsoDateTime);
        let offset = FixedOffset::east_opt(3600).unwrap();
        let dt = offset.with_ymd_and_hms(2024, 3, 31, 23, 59, 30).unwrap();
        assert_eq!(field.coerce(dt.into()).unwrap(), "2024-03-31T22:59:30.000Z");
    }

    #[test]
    fn test_naive_datetime_rejected() {
        let field = FieldDef::new("BON_START", FieldKind::IsoDateTime);
        let naive = NaiveDate::from_ymd_opt(2024, 3, 31)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let err = field.coerce(FieldValue::NaiveDateTime(naive)).unwrap_err();
        assert!(matches!(err, FieldError::NaiveDateTime(_)));
    }

    #[test]
    fn test_initial_values() {
        assert_eq!(
            FieldDef::new("UMS_BRUTTO", FieldKind::Numeric { places: 2 }).initial(),
            "0.00"
        );
        assert_eq!(
            FieldDef::new("Z_NR", FieldKind::Numeric { places: 0 }).initial(),
            "0"
        );
        assert_eq!(FieldDef::new("BON_ID", FieldKind::Text).initial(), "");
    }
}
