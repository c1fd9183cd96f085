//! Numeric pattern construction.
//!
//! A numeric cell must match a pattern derived from the table's locale
//! symbols and the column's declared decimal places: an optional minus
//! sign, then either plain digits or groups of exactly three separated by
//! the grouping symbol (leftmost group 1-3 digits), then — for columns
//! with decimal places — exactly one decimal symbol and exactly that many
//! digits. Construction is total; compiled patterns are cached per
//! `(decimal symbol, grouping symbol, places)` triple since many columns
//! share locale symbols.

use regex::Regex;
use std::collections::HashMap;

/// Builds the matching rule a numeric value must satisfy.
///
/// A column with zero decimal places carries no decimal symbol at all.
pub fn numeric_pattern(
    decimal_symbol: char,
    digit_grouping_symbol: char,
    decimal_places: u32,
) -> String {
    let grouping = regex::escape(&digit_grouping_symbol.to_string());
    let mut pattern = format!("-?([0-9]+|[0-9]{{1,3}}({grouping}[0-9]{{3}})*)");
    if decimal_places > 0 {
        let decimal = regex::escape(&decimal_symbol.to_string());
        pattern.push_str(&format!("[{decimal}][0-9]{{{decimal_places}}}"));
    }
    pattern
}

/// Returns true if the value fits an optional maximum character length.
///
/// Length is measured in characters, not bytes.
pub fn fits_max_length(value: &str, max_length: Option<usize>) -> bool {
    max_length.is_none_or(|max| value.chars().count() <= max)
}

/// Cache of compiled numeric patterns, shared across the tables of a run.
#[derive(Debug, Default)]
pub struct PatternBuilder {
    cache: HashMap<(char, char, u32), Regex>,
}

impl PatternBuilder {
    /// Creates an empty pattern cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the compiled, anchored pattern for the given locale symbols
    /// and decimal-place count, compiling it on first use.
    pub fn numeric(
        &mut self,
        decimal_symbol: char,
        digit_grouping_symbol: char,
        decimal_places: u32,
    ) -> &Regex {
        self.cache
            .entry((decimal_symbol, digit_grouping_symbol, decimal_places))
            .or_insert_with(|| {
                let pattern = format!(
                    "^{}$",
                    numeric_pattern(decimal_symbol, digit_grouping_symbol, decimal_places)
                );
                // The pattern is assembled from escaped fragments only.
                Regex::new(&pattern).expect("generated numeric pattern compiles")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn matches(value: &str, decimal: char, grouping: char, places: u32) -> bool {
        PatternBuilder::new()
            .numeric(decimal, grouping, places)
            .is_match(value)
    }

    #[test]
    fn test_plain_integer() {
        assert!(matches("0", ',', '.', 0));
        assert!(matches("1234", ',', '.', 0));
        assert!(matches("-1234", ',', '.', 0));
        assert!(!matches("", ',', '.', 0));
        assert!(!matches("12a4", ',', '.', 0));
    }

    #[test]
    fn test_grouped_integer() {
        assert!(matches("1.234", ',', '.', 0));
        assert!(matches("12.345.678", ',', '.', 0));
        assert!(!matches("12.34", ',', '.', 0));
        assert!(!matches("1.2345", ',', '.', 0));
    }

    #[test]
    fn test_decimal_places_required_exactly() {
        assert!(matches("1.234,00", ',', '.', 2));
        assert!(matches("-0,50", ',', '.', 2));
        assert!(!matches("1234", ',', '.', 2));
        assert!(!matches("1234,0", ',', '.', 2));
        assert!(!matches("1234,000", ',', '.', 2));
    }

    #[test]
    fn test_zero_places_rejects_decimal_symbol() {
        assert!(!matches("1,00", ',', '.', 0));
        assert!(!matches("1,", ',', '.', 0));
    }

    #[test]
    fn test_anglo_locale() {
        // decimal point, comma grouping
        assert!(matches("1,234.00", '.', ',', 2));
        assert!(!matches("12,34", '.', ',', 0));
        assert!(!matches("12,3", '.', ',', 2));
    }

    #[test]
    fn test_pattern_string_shape() {
        assert_eq!(
            numeric_pattern(',', '.', 0),
            r"-?([0-9]+|[0-9]{1,3}(\.[0-9]{3})*)"
        );
        assert_eq!(
            numeric_pattern(',', '.', 2),
            r"-?([0-9]+|[0-9]{1,3}(\.[0-9]{3})*)[,][0-9]{2}"
        );
    }

    #[test]
    fn test_fits_max_length_counts_characters() {
        assert!(fits_max_length("abc", Some(3)));
        assert!(!fits_max_length("abcd", Some(3)));
        assert!(fits_max_length("anything at all", None));
        // Umlauts are two bytes but one character.
        assert!(fits_max_length("äöü", Some(3)));
    }

    #[test]
    fn test_cache_reuses_compiled_patterns() {
        let mut builder = PatternBuilder::new();
        let first = builder.numeric(',', '.', 2).as_str().to_string();
        let second = builder.numeric(',', '.', 2).as_str().to_string();
        assert_eq!(first, second);
    }
}
