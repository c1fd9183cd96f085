//! Validation findings and the aggregate report.
//!
//! A [`Diagnostic`] is one human-readable validation finding; a [`Report`]
//! is the ordered, append-only sequence of findings produced by a run.
//! An empty report is the sole success signal.

use serde::Serialize;
use std::fmt;

/// A single validation finding.
///
/// Diagnostics are immutable once created. The `scope` names the table or
/// file the finding belongs to; run-level findings whose message already
/// identifies the subject carry an empty scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Table/file identifier the finding belongs to, empty for run-level findings
    pub scope: String,

    /// Human-readable description, with 1-based line/column numbers where applicable
    pub message: String,
}

impl Diagnostic {
    /// Creates a run-level diagnostic with no scope.
    pub fn package(message: impl Into<String>) -> Self {
        Self {
            scope: String::new(),
            message: message.into(),
        }
    }

    /// Creates a diagnostic scoped to one table file.
    pub fn table(scope: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scope.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.scope, self.message)
        }
    }
}

/// Ordered, append-only collection of diagnostics for one validation run.
///
/// Findings are kept in discovery order (manifest table order, then
/// row/column order within a table) and are never deduplicated.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    diagnostics: Vec<Diagnostic>,
}

impl Report {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a finding to the report.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Returns true if the run produced no findings.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Number of findings collected so far.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// The findings in discovery order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Iterates over the findings in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }
}

impl IntoIterator for Report {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_package_diagnostic_displays_bare_message() {
        let d = Diagnostic::package("No index.xml found");
        assert_eq!(d.to_string(), "No index.xml found");
    }

    #[test]
    fn test_table_diagnostic_displays_scope_prefix() {
        let d = Diagnostic::table(
            "transactions.csv",
            "Fixed length validation is currently not supported.",
        );
        assert_eq!(
            d.to_string(),
            "transactions.csv: Fixed length validation is currently not supported."
        );
    }

    #[test]
    fn test_report_preserves_order() {
        let mut report = Report::new();
        report.push(Diagnostic::package("first"));
        report.push(Diagnostic::table("a.csv", "second"));
        report.push(Diagnostic::table("a.csv", "second"));

        let messages: Vec<_> = report.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second", "second"]);
        assert_eq!(report.len(), 3);
        assert!(!report.is_empty());
    }
}
