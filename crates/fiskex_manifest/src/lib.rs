//! Parser for the `index.xml` manifest of a fiscal export package.
//!
//! This module turns the manifest document into the strongly-typed
//! [`Manifest`] structure. Parsing is pure: it touches nothing beyond the
//! given string and leaves all layout decisions (fixed-length rejection,
//! range checks, column typing) to the validation engine.
//!
//! # Example
//!
//! ```rust
//! use fiskex_manifest::parse;
//!
//! let xml = r#"
//! <DataSet>
//!   <Version>1.0</Version>
//!   <Media>
//!     <Table>
//!       <URL>transactions.csv</URL>
//!       <UTF8/>
//!       <DecimalSymbol>,</DecimalSymbol>
//!       <DigitGroupingSymbol>.</DigitGroupingSymbol>
//!       <Range><From>2</From></Range>
//!       <VariableLength>
//!         <RecordDelimiter>&#13;&#10;</RecordDelimiter>
//!         <ColumnDelimiter>;</ColumnDelimiter>
//!         <TextEncapsulator>"</TextEncapsulator>
//!         <VariableColumn>
//!           <Name>BON_ID</Name>
//!           <AlphaNumeric><MaxLength>40</MaxLength></AlphaNumeric>
//!         </VariableColumn>
//!       </VariableLength>
//!     </Table>
//!   </Media>
//! </DataSet>
//! "#;
//!
//! let manifest = parse(xml).expect("well-formed manifest");
//! assert_eq!(manifest.tables.len(), 1);
//! assert_eq!(manifest.tables[0].url, "transactions.csv");
//! ```

use fiskex_core::{ColumnDeclaration, Manifest, TableDeclaration};
use roxmltree::{Document, Node};
use thiserror::Error;

/// Errors that can occur while parsing a manifest.
///
/// Every variant is fatal for the whole run: the manifest is the trust
/// anchor of a package, and a schema that cannot be read in full cannot
/// anchor any per-table validation.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Document is not well-formed XML
    #[error("index.xml is not well-formed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// Root element has no `Version` child
    #[error("index.xml has no Version element")]
    MissingVersion,

    /// Declared version is not the supported "1.0"
    #[error("index.xml version is not 1.0")]
    UnsupportedVersion(String),

    /// A table has no `URL` element
    #[error("Table {0} has no URL element")]
    MissingUrl(usize),

    /// A required element is absent from a table declaration
    #[error("Table \"{url}\": missing element {element}")]
    MissingElement {
        /// Table URL
        url: String,
        /// Element path relative to the table
        element: &'static str,
    },

    /// An element that must hold exactly one character holds something else
    #[error("Table \"{url}\": element {element} must be a single character")]
    NotSingleCharacter {
        /// Table URL
        url: String,
        /// Element path relative to the table
        element: &'static str,
    },

    /// An element that must hold an integer holds something else
    #[error("Table \"{url}\": element {element} is not a valid integer")]
    InvalidInteger {
        /// Table URL
        url: String,
        /// Element path relative to the table
        element: &'static str,
    },

    /// A column declares none of the recognized type elements
    #[error("Table \"{url}\": column \"{column}\" has no recognized type")]
    UnknownColumnType {
        /// Table URL
        url: String,
        /// Column name
        column: String,
    },
}

/// Result type alias for manifest parsing.
pub type Result<T> = std::result::Result<T, ManifestError>;

/// Parses a manifest document into the typed model.
///
/// Returns the manifest only when its version is the supported "1.0";
/// layout constraints the validator rejects per table (fixed length,
/// primary keys, date columns) are parsed into flags, not errors.
pub fn parse(content: &str) -> Result<Manifest> {
    let doc = Document::parse(content)?;
    let root = doc.root_element();

    let version = child_text(root, "Version")
        .ok_or(ManifestError::MissingVersion)?
        .to_string();

    let mut tables = Vec::new();
    for media in children_named(root, "Media") {
        for table in children_named(media, "Table") {
            tables.push(parse_table(table, tables.len() + 1)?);
        }
    }

    let manifest = Manifest { version, tables };
    if !manifest.is_supported_version() {
        return Err(ManifestError::UnsupportedVersion(manifest.version));
    }
    Ok(manifest)
}

fn parse_table(node: Node<'_, '_>, position: usize) -> Result<TableDeclaration> {
    let url = child_text(node, "URL")
        .ok_or(ManifestError::MissingUrl(position))?
        .to_string();

    let encoding_utf8 = has_child(node, "UTF8");
    let decimal_symbol = single_char(node, "DecimalSymbol", &url)?;
    let digit_grouping_symbol = single_char(node, "DigitGroupingSymbol", &url)?;
    let is_fixed_length = has_child(node, "FixedLength");

    let range_start = match child(node, "Range") {
        Some(range) => {
            let text = child_text(range, "From").ok_or_else(|| ManifestError::MissingElement {
                url: url.clone(),
                element: "Range/From",
            })?;
            text.parse().map_err(|_| ManifestError::InvalidInteger {
                url: url.clone(),
                element: "Range/From",
            })?
        }
        None => 1,
    };

    match child(node, "VariableLength") {
        Some(variable) => parse_variable_length(
            variable,
            url,
            encoding_utf8,
            decimal_symbol,
            digit_grouping_symbol,
            range_start,
        ),
        // A fixed-length table carries no delimiter syntax; the validator
        // rejects it before any of these defaults are consulted.
        None if is_fixed_length => Ok(TableDeclaration {
            url,
            encoding_utf8,
            decimal_symbol,
            digit_grouping_symbol,
            range_start,
            record_delimiter: "\r\n".to_string(),
            column_delimiter: ';',
            text_encapsulator: '"',
            is_fixed_length: true,
            has_primary_key: false,
            columns: Vec::new(),
        }),
        None => Err(ManifestError::MissingElement {
            url,
            element: "VariableLength",
        }),
    }
}

fn parse_variable_length(
    node: Node<'_, '_>,
    url: String,
    encoding_utf8: bool,
    decimal_symbol: char,
    digit_grouping_symbol: char,
    range_start: u64,
) -> Result<TableDeclaration> {
    let record_delimiter = child_text(node, "RecordDelimiter")
        .ok_or_else(|| ManifestError::MissingElement {
            url: url.clone(),
            element: "VariableLength/RecordDelimiter",
        })?
        .to_string();
    let column_delimiter = single_char(node, "ColumnDelimiter", &url)?;
    let text_encapsulator = single_char(node, "TextEncapsulator", &url)?;
    let has_primary_key = has_child(node, "VariablePrimaryKey");

    let mut columns = Vec::new();
    for column in children_named(node, "VariableColumn") {
        columns.push(parse_column(column, &url)?);
    }

    Ok(TableDeclaration {
        url,
        encoding_utf8,
        decimal_symbol,
        digit_grouping_symbol,
        range_start,
        record_delimiter,
        column_delimiter,
        text_encapsulator,
        is_fixed_length: false,
        has_primary_key,
        columns,
    })
}

fn parse_column(node: Node<'_, '_>, url: &str) -> Result<ColumnDeclaration> {
    let name = child_text(node, "Name")
        .ok_or_else(|| ManifestError::MissingElement {
            url: url.to_string(),
            element: "VariableColumn/Name",
        })?
        .to_string();

    if let Some(numeric) = child(node, "Numeric") {
        let decimal_places = match child_text(numeric, "Accuracy") {
            Some(text) => text.parse().map_err(|_| ManifestError::InvalidInteger {
                url: url.to_string(),
                element: "Numeric/Accuracy",
            })?,
            None => 0,
        };
        Ok(ColumnDeclaration::numeric(name, decimal_places))
    } else if let Some(alpha) = child(node, "AlphaNumeric") {
        let max_length = match child_text(alpha, "MaxLength") {
            Some(text) => Some(text.parse().map_err(|_| ManifestError::InvalidInteger {
                url: url.to_string(),
                element: "AlphaNumeric/MaxLength",
            })?),
            None => None,
        };
        Ok(ColumnDeclaration::alphanumeric(name, max_length))
    } else if has_child(node, "Date") {
        Ok(ColumnDeclaration::date(name))
    } else {
        Err(ManifestError::UnknownColumnType {
            url: url.to_string(),
            column: name,
        })
    }
}

fn children_named<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |n| n.has_tag_name(tag))
}

fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(tag))
}

fn has_child(node: Node<'_, '_>, tag: &str) -> bool {
    child(node, tag).is_some()
}

fn child_text<'a>(node: Node<'a, '_>, tag: &str) -> Option<&'a str> {
    child(node, tag).and_then(|n| n.text())
}

fn single_char(node: Node<'_, '_>, tag: &'static str, url: &str) -> Result<char> {
    let text = child_text(node, tag).ok_or_else(|| ManifestError::MissingElement {
        url: url.to_string(),
        element: tag,
    })?;
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ManifestError::NotSingleCharacter {
            url: url.to_string(),
            element: tag,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fiskex_core::ColumnKind;
    use pretty_assertions::assert_eq;

    const FULL_MANIFEST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<DataSet>
  <Version>1.0</Version>
  <DataSupplier>
    <Name>Demo POS</Name>
  </DataSupplier>
  <Media>
    <Name>DSFinV-K Export</Name>
    <Table>
      <URL>cash_per_currency.csv</URL>
      <Name>Z_Waehrungen</Name>
      <UTF8/>
      <DecimalSymbol>,</DecimalSymbol>
      <DigitGroupingSymbol>.</DigitGroupingSymbol>
      <Range><From>2</From></Range>
      <VariableLength>
        <RecordDelimiter>&#13;&#10;</RecordDelimiter>
        <ColumnDelimiter>;</ColumnDelimiter>
        <TextEncapsulator>"</TextEncapsulator>
        <VariableColumn>
          <Name>Z_KASSE_ID</Name>
          <AlphaNumeric><MaxLength>50</MaxLength></AlphaNumeric>
        </VariableColumn>
        <VariableColumn>
          <Name>Z_NR</Name>
          <Numeric/>
        </VariableColumn>
        <VariableColumn>
          <Name>ZAHLART_BETRAG_WAEH</Name>
          <Numeric><Accuracy>2</Accuracy></Numeric>
        </VariableColumn>
        <VariableColumn>
          <Name>KOMMENTAR</Name>
          <AlphaNumeric/>
        </VariableColumn>
      </VariableLength>
    </Table>
    <Table>
      <URL>transactions.csv</URL>
      <DecimalSymbol>,</DecimalSymbol>
      <DigitGroupingSymbol>.</DigitGroupingSymbol>
      <VariableLength>
        <RecordDelimiter>&#13;&#10;</RecordDelimiter>
        <ColumnDelimiter>;</ColumnDelimiter>
        <TextEncapsulator>"</TextEncapsulator>
        <VariablePrimaryKey>
          <Name>BON_ID</Name>
        </VariablePrimaryKey>
        <VariableColumn>
          <Name>BON_ID</Name>
          <AlphaNumeric><MaxLength>40</MaxLength></AlphaNumeric>
        </VariableColumn>
        <VariableColumn>
          <Name>BON_START</Name>
          <Date/>
        </VariableColumn>
      </VariableLength>
    </Table>
  </Media>
</DataSet>
"#;

    #[test]
    fn test_parse_full_manifest() {
        let manifest = parse(FULL_MANIFEST).expect("manifest should parse");

        assert_eq!(manifest.version, "1.0");
        assert_eq!(manifest.tables.len(), 2);

        let currency = &manifest.tables[0];
        assert_eq!(currency.url, "cash_per_currency.csv");
        assert!(currency.encoding_utf8);
        assert_eq!(currency.decimal_symbol, ',');
        assert_eq!(currency.digit_grouping_symbol, '.');
        assert_eq!(currency.range_start, 2);
        assert_eq!(currency.record_delimiter, "\r\n");
        assert_eq!(currency.column_delimiter, ';');
        assert_eq!(currency.text_encapsulator, '"');
        assert!(!currency.is_fixed_length);
        assert!(!currency.has_primary_key);

        let columns = &currency.columns;
        assert_eq!(columns.len(), 4);
        assert_eq!(columns[0].name, "Z_KASSE_ID");
        assert_eq!(
            columns[0].kind,
            ColumnKind::AlphaNumeric {
                max_length: Some(50)
            }
        );
        assert_eq!(columns[1].kind, ColumnKind::Numeric { decimal_places: 0 });
        assert_eq!(columns[2].kind, ColumnKind::Numeric { decimal_places: 2 });
        assert_eq!(
            columns[3].kind,
            ColumnKind::AlphaNumeric { max_length: None }
        );

        let transactions = &manifest.tables[1];
        assert!(!transactions.encoding_utf8);
        assert_eq!(transactions.range_start, 1);
        assert!(transactions.has_primary_key);
        assert_eq!(transactions.columns[1].kind, ColumnKind::Date);
    }

    #[test]
    fn test_version_mismatch_is_fatal() {
        let xml = FULL_MANIFEST.replace("<Version>1.0</Version>", "<Version>2.0</Version>");
        let err = parse(&xml).unwrap_err();
        assert!(matches!(err, ManifestError::UnsupportedVersion(v) if v == "2.0"));
        assert_eq!(
            parse(&xml).unwrap_err().to_string(),
            "index.xml version is not 1.0"
        );
    }

    #[test]
    fn test_missing_version() {
        let err = parse("<DataSet><Media/></DataSet>").unwrap_err();
        assert!(matches!(err, ManifestError::MissingVersion));
    }

    #[test]
    fn test_malformed_xml() {
        let err = parse("<DataSet><Version>1.0").unwrap_err();
        assert!(matches!(err, ManifestError::Xml(_)));
    }

    #[test]
    fn test_missing_url() {
        let xml = r#"
<DataSet>
  <Version>1.0</Version>
  <Media>
    <Table>
      <DecimalSymbol>,</DecimalSymbol>
      <DigitGroupingSymbol>.</DigitGroupingSymbol>
    </Table>
  </Media>
</DataSet>"#;
        let err = parse(xml).unwrap_err();
        assert!(matches!(err, ManifestError::MissingUrl(1)));
    }

    #[test]
    fn test_decimal_symbol_must_be_single_char() {
        let xml = FULL_MANIFEST.replace(
            "<DecimalSymbol>,</DecimalSymbol>",
            "<DecimalSymbol>,,</DecimalSymbol>",
        );
        let err = parse(&xml).unwrap_err();
        assert!(matches!(
            err,
            ManifestError::NotSingleCharacter {
                element: "DecimalSymbol",
                ..
            }
        ));
    }

    #[test]
    fn test_fixed_length_table_parses_without_variable_length() {
        let xml = r#"
<DataSet>
  <Version>1.0</Version>
  <Media>
    <Table>
      <URL>legacy.dat</URL>
      <UTF8/>
      <DecimalSymbol>,</DecimalSymbol>
      <DigitGroupingSymbol>.</DigitGroupingSymbol>
      <FixedLength>
        <Length>120</Length>
      </FixedLength>
    </Table>
  </Media>
</DataSet>"#;
        let manifest = parse(xml).expect("fixed-length table should parse");
        assert!(manifest.tables[0].is_fixed_length);
        assert!(manifest.tables[0].columns.is_empty());
    }

    #[test]
    fn test_column_without_type_is_rejected() {
        let xml = FULL_MANIFEST.replace("<Numeric/>", "");
        let err = parse(&xml).unwrap_err();
        assert!(matches!(
            err,
            ManifestError::UnknownColumnType { column, .. } if column == "Z_NR"
        ));
    }

    #[test]
    fn test_invalid_accuracy() {
        let xml = FULL_MANIFEST.replace("<Accuracy>2</Accuracy>", "<Accuracy>two</Accuracy>");
        let err = parse(&xml).unwrap_err();
        assert!(matches!(
            err,
            ManifestError::InvalidInteger {
                element: "Numeric/Accuracy",
                ..
            }
        ));
    }

    #[test]
    fn test_tables_across_multiple_media() {
        let xml = r#"
<DataSet>
  <Version>1.0</Version>
  <Media>
    <Table>
      <URL>a.csv</URL>
      <UTF8/>
      <DecimalSymbol>,</DecimalSymbol>
      <DigitGroupingSymbol>.</DigitGroupingSymbol>
      <VariableLength>
        <RecordDelimiter>&#13;&#10;</RecordDelimiter>
        <ColumnDelimiter>;</ColumnDelimiter>
        <TextEncapsulator>"</TextEncapsulator>
        <VariableColumn><Name>A</Name><AlphaNumeric/></VariableColumn>
      </VariableLength>
    </Table>
  </Media>
  <Media>
    <Table>
      <URL>b.csv</URL>
      <UTF8/>
      <DecimalSymbol>,</DecimalSymbol>
      <DigitGroupingSymbol>.</DigitGroupingSymbol>
      <VariableLength>
        <RecordDelimiter>&#13;&#10;</RecordDelimiter>
        <ColumnDelimiter>;</ColumnDelimiter>
        <TextEncapsulator>"</TextEncapsulator>
        <VariableColumn><Name>B</Name><AlphaNumeric/></VariableColumn>
      </VariableLength>
    </Table>
  </Media>
</DataSet>"#;
        let manifest = parse(xml).expect("manifest should parse");
        let urls: Vec<_> = manifest.tables.iter().map(|t| t.url.as_str()).collect();
        assert_eq!(urls, vec!["a.csv", "b.csv"]);
    }
}
