use colored::*;
use fiskex_core::{ColumnKind, Manifest, Report};
use serde_json::json;

pub fn print_report(report: &Report, format: &str) {
    match format {
        "json" => print_json_report(report),
        _ => print_text_report(report),
    }
}

fn print_text_report(report: &Report) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  VALIDATION REPORT".bold());
    println!("{}", "═".repeat(60));

    if report.is_empty() {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
        println!("\n{}", "Findings:".red().bold());
        for diagnostic in report {
            println!("  - {}", diagnostic.to_string().red());
        }
    }

    println!("\n{}", "Summary:".bold());
    println!("  Total findings: {}", report.len());
    println!("{}", "═".repeat(60));
}

fn print_json_report(report: &Report) {
    let output = json!({
        "passed": report.is_empty(),
        "diagnostics": report.iter().map(|d| d.to_string()).collect::<Vec<_>>(),
        "summary": {
            "finding_count": report.len(),
        }
    });

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

pub fn print_manifest(manifest: &Manifest, format: &str) {
    match format {
        "json" => print_json_manifest(manifest),
        _ => print_text_manifest(manifest),
    }
}

fn print_text_manifest(manifest: &Manifest) {
    println!("{} version {}", "Manifest".bold(), manifest.version);
    println!("Tables: {}", manifest.tables.len());

    for table in &manifest.tables {
        println!("\n{}", table.url.bold());
        println!("  Encoding:  {}", if table.encoding_utf8 { "UTF-8" } else { "unsupported" });
        println!(
            "  Symbols:   decimal '{}', grouping '{}'",
            table.decimal_symbol, table.digit_grouping_symbol
        );
        println!(
            "  Layout:    {}",
            if table.is_fixed_length {
                "fixed length"
            } else {
                "variable length"
            }
        );
        println!("  Columns:   {}", table.columns.len());
        for column in &table.columns {
            let kind = match column.kind {
                ColumnKind::Numeric { decimal_places } => {
                    format!("numeric({decimal_places})")
                }
                ColumnKind::AlphaNumeric {
                    max_length: Some(max),
                } => format!("alphanumeric(max {max})"),
                ColumnKind::AlphaNumeric { max_length: None } => "alphanumeric".to_string(),
                ColumnKind::Date => "date".to_string(),
            };
            println!("    {} {}", column.name, kind.dimmed());
        }
    }
}

fn print_json_manifest(manifest: &Manifest) {
    println!("{}", serde_json::to_string_pretty(manifest).unwrap());
}
