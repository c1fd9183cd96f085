//! Package-level validation.
//!
//! The package validator resolves manifest table entries to byte content —
//! from a directory of files or from a ZIP archive — and orchestrates
//! per-table validation, aggregating every finding into one report. No
//! failure mode escapes as an error: unreadable sources, missing files and
//! undecodable content all map to diagnostics, and an empty report is the
//! sole success signal.

use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use fiskex_core::{Diagnostic, MANIFEST_NAME, Report, TableDeclaration};
use tracing::debug;
use zip::ZipArchive;

use crate::{PatternBuilder, TableValidator};

/// Package contents as a map from entry name to raw bytes.
pub type FileMap = HashMap<String, Vec<u8>>;

/// Validates a package laid out as a directory of files.
pub fn validate_dir(path: &Path) -> Report {
    match dir_file_map(path) {
        Ok(files) => validate_files(&files),
        Err(diagnostic) => single(diagnostic),
    }
}

/// Validates a package delivered as a ZIP archive.
pub fn validate_zip(path: &Path) -> Report {
    match zip_file_map(path) {
        Ok(files) => validate_files(&files),
        Err(diagnostic) => single(diagnostic),
    }
}

/// Validates resolved package contents against their manifest.
///
/// This is the orchestration both package forms share: parse the manifest
/// once, then validate each declared table in manifest order.
pub fn validate_files(files: &FileMap) -> Report {
    let mut report = Report::new();

    let Some(manifest_bytes) = files.get(MANIFEST_NAME) else {
        report.push(Diagnostic::package("No index.xml found"));
        return report;
    };
    let manifest_text = match std::str::from_utf8(manifest_bytes) {
        Ok(text) => text,
        Err(_) => {
            report.push(Diagnostic::package("index.xml is not valid UTF-8"));
            return report;
        }
    };
    let manifest = match fiskex_manifest::parse(manifest_text) {
        Ok(manifest) => manifest,
        Err(error) => {
            report.push(Diagnostic::package(error.to_string()));
            return report;
        }
    };
    debug!(tables = manifest.tables.len(), "manifest parsed");

    let mut patterns = PatternBuilder::new();
    for table in &manifest.tables {
        validate_table_entry(table, files, &mut patterns, &mut report);
    }
    report
}

fn validate_table_entry(
    table: &TableDeclaration,
    files: &FileMap,
    patterns: &mut PatternBuilder,
    report: &mut Report,
) {
    let Some(bytes) = files.get(&table.url) else {
        report.push(Diagnostic::package(format!(
            "File \"{}\" not found.",
            table.url
        )));
        return;
    };
    if !table.encoding_utf8 {
        report.push(Diagnostic::table(
            &table.url,
            "Validator does only support UTF8.",
        ));
        return;
    }
    let content = match std::str::from_utf8(bytes) {
        Ok(content) => content,
        Err(_) => {
            report.push(Diagnostic::table(&table.url, "File is not valid UTF-8."));
            return;
        }
    };

    debug!(url = %table.url, columns = table.columns.len(), "validating table");
    if let Err(error) = TableValidator::new(table, patterns).validate(content, report) {
        report.push(Diagnostic::table(&table.url, error.to_string()));
    }
}

fn dir_file_map(path: &Path) -> Result<FileMap, Diagnostic> {
    let entries = fs::read_dir(path).map_err(|e| {
        Diagnostic::package(format!("Cannot read directory \"{}\": {}", path.display(), e))
    })?;

    let mut files = FileMap::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            Diagnostic::package(format!("Cannot read directory \"{}\": {}", path.display(), e))
        })?;
        if !entry.path().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let bytes = fs::read(entry.path())
            .map_err(|e| Diagnostic::package(format!("Cannot read file \"{}\": {}", name, e)))?;
        files.insert(name, bytes);
    }
    Ok(files)
}

fn zip_file_map(path: &Path) -> Result<FileMap, Diagnostic> {
    let file = fs::File::open(path).map_err(|e| {
        Diagnostic::package(format!("Cannot open archive \"{}\": {}", path.display(), e))
    })?;
    let mut archive = ZipArchive::new(file).map_err(|e| {
        Diagnostic::package(format!("Cannot read archive \"{}\": {}", path.display(), e))
    })?;

    let mut files = FileMap::new();
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(|e| {
            Diagnostic::package(format!("Cannot read archive \"{}\": {}", path.display(), e))
        })?;
        if entry.is_dir() {
            continue;
        }
        let name = entry.name().to_string();
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes).map_err(|e| {
            Diagnostic::package(format!("Cannot read archive entry \"{}\": {}", name, e))
        })?;
        files.insert(name, bytes);
    }
    Ok(files)
}

fn single(diagnostic: Diagnostic) -> Report {
    let mut report = Report::new();
    report.push(diagnostic);
    report
}
