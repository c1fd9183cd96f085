use anyhow::{Result, bail};
use fiskex_validator::{validate_dir, validate_zip};
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(package: &str, format: &str) -> Result<()> {
    info!("Validating package: {}", package);

    let path = Path::new(package);
    let report = if path.is_dir() {
        validate_dir(path)
    } else if path.is_file() {
        validate_zip(path)
    } else {
        bail!("No such file or directory: {}", package);
    };

    output::print_report(&report, format);

    if !report.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}
