use anyhow::{Context, Result};
use fiskex_core::MANIFEST_NAME;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;
use zip::ZipArchive;

use crate::output;

pub fn execute(package: &str, format: &str) -> Result<()> {
    info!("Reading manifest from: {}", package);

    let path = Path::new(package);
    let content = read_manifest(path)?;
    let manifest = fiskex_manifest::parse(&content)
        .with_context(|| format!("Failed to parse manifest of {}", package))?;

    output::print_manifest(&manifest, format);
    Ok(())
}

fn read_manifest(path: &Path) -> Result<String> {
    if path.is_dir() {
        let manifest_path = path.join(MANIFEST_NAME);
        std::fs::read_to_string(&manifest_path)
            .with_context(|| format!("Failed to read {}", manifest_path.display()))
    } else {
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        let mut archive = ZipArchive::new(file)
            .with_context(|| format!("Failed to read archive {}", path.display()))?;
        let mut entry = archive
            .by_name(MANIFEST_NAME)
            .with_context(|| format!("No {} in archive {}", MANIFEST_NAME, path.display()))?;
        let mut content = String::new();
        entry.read_to_string(&mut content)?;
        Ok(content)
    }
}
