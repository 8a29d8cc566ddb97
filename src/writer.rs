use crate::parser::sort_records;
use crate::types::PostalRecord;

use std::fs;
use std::path::{Path, PathBuf};

/// Primary output directory, relative to the base dir.
pub const DATA_DIR: &str = "src/data";
/// Secondary output directory, mirrored to only when it already exists.
pub const PUBLIC_DIR: &str = "public";
pub const DATA_FILE: &str = "postal-codes.json";

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn default_data_file() -> PathBuf {
    Path::new(DATA_DIR).join(DATA_FILE)
}

/// Sorts the records and writes the dataset under `base_dir`: always to
/// `src/data/postal-codes.json` (creating the directory if needed), and
/// additionally to `public/postal-codes.json` when `public/` exists. The
/// public directory is never created. A failed mirror write is logged and
/// does not undo the primary write.
///
/// Returns the primary path written to.
pub fn write_dataset(
    records: &mut [PostalRecord],
    base_dir: &Path,
) -> Result<PathBuf, WriteError> {
    sort_records(records);

    let mut json = serde_json::to_string_pretty(&records)?;
    json.push('\n');

    let data_dir = base_dir.join(DATA_DIR);
    fs::create_dir_all(&data_dir)?;
    let primary = data_dir.join(DATA_FILE);
    fs::write(&primary, &json)?;
    log::info!("Data successfully saved to: {}", primary.display());

    let public_dir = base_dir.join(PUBLIC_DIR);
    if public_dir.is_dir() {
        let secondary = public_dir.join(DATA_FILE);
        match fs::write(&secondary, &json) {
            Ok(()) => log::info!("Also updated: {}", secondary.display()),
            Err(e) => log::warn!("Failed to update {}: {}", secondary.display(), e),
        }
    }

    Ok(primary)
}
