//! Aggregate dataset file: every record of a run, written once at the end.

use anyhow::Context;
use std::{fs, path::Path};
use tracing::info;

use crate::types::DatasetRecord;

/// Write `records` as pretty-printed JSON. Nothing is written for an empty run.
/// Returns whether the file was written.
pub fn save_dataset(path: &Path, records: &[DatasetRecord]) -> anyhow::Result<bool> {
    if records.is_empty() {
        info!("No data to save to JSON");
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create dataset directory {}", parent.display()))?;
    }
    let s = serde_json::to_string_pretty(records)?;
    fs::write(path, s).with_context(|| format!("write dataset {}", path.display()))?;
    info!("Saved {} entries to {}", records.len(), path.display());
    Ok(true)
}

/// Read a dataset file back, e.g. to inspect or merge the output of earlier runs.
pub fn load_dataset(path: &Path) -> anyhow::Result<Vec<DatasetRecord>> {
    let s = fs::read_to_string(path).with_context(|| format!("read dataset {}", path.display()))?;
    Ok(serde_json::from_str(&s)?)
}
