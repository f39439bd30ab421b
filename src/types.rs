//! Core domain types for source files, dataset records and FIM splits.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One input file found under the input root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Path relative to the input root; mirrored under the output root as-is.
    pub rel: PathBuf,
    /// `rel` as stored in the dataset: `/`-separated, lossy for non-UTF-8 names.
    pub rel_path: String,
}

/// Fill-in-the-middle view of a cleaned file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FimSplit {
    pub prefix: String,
    pub middle: String,
    pub suffix: String,
    pub fim_text: String, // "<fim_prefix>{prefix}<fim_suffix>{suffix}<fim_middle>{middle}"
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatasetRecord {
    pub file_path: String,
    pub cleaned_code: String,
    /// Flattened into the record; absent (not `null`) when `None`.
    #[serde(flatten)]
    pub fim: Option<FimSplit>,
}

/// What happened to a single file that was processed without error.
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    /// Cleaned copy written to the given path; record goes to the dataset.
    Written(DatasetRecord, PathBuf),
    /// Nothing left after cleaning.
    Empty,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub discovered: usize,
    pub written: usize,
    pub empty: usize,
    pub failed: usize,
    pub records: usize,
}
