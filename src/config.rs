//! Load and validate runtime configuration.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{env, fs};
use tracing::warn;

use crate::utils::bare_ext;

pub const DEFAULT_EXTENSIONS: &[&str] = &[".cu", ".cuh", ".cpp", ".h", ".hpp", ".hxx"];

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FimCfg {
    pub enabled: bool,
    pub min_chars: usize,        // no split below this length
    pub max_middle_chars: usize, // middle span cap
    pub seed: Option<u64>,       // fixed seed for reproducible splits
}

impl Default for FimCfg {
    fn default() -> Self {
        Self {
            enabled: true,
            min_chars: 50,
            max_middle_chars: 200,
            seed: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Aggregate JSON; relative paths resolve under `output_dir`.
    pub dataset_file: PathBuf,
    pub extensions: Vec<String>,
    pub jobs: usize,
    pub fim: FimCfg,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("dataset"),
            output_dir: PathBuf::from("preprocessed"),
            dataset_file: PathBuf::from("cuda_dataset.json"),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            jobs: 1,
            fim: FimCfg::default(),
        }
    }
}

impl AppConfig {
    /// Read `path` if it exists (defaults otherwise), then apply environment overrides.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let mut cfg = if path.exists() {
            let s = fs::read_to_string(path)
                .with_context(|| format!("read config {}", path.display()))?;
            Self::from_yaml(&s).with_context(|| format!("parse config {}", path.display()))?
        } else {
            warn!("Config {} not found, using defaults", path.display());
            Self::default()
        };
        cfg.apply_overrides(|k| env::var(k).ok())?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml(s: &str) -> anyhow::Result<Self> {
        // An empty document deserializes to unit, not a map
        if s.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(s)?)
    }

    /// `FIM_PREP_*` variables win over the file.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("FIM_PREP_INPUT_DIR") {
            self.input_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("FIM_PREP_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("FIM_PREP_SEED") {
            let seed = v
                .trim()
                .parse()
                .with_context(|| format!("FIM_PREP_SEED is not a u64: {v:?}"))?;
            self.fim.seed = Some(seed);
        }
        if let Some(v) = lookup("FIM_PREP_JOBS") {
            self.jobs = v
                .trim()
                .parse()
                .with_context(|| format!("FIM_PREP_JOBS is not a number: {v:?}"))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.extensions.iter().all(|e| bare_ext(e).is_empty()) {
            bail!("extensions must list at least one file extension");
        }
        if self.fim.min_chars == 0 {
            bail!("fim.min_chars must be > 0");
        }
        if self.fim.max_middle_chars == 0 {
            bail!("fim.max_middle_chars must be > 0");
        }
        Ok(())
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.output_dir.join(&self.dataset_file)
    }

    /// Worker count; 0 means 1.
    pub fn effective_jobs(&self) -> usize {
        self.jobs.max(1)
    }

    /// Bare extensions (no leading dot), empty entries dropped.
    pub fn bare_extensions(&self) -> Vec<String> {
        self.extensions
            .iter()
            .map(|e| bare_ext(e).to_string())
            .filter(|e| !e.is_empty())
            .collect()
    }
}
