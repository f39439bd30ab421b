//! Run orchestration: discover -> read -> clean -> write copy -> collect records.

use anyhow::Context;
use std::io;
use std::path::{Path, PathBuf};
use std::{fs, time::Instant};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::cleaner::{clean, normalize_newlines};
use crate::config::{AppConfig, FimCfg};
use crate::dataset::save_dataset;
use crate::fim::{build_record_with, file_rng};
use crate::types::{FileOutcome, RunSummary, SourceFile};
use crate::utils::mirrored_path;
use crate::walker::discover;

/// Per-file failure. Never aborts the run.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("{} is not valid UTF-8", path.display())]
    Decode { path: PathBuf },
    #[error("read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("{0}: cannot mirror path under the output directory")]
    Path(String),
}

/// Clean one file and, when something is left, write the mirrored copy.
pub fn process_file<R: rand::Rng + ?Sized>(
    file: &SourceFile,
    output_root: &Path,
    fim: &FimCfg,
    rng: &mut R,
) -> Result<FileOutcome, ProcessError> {
    let bytes = fs::read(&file.path).map_err(|source| ProcessError::Read {
        path: file.path.clone(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|_| ProcessError::Decode {
        path: file.path.clone(),
    })?;

    let cleaned = clean(&normalize_newlines(&text));
    let Some(record) = build_record_with(&cleaned, &file.rel_path, fim, rng) else {
        return Ok(FileOutcome::Empty);
    };

    let out = mirrored_path(output_root, &file.rel)
        .ok_or_else(|| ProcessError::Path(file.rel_path.clone()))?;
    let write_err = |source| ProcessError::Write {
        path: out.clone(),
        source,
    };
    if let Some(parent) = out.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(&out, &record.cleaned_code).map_err(write_err)?;
    Ok(FileOutcome::Written(record, out))
}

/// Process a contiguous slice of the discovery list. `start` is the discovery
/// index of `files[0]`, used to derive each file's RNG.
fn process_chunk(
    start: usize,
    files: &[SourceFile],
    output_root: &Path,
    fim: &FimCfg,
    base_seed: u64,
) -> Vec<Result<FileOutcome, ProcessError>> {
    files
        .iter()
        .enumerate()
        .map(|(i, file)| {
            let mut rng = file_rng(base_seed, start + i);
            let res = process_file(file, output_root, fim, &mut rng);
            log_outcome(file, &res);
            res
        })
        .collect()
}

fn log_outcome(file: &SourceFile, res: &Result<FileOutcome, ProcessError>) {
    let input = file.path.display();
    match res {
        Ok(FileOutcome::Written(_, out)) => info!("Processed: {} -> {}", input, out.display()),
        Ok(FileOutcome::Empty) => info!("Skipped: {} (empty after cleaning)", input),
        Err(ProcessError::Decode { .. }) => warn!("Skipped: {} (encoding error)", input),
        Err(e) => error!("Error processing {}: {}", input, e),
    }
}

/// Full run. Per-file failures are logged and counted; setup failures and a
/// failed dataset write are returned as errors.
pub async fn run(cfg: &AppConfig) -> anyhow::Result<RunSummary> {
    let started = Instant::now();
    fs::create_dir_all(&cfg.output_dir)
        .with_context(|| format!("create output directory {}", cfg.output_dir.display()))?;

    let files = discover(
        &cfg.input_dir,
        &cfg.bare_extensions(),
        Some(cfg.output_dir.as_path()),
    )?;
    let base_seed = cfg.fim.seed.unwrap_or_else(rand::random);
    let jobs = cfg.effective_jobs();
    info!(
        "Found {} files under {}. Jobs={}, FIM={}, Seed={}",
        files.len(),
        cfg.input_dir.display(),
        jobs,
        cfg.fim.enabled,
        base_seed
    );

    // Contiguous chunks, one blocking task each; joined in order so records
    // keep discovery order.
    let mut results = Vec::with_capacity(files.len());
    if !files.is_empty() {
        let chunk_size = files.len().div_ceil(jobs).max(1);
        let mut handles = Vec::new();
        for (n, chunk) in files.chunks(chunk_size).enumerate() {
            let chunk = chunk.to_vec();
            let out = cfg.output_dir.clone();
            let fim = cfg.fim.clone();
            let start = n * chunk_size;
            handles.push(tokio::task::spawn_blocking(move || {
                process_chunk(start, &chunk, &out, &fim, base_seed)
            }));
        }
        for h in handles {
            results.extend(h.await.context("file worker panicked")?);
        }
    }

    let mut summary = RunSummary {
        discovered: files.len(),
        ..RunSummary::default()
    };
    let mut records = Vec::new();
    for res in results {
        match res {
            Ok(FileOutcome::Written(record, _)) => {
                summary.written += 1;
                records.push(record);
            }
            Ok(FileOutcome::Empty) => summary.empty += 1,
            Err(_) => summary.failed += 1,
        }
    }
    summary.records = records.len();

    save_dataset(&cfg.dataset_path(), &records)?;
    info!(
        "Done in {:.2?}: written={}, empty={}, failed={}",
        started.elapsed(),
        summary.written,
        summary.empty,
        summary.failed
    );
    Ok(summary)
}
