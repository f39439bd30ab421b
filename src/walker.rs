//! Recursive discovery of source files under the input root.

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::types::SourceFile;
use crate::utils::rel_path_string;

/// Collect files under `root` whose extension is in `extensions` (bare, no dot).
///
/// Order is deterministic (sorted by file name at each level). Symlinked files
/// and directories are followed. Hidden entries and `exclude` (typically the
/// output root) are not descended into.
pub fn discover(
    root: &Path,
    extensions: &[String],
    exclude: Option<&Path>,
) -> Result<Vec<SourceFile>> {
    if !root.is_dir() {
        bail!("input directory {} does not exist", root.display());
    }
    let exclude = exclude.and_then(|p| p.canonicalize().ok());

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_ignored(e, exclude.as_deref()));

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() || !has_allowed_ext(entry.path(), extensions) {
            continue;
        }
        let path = entry.into_path();
        let rel = match path.strip_prefix(root) {
            Ok(r) => r.to_path_buf(),
            Err(_) => continue,
        };
        files.push(SourceFile {
            rel_path: rel_path_string(&rel),
            rel,
            path,
        });
    }
    debug!("Discovered {} files under {}", files.len(), root.display());
    Ok(files)
}

fn has_allowed_ext(p: &Path, extensions: &[String]) -> bool {
    p.extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.iter().any(|want| want == e))
        .unwrap_or(false)
}

fn is_ignored(entry: &DirEntry, exclude: Option<&Path>) -> bool {
    let name = entry.file_name().to_string_lossy();
    if name.starts_with('.') {
        return true;
    }
    match exclude {
        Some(ex) if entry.file_type().is_dir() => {
            let canon: Option<PathBuf> = entry.path().canonicalize().ok();
            canon.as_deref() == Some(ex)
        }
        _ => false,
    }
}
