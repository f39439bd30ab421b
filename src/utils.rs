//! Small helpers.

use std::path::{Component, Path, PathBuf};

pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn byte_offset(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(b, _)| b)
        .unwrap_or(s.len())
}

/// Slice by character positions `[start, end)`; out-of-range ends clamp to the string.
pub fn slice_chars(s: &str, start: usize, end: usize) -> &str {
    let b0 = byte_offset(s, start);
    let b1 = byte_offset(s, end.max(start));
    &s[b0..b1]
}

/// Relative path as stored in the dataset: always `/`-separated.
pub fn rel_path_string(rel: &Path) -> String {
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Mirror `rel` under `output_root`. `None` if `rel` would escape the root.
pub fn mirrored_path(output_root: &Path, rel: &Path) -> Option<PathBuf> {
    let mut out = output_root.to_path_buf();
    for c in rel.components() {
        match c {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(out)
}

/// Normalize a configured extension to its bare form: ".cu" / "cu" -> "cu".
pub fn bare_ext(ext: &str) -> &str {
    ext.trim().trim_start_matches('.')
}
