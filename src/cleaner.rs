//! Strip non-code elements from C/C++/CUDA sources.
//! Regex-only: comment markers inside string literals are stripped too.

use regex::Regex;
use std::sync::LazyLock;

// Block comments (non-greedy, may span lines) and `//` line comments.
static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)/\*[\s\S]*?\*/|//.*$").unwrap());

// License/copyright headers starting a line, as a block or a `//` line.
static LICENSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?mi)^\s*(/\*[\s\S]*?(?:LICENSE|COPYRIGHT)[\s\S]*?\*/|//.*?(?:LICENSE|COPYRIGHT).*?\n)",
    )
    .unwrap()
});

static PRAGMA_ONCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*#pragma\s+once\s*$").unwrap());

// IDE/platform guards. `__MSC_VER` only; plain `_MSC_VER` is left alone.
static IDE_GUARD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mi)^\s*#\s*(ifdef|ifndef|endif)\s+_(DEBUG|WIN32|_MSC_VER).*?$").unwrap()
});

static TRAILING_WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)[ \t]+$").unwrap());

static BLANK_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n+").unwrap());

/// Remove comments, license headers, `#pragma once` and IDE guards, then
/// squeeze blank lines and trim. Never fails; an empty result means "skip".
pub fn clean(text: &str) -> String {
    let t = COMMENT_RE.replace_all(text, "");
    let t = LICENSE_RE.replace_all(&t, "");
    let t = PRAGMA_ONCE_RE.replace_all(&t, "");
    let t = IDE_GUARD_RE.replace_all(&t, "");

    // Comments removed mid-line leave dangling spaces behind
    let t = TRAILING_WS_RE.replace_all(&t, "");
    let t = BLANK_RUN_RE.replace_all(&t, "\n");
    t.trim().to_string()
}

/// Text-mode newline handling: `\r\n` and lone `\r` become `\n`.
pub fn normalize_newlines(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}
