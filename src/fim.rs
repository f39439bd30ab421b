//! Dataset record construction with an optional fill-in-the-middle split.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::FimCfg;
use crate::types::{DatasetRecord, FimSplit};
use crate::utils::{char_len, slice_chars};

pub const FIM_PREFIX: &str = "<fim_prefix>";
pub const FIM_SUFFIX: &str = "<fim_suffix>";
pub const FIM_MIDDLE: &str = "<fim_middle>";

/// Build the dataset record for one cleaned file using the default FIM settings.
/// Returns `None` when nothing but whitespace is left.
pub fn build_record<R: Rng + ?Sized>(
    cleaned_code: &str,
    rel_path: &str,
    rng: &mut R,
) -> Option<DatasetRecord> {
    build_record_with(cleaned_code, rel_path, &FimCfg::default(), rng)
}

pub fn build_record_with<R: Rng + ?Sized>(
    cleaned_code: &str,
    rel_path: &str,
    cfg: &FimCfg,
    rng: &mut R,
) -> Option<DatasetRecord> {
    if cleaned_code.trim().is_empty() {
        return None;
    }
    let fim = if cfg.enabled && char_len(cleaned_code) >= cfg.min_chars {
        Some(fim_split(cleaned_code, cfg.max_middle_chars, rng))
    } else {
        None
    };
    Some(DatasetRecord {
        file_path: rel_path.to_string(),
        cleaned_code: cleaned_code.to_string(),
        fim,
    })
}

/// Split `code` at a random point in the middle 60% of its length.
///
/// The middle span starts at the split point and holds at most `max_middle`
/// characters; the suffix is whatever follows it. `fim_text` puts the middle
/// last (PSM order).
pub fn fim_split<R: Rng + ?Sized>(code: &str, max_middle: usize, rng: &mut R) -> FimSplit {
    let len = char_len(code);
    // floor(0.2 * len) ..= floor(0.8 * len)
    let split = rng.gen_range(len / 5..=len * 4 / 5);
    let middle_len = max_middle.min(len - split);

    let prefix = slice_chars(code, 0, split).to_string();
    let middle = slice_chars(code, split, split + middle_len).to_string();
    let suffix = slice_chars(code, split + middle_len, len).to_string();
    let fim_text = format!("{FIM_PREFIX}{prefix}{FIM_SUFFIX}{suffix}{FIM_MIDDLE}{middle}");

    FimSplit {
        prefix,
        middle,
        suffix,
        fim_text,
    }
}

/// Per-file RNG. Depends only on the run seed and the file's discovery index,
/// so the split for a file does not change with the number of workers.
pub fn file_rng(base_seed: u64, index: usize) -> StdRng {
    StdRng::seed_from_u64(base_seed.wrapping_add(index as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    fn text_of_len(n: usize) -> String {
        "abcdefghij".chars().cycle().take(n).collect()
    }

    fn must_fim(code: &str, seed: u64) -> FimSplit {
        build_record(code, "k.cu", &mut rng(seed))
            .and_then(|r| r.fim)
            .unwrap_or_else(|| panic!("expected FIM fields for {} chars", code.len()))
    }

    // ---------- Skip / threshold ----------

    #[test]
    fn empty_or_whitespace_is_skipped() {
        assert!(build_record("", "a.cu", &mut rng(1)).is_none());
        assert!(build_record("  \n\t ", "a.cu", &mut rng(1)).is_none());
    }

    #[test]
    fn short_code_has_no_fim_fields() {
        let r = build_record(&text_of_len(49), "dir/a.cu", &mut rng(1)).unwrap();
        assert_eq!(r.file_path, "dir/a.cu");
        assert_eq!(r.cleaned_code.len(), 49);
        assert!(r.fim.is_none());
    }

    #[test]
    fn fifty_chars_gets_fim_fields() {
        let r = build_record(&text_of_len(50), "a.cu", &mut rng(1)).unwrap();
        assert!(r.fim.is_some());
    }

    #[test]
    fn threshold_counts_chars_not_bytes() {
        // 30 chars, 60 bytes
        let code = "é".repeat(30);
        let r = build_record(&code, "u.cu", &mut rng(3)).unwrap();
        assert!(r.fim.is_none());
    }

    #[test]
    fn disabled_fim_never_splits() {
        let cfg = FimCfg {
            enabled: false,
            ..FimCfg::default()
        };
        let r = build_record_with(&text_of_len(500), "a.cu", &cfg, &mut rng(1)).unwrap();
        assert!(r.fim.is_none());
    }

    // ---------- Split shape ----------

    #[test]
    fn split_reconstructs_and_is_reproducible() {
        let code = text_of_len(100);
        let a = must_fim(&code, 42);
        let b = must_fim(&code, 42);
        assert_eq!(a, b);
        assert_eq!(format!("{}{}{}", a.prefix, a.middle, a.suffix), code);

        let split = a.prefix.len();
        assert!((20..=80).contains(&split), "split {split} out of range");
        // Short input: middle runs to the end
        assert_eq!(a.middle.len(), 100 - split);
        assert!(a.suffix.is_empty());
    }

    #[test]
    fn fim_text_puts_middle_last() {
        let s = must_fim(&text_of_len(120), 7);
        assert_eq!(
            s.fim_text,
            format!("<fim_prefix>{}<fim_suffix>{}<fim_middle>{}", s.prefix, s.suffix, s.middle)
        );
    }

    #[test]
    fn middle_capped_at_200_chars() {
        let code = text_of_len(2000);
        for seed in 0..20 {
            let s = must_fim(&code, seed);
            let split = s.prefix.len();
            assert!((400..=1600).contains(&split));
            assert_eq!(s.middle.len(), 200);
            assert_eq!(s.suffix.len(), 2000 - split - 200);
            assert_eq!(format!("{}{}{}", s.prefix, s.middle, s.suffix), code);
        }
    }

    #[test]
    fn custom_middle_cap() {
        let cfg = FimCfg {
            max_middle_chars: 5,
            ..FimCfg::default()
        };
        let r = build_record_with(&text_of_len(100), "a.cu", &cfg, &mut rng(9)).unwrap();
        assert_eq!(r.fim.unwrap().middle.len(), 5);
    }

    #[test]
    fn multibyte_split_on_char_boundaries() {
        let code: String = "αβγδε".chars().cycle().take(80).collect();
        let s = must_fim(&code, 11);
        let split = s.prefix.chars().count();
        assert!((16..=64).contains(&split));
        assert_eq!(format!("{}{}{}", s.prefix, s.middle, s.suffix), code);
    }

    #[test]
    fn file_rng_depends_on_seed_and_index() {
        let a: u64 = file_rng(5, 3).gen();
        let b: u64 = file_rng(5, 3).gen();
        let c: u64 = file_rng(5, 4).gen();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
