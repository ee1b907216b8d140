//! Row reconciliation: transliterate only the syllables an editor left alone.
//!
//! The source rows pair an original ROC reading with a hand-corrected one.
//! Segments that still match the original are known to be in transliterable
//! ROC spelling; edited segments are dropped from the POJ value.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::poj::{roc_to_poj, TranslitError};

pub(crate) fn hyphen_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("-+").expect("valid hyphen regex"))
}

/// Split a reading into syllables on runs of hyphens.
///
/// Leading and trailing hyphens produce empty segments, and an empty reading
/// is a single empty segment.
pub fn split_syllables(reading: &str) -> Vec<&str> {
    hyphen_re().split(reading).collect()
}

/// Segments of `reading`, each paired with the hyphen run that follows it.
fn segments_with_separators(reading: &str) -> Vec<(&str, &str)> {
    let mut out = Vec::new();
    let mut last = 0;
    for m in hyphen_re().find_iter(reading) {
        out.push((&reading[last..m.start()], m.as_str()));
        last = m.end();
    }
    out.push((&reading[last..], ""));
    out
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReconcileError {
    #[error("segment count mismatch: original has {original}, corrected has {corrected}")]
    SegmentCountMismatch { original: usize, corrected: usize },

    #[error("segment {index}: {source}")]
    Translit {
        index: usize,
        #[source]
        source: TranslitError,
    },
}

/// Result of reconciling one row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// POJ transliteration of the unchanged segments, with their separators.
    pub poj: String,
    /// Indices of segments that differ between original and corrected.
    pub edited: Vec<usize>,
    /// Indices of unchanged segments that are empty.
    pub empty: Vec<usize>,
}

/// Reconcile an original reading against its corrected form.
///
/// Both readings must split into the same number of segments. Segment `i` is
/// transliterated when it is textually identical in both readings, and is
/// followed by the separator that follows it in `corrected`.
pub fn reconcile(original: &str, corrected: &str) -> Result<Reconciliation, ReconcileError> {
    let orig = split_syllables(original);
    let new = segments_with_separators(corrected);
    if orig.len() != new.len() {
        return Err(ReconcileError::SegmentCountMismatch {
            original: orig.len(),
            corrected: new.len(),
        });
    }

    let mut out = Reconciliation::default();
    for (index, (orig_seg, (new_seg, separator))) in orig.iter().zip(&new).enumerate() {
        if orig_seg != new_seg {
            debug!(index, original = *orig_seg, corrected = *new_seg, "edited segment skipped");
            out.edited.push(index);
            continue;
        }
        if new_seg.is_empty() {
            out.empty.push(index);
        }
        let poj = roc_to_poj(new_seg).map_err(|source| ReconcileError::Translit { index, source })?;
        out.poj.push_str(&poj);
        out.poj.push_str(separator);
    }
    Ok(out)
}
