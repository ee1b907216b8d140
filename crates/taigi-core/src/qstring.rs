//! Query-key generation for predictive lookup.
//!
//! Each reading yields a short list of lowercase letters-only keys covering
//! ROC and POJ spellings. Readings of three or more syllables also get an
//! initials-only key, so `tsiah-png-be` is also found as `chpb` or `tspb`.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::poj::roc_to_poj_ascii;
use crate::reconcile::split_syllables;
use crate::unicode::alpha_only;

fn initial_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^(tsh?|[ptk]h)").expect("valid initial regex"))
}

/// Leading consonant cluster of a syllable.
///
/// `ts`, `tsh`, `ph`, `th` and `kh` are kept whole; anything else is the
/// first alphabetic character. A syllable without letters has no initial.
pub fn initial(syllable: &str) -> Option<&str> {
    if let Some(m) = initial_re().find(syllable) {
        return Some(m.as_str());
    }
    syllable
        .char_indices()
        .find(|(_, c)| c.is_alphabetic())
        .map(|(i, c)| &syllable[i..i + c.len_utf8()])
}

/// Push `poj`, then `roc` only when it differs.
fn pair(poj: String, roc: String) -> Vec<String> {
    if poj == roc {
        vec![poj]
    } else {
        vec![poj, roc]
    }
}

/// Generate the lookup keys for `reading`, in storage order.
///
/// ```
/// use taigi_core::qstring::get_qstrings;
///
/// assert_eq!(get_qstrings("pa5"), vec!["pa"]);
/// assert_eq!(get_qstrings("tsa"), vec!["cha", "tsa"]);
/// ```
pub fn get_qstrings(reading: &str) -> Vec<String> {
    let roc_reading = reading.to_lowercase();
    let poj_reading = roc_to_poj_ascii(&roc_reading);
    let roc_alphas = alpha_only(&roc_reading);
    let poj_alphas = alpha_only(&poj_reading);

    if roc_alphas.is_empty() {
        return Vec::new();
    }

    let syllables: Vec<&str> = split_syllables(&roc_reading)
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();

    if syllables.len() < 3 {
        return pair(poj_alphas, roc_alphas);
    }

    let roc_initials: String = syllables.iter().filter_map(|s| initial(s)).collect();
    let poj_initials = roc_initials.replace("ts", "ch");

    let mut keys = match (poj_initials == roc_initials, poj_alphas == roc_alphas) {
        (true, true) => vec![poj_initials, poj_alphas],
        (true, false) => vec![poj_initials, poj_alphas, roc_alphas],
        (false, _) => vec![poj_initials, roc_initials, poj_alphas, roc_alphas],
    };
    // Single-letter syllables make the initials key equal the full key.
    let mut seen = HashSet::new();
    keys.retain(|k| seen.insert(k.clone()));
    keys
}
