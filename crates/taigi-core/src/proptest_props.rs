//! Property-based tests for transliteration and query keys.
//!
//! Generates random ROC-like syllables and readings via proptest and checks
//! the invariants every dictionary row relies on.

use proptest::prelude::*;

use crate::build::{build_entries, DictionaryRow};
use crate::poj::roc_to_poj;
use crate::qstring::get_qstrings;
use crate::settings::BuildSettings;
use crate::unicode::{alpha_only, is_unmarked};
use unicode_normalization::UnicodeNormalization;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn initial() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "", "p", "ph", "b", "m", "t", "th", "l", "n", "ts", "tsh", "s", "j", "k", "kh", "g", "h",
    ])
}

fn rime() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "a", "ai", "au", "an", "ang", "ah", "e", "ee", "i", "ia", "iau", "ing", "ik", "o", "oo",
        "ong", "u", "ua", "uai", "ue", "ui", "un", "inn", "ann", "ng", "m",
    ])
}

/// A syllable without a tone digit.
///
/// `n` + `ng` is excluded: `nn` rewrites to `ⁿ` first, leaving no vowel.
fn bare_syllable() -> impl Strategy<Value = String> {
    (initial(), rime())
        .prop_filter("nng has no tone-bearing letter", |(i, r)| {
            !(*i == "n" && r.starts_with('n'))
        })
        .prop_map(|(i, r)| format!("{i}{r}"))
}

fn reading() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(bare_syllable(), 1..6),
        prop::collection::vec(prop::sample::select(vec!["", "2", "3", "5", "7", "8"]), 6),
    )
        .prop_map(|(syls, tones)| {
            syls.iter()
                .zip(tones)
                .map(|(s, t)| format!("{s}{t}"))
                .collect::<Vec<_>>()
                .join("-")
        })
}

const TONE_MARKS: [char; 6] = ['\u{0301}', '\u{0300}', '\u{0302}', '\u{0304}', '\u{030D}', '\u{0306}'];

fn has_tone_mark(s: &str) -> bool {
    s.nfd().any(|c| TONE_MARKS.contains(&c))
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn bare_tones_carry_no_mark(syl in bare_syllable(), digit in prop::sample::select(vec!["", "1", "4"])) {
        let poj = roc_to_poj(&format!("{syl}{digit}")).unwrap();
        prop_assert!(!has_tone_mark(&poj), "{syl}{digit} -> {poj}");
        if !syl.contains("oo") {
            prop_assert!(is_unmarked(&poj), "{syl}{digit} -> {poj}");
        }
    }

    #[test]
    fn marked_tones_always_transliterate(syl in bare_syllable(), digit in prop::sample::select(vec!["2", "3", "5", "7", "8", "9"])) {
        let poj = roc_to_poj(&format!("{syl}{digit}")).unwrap();
        prop_assert!(has_tone_mark(&poj), "{syl}{digit} -> {poj}");
        prop_assert!(!poj.chars().any(|c| c.is_ascii_digit()));
    }

    #[test]
    fn alpha_only_is_idempotent(s in "\\PC{0,24}") {
        let once = alpha_only(&s);
        prop_assert_eq!(alpha_only(&once), once);
    }

    #[test]
    fn qstrings_are_lowercase_letters(r in reading()) {
        let keys = get_qstrings(&r);
        prop_assert!((1..=4).contains(&keys.len()), "{r} -> {keys:?}");
        for k in &keys {
            prop_assert!(!k.is_empty());
            prop_assert!(k.chars().all(|c| c.is_ascii_lowercase()), "{r} -> {k}");
        }
    }

    #[test]
    fn qstrings_have_no_duplicates(r in reading()) {
        let keys = get_qstrings(&r);
        let mut dedup = keys.clone();
        dedup.sort();
        dedup.dedup();
        prop_assert_eq!(dedup.len(), keys.len());
    }

    #[test]
    fn unchanged_rows_keep_every_segment(r in reading()) {
        let out = build_entries(&[DictionaryRow::new(&r, &r, "字")], &BuildSettings::default()).unwrap();
        prop_assert_eq!(out.words.len(), 2);
        prop_assert_eq!(out.words[0].value.matches('-').count(), r.matches('-').count());
    }
}
