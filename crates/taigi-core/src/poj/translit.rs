use unicode_normalization::UnicodeNormalization;

use super::tone::{tone_offset, Tone};
use super::TranslitError;

/// ROC → POJ spelling rules, applied in order.
pub const ROC_SUBS: &[(&str, &str)] = &[
    ("ts", "ch"),
    ("ua", "oa"),
    ("ue", "oe"),
    ("oo", "o\u{0358}"),
    ("ing", "eng"),
    ("ik", "ek"),
    ("nn", "\u{207F}"),
];

/// ASCII-only variant of [`ROC_SUBS`] for query keys: `oo` becomes `ou` and
/// nasalisation stays spelled out.
pub const ROC_SUBS_ASCII: &[(&str, &str)] = &[
    ("ts", "ch"),
    ("ua", "oa"),
    ("ue", "oe"),
    ("oo", "ou"),
    ("ing", "eng"),
    ("ik", "ek"),
];

fn apply_rules(text: String, rules: &[(&str, &str)]) -> String {
    rules
        .iter()
        .fold(text, |acc, (from, to)| acc.replace(from, to))
}

/// Transliterate one ROC syllable into NFC-composed POJ.
///
/// A trailing tone digit is consumed; tones 2, 3, 5, 7, 8 and 9 add their
/// combining mark, tones 1 and 4 add nothing. Without a digit the syllable
/// is only respelled and never fails.
///
/// ```
/// use taigi_core::poj::roc_to_poj;
///
/// assert_eq!(roc_to_poj("pa2").unwrap(), "pá");
/// assert_eq!(roc_to_poj("tsing").unwrap(), "cheng");
/// ```
pub fn roc_to_poj(syllable: &str) -> Result<String, TranslitError> {
    let mut text = apply_rules(syllable.nfd().collect(), ROC_SUBS);

    if let Some(tone) = text.chars().last().and_then(Tone::from_digit) {
        text.pop();
        if let Some(mark) = tone.mark() {
            let offset = tone_offset(&text).ok_or_else(|| TranslitError::MalformedSyllable {
                syllable: syllable.to_string(),
            })?;
            text.insert(offset, mark);
        }
    }

    Ok(text.nfc().collect())
}

/// Respell a (lowercased) ROC reading into ASCII POJ for query keys.
///
/// Hyphens and tone digits pass through unchanged.
pub fn roc_to_poj_ascii(text: &str) -> String {
    apply_rules(text.to_string(), ROC_SUBS_ASCII)
}
