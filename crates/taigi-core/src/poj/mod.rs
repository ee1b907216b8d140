//! ROC → POJ transliteration.
//!
//! Input syllables are written in the modified romanization (ROC) with an
//! optional trailing tone digit. Output is Pe̍h-ōe-jī with the tone carried by
//! a combining diacritic on the tone-bearing letter, in NFC form.
//!
//! The rewrite rules are an ordered list applied one after another; later
//! rules see the output of earlier ones, so the order is part of the contract.

mod tone;
mod translit;

pub use tone::{tone_offset, Tone, TONE_VOWELS};
pub use translit::{roc_to_poj, roc_to_poj_ascii, ROC_SUBS, ROC_SUBS_ASCII};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslitError {
    #[error("malformed syllable (no tone-bearing letter): {syllable:?}")]
    MalformedSyllable { syllable: String },
}
