//! Character-level classification for romanized Taiwanese text.

/// Combining diacritics used as POJ tone and vowel marks.
///
/// Covers Combining Diacritical Marks (U+0300..U+036F), which includes both
/// the tone marks and the dot above right (U+0358).
pub fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

/// Keep only alphabetic characters.
///
/// Drops hyphens, tone digits, punctuation and combining marks. Superscript
/// n (ⁿ) is alphabetic and survives.
pub fn alpha_only(reading: &str) -> String {
    reading.chars().filter(|c| c.is_alphabetic()).collect()
}

/// Check whether a string carries no combining marks at all, in either
/// composed or decomposed form.
pub fn is_unmarked(s: &str) -> bool {
    use unicode_normalization::UnicodeNormalization;
    !s.nfd().any(is_combining_mark)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_only() {
        assert_eq!(alpha_only("tsa-pou"), "tsapou");
        assert_eq!(alpha_only("pa5"), "pa");
        assert_eq!(alpha_only("a--b, c"), "abc");
        assert_eq!(alpha_only("peⁿ"), "peⁿ");
        assert_eq!(alpha_only(""), "");
    }

    #[test]
    fn test_alpha_only_idempotent() {
        let once = alpha_only("Tsiah8-pn̄g7");
        assert_eq!(alpha_only(&once), once);
    }

    #[test]
    fn test_char_classification() {
        assert!(is_combining_mark('\u{0301}'));
        assert!(is_combining_mark('\u{0358}'));
        assert!(!is_combining_mark('ⁿ'));
    }

    #[test]
    fn test_is_unmarked() {
        assert!(is_unmarked("pa"));
        assert!(is_unmarked("peⁿ"));
        assert!(!is_unmarked("pá"));
        assert!(!is_unmarked("o\u{0358}"));
    }
}
