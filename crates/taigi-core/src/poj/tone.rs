use std::sync::OnceLock;

use regex::Regex;

/// Letters that can carry a tone mark, in lookup priority order.
///
/// The first letter of this list that occurs anywhere in the syllable wins,
/// regardless of position.
pub const TONE_VOWELS: [char; 7] = ['o', 'a', 'e', 'u', 'i', 'n', 'm'];

/// Syllable-initial `oa`/`oe` followed by another letter: the mark goes on
/// the second vowel.
fn cluster_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^o[ae][a-z]").expect("valid tone cluster regex"))
}

/// Tone category encoded by a trailing ROC digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Seventh,
    Eighth,
    Ninth,
}

impl Tone {
    /// Parse a tone digit. Digits outside the tone system (0, 6) are not tones.
    pub fn from_digit(c: char) -> Option<Self> {
        match c {
            '1' => Some(Self::First),
            '2' => Some(Self::Second),
            '3' => Some(Self::Third),
            '4' => Some(Self::Fourth),
            '5' => Some(Self::Fifth),
            '7' => Some(Self::Seventh),
            '8' => Some(Self::Eighth),
            '9' => Some(Self::Ninth),
            _ => None,
        }
    }

    /// Combining mark for this tone. Tones 1 and 4 are unmarked.
    pub fn mark(self) -> Option<char> {
        match self {
            Self::First | Self::Fourth => None,
            Self::Second => Some('\u{0301}'),
            Self::Third => Some('\u{0300}'),
            Self::Fifth => Some('\u{0302}'),
            Self::Seventh => Some('\u{0304}'),
            Self::Eighth => Some('\u{030D}'),
            Self::Ninth => Some('\u{0306}'),
        }
    }
}

/// Byte offset at which the tone mark is inserted into `syllable`.
///
/// The mark is inserted directly after the tone-bearing letter, so it
/// combines with that letter once the string is recomposed. `syllable` is
/// expected to be decomposed and already rewritten to POJ spelling.
///
/// Returns `None` when the syllable has none of [`TONE_VOWELS`].
pub fn tone_offset(syllable: &str) -> Option<usize> {
    if let Some(m) = cluster_re().find(syllable) {
        return Some(m.start() + 2);
    }
    TONE_VOWELS.iter().find_map(|&v| {
        syllable
            .char_indices()
            .find(|(_, c)| c.eq_ignore_ascii_case(&v))
            .map(|(i, c)| i + c.len_utf8())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_takes_second_vowel() {
        assert_eq!(tone_offset("oan"), Some(2));
        assert_eq!(tone_offset("oeh"), Some(2));
        assert_eq!(tone_offset("OAN"), Some(2));
    }

    #[test]
    fn test_cluster_is_syllable_initial() {
        // Not initial, so the `o` priority rule applies.
        assert_eq!(tone_offset("hoan"), Some(2));
        assert_eq!(tone_offset("choa"), Some(3));
    }

    #[test]
    fn test_cluster_needs_following_letter() {
        // "oa" alone is not a cluster match; `o` wins.
        assert_eq!(tone_offset("oa"), Some(1));
    }

    #[test]
    fn test_priority_over_position() {
        // `a` outranks `i` even though `i` comes first.
        assert_eq!(tone_offset("kiau"), Some(3));
        // `o` outranks everything.
        assert_eq!(tone_offset("io"), Some(2));
        assert_eq!(tone_offset("pa"), Some(2));
    }

    #[test]
    fn test_syllabic_nasals() {
        assert_eq!(tone_offset("ng"), Some(1));
        assert_eq!(tone_offset("m"), Some(1));
        assert_eq!(tone_offset("hm"), Some(2));
    }

    #[test]
    fn test_case_insensitive_scan() {
        assert_eq!(tone_offset("PA"), Some(2));
        assert_eq!(tone_offset("chA"), Some(3));
    }

    #[test]
    fn test_no_tone_letter() {
        assert_eq!(tone_offset("chh"), None);
        assert_eq!(tone_offset(""), None);
    }

    #[test]
    fn test_tone_marks() {
        assert_eq!(Tone::from_digit('2').and_then(Tone::mark), Some('\u{0301}'));
        assert_eq!(Tone::from_digit('8').and_then(Tone::mark), Some('\u{030D}'));
        assert_eq!(Tone::from_digit('1').and_then(Tone::mark), None);
        assert_eq!(Tone::from_digit('4').and_then(Tone::mark), None);
        assert_eq!(Tone::from_digit('6'), None);
        assert_eq!(Tone::from_digit('x'), None);
    }
}
