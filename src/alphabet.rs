//! The protein alphabet accepted by the validator.
//!
//! Twenty standard amino-acid letters plus the gap character `-`. Input is
//! case-insensitive; everything downstream works on uppercase.

use std::sync::LazyLock;

use regex::Regex;

/// Accepted characters, uppercase.
pub const ALPHABET: &str = "ARNDCEQGHILKMFPSTWYV-";

static SEQUENCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ARNDCEQGHILKMFPSTWYVarndceqghilkmfpstwyv-]+$")
        .expect("alphabet pattern is a valid regex")
});

/// Returns true if every character of `raw` is in the alphabet (any case).
///
/// Only ASCII letters match: characters that fold to a letter under Unicode
/// case rules (Kelvin sign, long s) are rejected. The empty string does not
/// match.
pub fn matches_alphabet(raw: &str) -> bool {
    SEQUENCE_PATTERN.is_match(raw)
}

/// Canonical uppercase form used for processing and display.
///
/// ASCII-only, so the character count never changes.
pub fn normalize(raw: &str) -> String {
    raw.to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_letters_accepted() {
        assert!(matches_alphabet(ALPHABET));
        assert!(matches_alphabet(&ALPHABET.to_lowercase()));
        for c in ALPHABET.chars() {
            assert!(matches_alphabet(&c.to_string()), "{c} should be accepted");
        }
    }

    #[test]
    fn test_foreign_characters_rejected() {
        assert!(!matches_alphabet(""));
        assert!(!matches_alphabet("ARNB"));
        assert!(!matches_alphabet("AR ND"));
        assert!(!matches_alphabet("ARND\n"));
        assert!(!matches_alphabet("AЯND"));
        assert!(!matches_alphabet("X"));
        assert!(!matches_alphabet("*"));
    }

    #[test]
    fn test_unicode_case_folding_rejected() {
        // Kelvin sign folds to 'k', long s folds to 's'
        assert!(!matches_alphabet("\u{212A}"));
        assert!(!matches_alphabet("\u{017F}"));
        assert!(!matches_alphabet("AR\u{212A}D"));
        assert!(!matches_alphabet("\u{0131}")); // Dotless i
    }

    #[test]
    fn test_normalize_keeps_length() {
        assert_eq!(normalize("maß"), "MAß");
        assert_eq!(normalize("\u{212A}").chars().count(), 1);
    }

    #[test]
    fn test_mixed_case() {
        assert!(matches_alphabet("aRnD-v"));
        assert_eq!(normalize("aRnD-v"), "ARND-V");
    }
}
