//! Short code generation and lexical checks.
//!
//! Codes are drawn uniformly from the 62-symbol alphanumeric alphabet using
//! the thread-local CSPRNG from `rand` (ChaCha, reseeded from the OS).

use rand::{Rng, distr::Alphanumeric};

/// Length of every generated short code.
pub const CODE_LENGTH: usize = 6;

/// Regular expression every short code matches.
pub const CODE_PATTERN: &str = r"^[A-Za-z0-9]{6}$";

/// Number of distinct codes of [`CODE_LENGTH`] (62^6).
pub const CODE_SPACE: u64 = 56_800_235_584;

/// Generates a random code of `length` characters from `[A-Za-z0-9]`.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(CODE_LENGTH);
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Returns true if `code` could have been produced by [`generate_code`]
/// with [`CODE_LENGTH`].
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn test_generate_code_has_requested_length() {
        assert_eq!(generate_code(CODE_LENGTH).len(), 6);
        assert_eq!(generate_code(12).len(), 12);
        assert_eq!(generate_code(0), "");
    }

    #[test]
    fn test_generate_code_matches_pattern() {
        let pattern = Regex::new(CODE_PATTERN).unwrap();
        for _ in 0..500 {
            let code = generate_code(CODE_LENGTH);
            assert!(pattern.is_match(&code), "unexpected code {code}");
            assert!(is_valid_code(&code));
        }
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let codes: HashSet<String> = (0..1000).map(|_| generate_code(CODE_LENGTH)).collect();
        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_generate_code_uses_whole_alphabet() {
        let mut seen: HashMap<char, usize> = HashMap::new();
        for c in (0..2000).flat_map(|_| generate_code(CODE_LENGTH).chars().collect::<Vec<_>>()) {
            *seen.entry(c).or_default() += 1;
        }

        assert!(seen.keys().any(|c| c.is_ascii_uppercase()));
        assert!(seen.keys().any(|c| c.is_ascii_lowercase()));
        assert!(seen.keys().any(|c| c.is_ascii_digit()));
        // 12000 draws over 62 symbols: every symbol shows up.
        assert_eq!(seen.len(), 62);
    }

    #[test]
    fn test_code_space() {
        assert_eq!(CODE_SPACE, 62u64.pow(CODE_LENGTH as u32));
    }

    #[test]
    fn test_is_valid_code() {
        assert!(is_valid_code("3tQ3Ta"));
        assert!(is_valid_code("ZZZZZZ"));
        assert!(is_valid_code("000000"));
        assert!(!is_valid_code("abc"));
        assert!(!is_valid_code("abcdefg"));
        assert!(!is_valid_code("abc-de"));
        assert!(!is_valid_code("abc_de"));
        assert!(!is_valid_code(""));
        assert!(!is_valid_code("abcdé"));
    }
}
