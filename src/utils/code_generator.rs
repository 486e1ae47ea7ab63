//! Short code drawing and custom code validation.
//!
//! Random codes come from a caller-supplied RNG so generation stays
//! reproducible under a fixed seed.

use crate::error::AppError;
use rand::{Rng, RngCore};
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Symbols used for random codes: upper, lower, digit.
pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of randomly drawn codes.
pub const CODE_LENGTH: usize = 6;

/// Longest accepted custom code.
pub const MAX_CUSTOM_CODE_LENGTH: usize = 32;

/// Codes that would shadow service endpoints.
const RESERVED_CODES: &[&str] = &["api", "health"];

static CUSTOM_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Draws a [`CODE_LENGTH`]-character code uniformly from [`ALPHABET`].
///
/// # Examples
///
/// ```ignore
/// let mut rng = StdRng::seed_from_u64(7);
/// let code = draw_code(&mut rng);
/// assert_eq!(code.len(), 6);
/// ```
pub fn draw_code<R: RngCore>(rng: &mut R) -> String {
    (0..CODE_LENGTH)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Length: 1-32 characters
/// - Allowed characters: ASCII letters, digits, `-` and `_`
/// - Cannot be a reserved path segment
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.is_empty() || code.len() > MAX_CUSTOM_CODE_LENGTH {
        return Err(AppError::bad_request(
            "Custom code must be 1-32 characters",
            json!({ "provided_length": code.len() }),
        ));
    }

    if !CUSTOM_CODE_REGEX.is_match(code) {
        return Err(AppError::bad_request(
            "Custom code can only contain letters, digits, hyphens and underscores",
            json!({ "code": code }),
        ));
    }

    if RESERVED_CODES.iter().any(|r| r.eq_ignore_ascii_case(code)) {
        return Err(AppError::bad_request(
            "This code is reserved",
            json!({ "code": code }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_alphabet_has_62_unique_symbols() {
        assert_eq!(ALPHABET.len(), 62);
        let unique: HashSet<_> = ALPHABET.iter().collect();
        assert_eq!(unique.len(), 62);
    }

    #[test]
    fn test_draw_code_has_correct_length() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(draw_code(&mut rng).len(), CODE_LENGTH);
    }

    #[test]
    fn test_draw_code_uses_alphabet_only() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..200 {
            let code = draw_code(&mut rng);
            assert!(code.bytes().all(|b| ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn test_draw_code_is_deterministic_under_seed() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            assert_eq!(draw_code(&mut a), draw_code(&mut b));
        }
    }

    #[test]
    fn test_draw_code_produces_distinct_codes() {
        let mut rng = StdRng::seed_from_u64(3);
        let codes: HashSet<_> = (0..1000).map(|_| draw_code(&mut rng)).collect();
        assert!(codes.len() > 990);
    }

    #[test]
    fn test_validate_short_custom_code() {
        assert!(validate_custom_code("abc123").is_ok());
        assert!(validate_custom_code("x").is_ok());
    }

    #[test]
    fn test_validate_mixed_case_and_separators() {
        assert!(validate_custom_code("My_Link-2024").is_ok());
    }

    #[test]
    fn test_validate_maximum_length() {
        assert!(validate_custom_code(&"a".repeat(32)).is_ok());
        assert!(validate_custom_code(&"a".repeat(33)).is_err());
    }

    #[test]
    fn test_validate_empty_string() {
        let err = validate_custom_code("").unwrap_err();
        assert!(err.to_string().contains("1-32 characters"));
    }

    #[test]
    fn test_validate_rejects_path_characters() {
        assert!(validate_custom_code("a/b").is_err());
        assert!(validate_custom_code("a?b").is_err());
        assert!(validate_custom_code("my code").is_err());
    }

    #[test]
    fn test_validate_reserved_codes() {
        for &reserved in RESERVED_CODES {
            assert!(
                validate_custom_code(reserved).is_err(),
                "Reserved code '{}' should be invalid",
                reserved
            );
        }
        assert!(validate_custom_code("API").is_err());
    }
}
