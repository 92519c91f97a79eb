//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Username length bounds
pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 32;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email regex"));

static USERNAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("invalid username regex"));

/// Check if a string is not empty after trimming
pub fn not_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Check if a string length is within bounds (inclusive)
pub fn length_between(value: &str, min: usize, max: usize) -> bool {
    let len = value.chars().count();
    len >= min && len <= max
}

/// Check if an email address has a plausible shape
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Check if a username is acceptable: bounded length, word characters only
pub fn is_valid_username(username: &str) -> bool {
    length_between(username, MIN_USERNAME_LENGTH, MAX_USERNAME_LENGTH)
        && USERNAME_PATTERN.is_match(username)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("alice@example.com"));
        assert!(is_valid_email("a.b+c@sub.domain.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("spaces in@example.com"));
    }

    #[test]
    fn test_username_validation() {
        assert!(is_valid_username("alice"));
        assert!(is_valid_username("bob_42"));
        assert!(!is_valid_username("ab")); // too short
        assert!(!is_valid_username("has space"));
        assert!(!is_valid_username(&"x".repeat(33)));
    }

    #[test]
    fn test_not_empty() {
        assert!(not_empty("title"));
        assert!(!not_empty("   "));
    }
}
