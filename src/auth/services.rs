use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ApiError;

/// Usernames only need a minimum length; uniqueness is enforced by the store.
pub(crate) fn validate_username(username: &str) -> Result<(), ApiError> {
    if username.chars().count() < 3 {
        return Err(ApiError::validation(
            "Username must be at least 3 characters",
        ));
    }
    Ok(())
}

/// Password policy: at least 8 characters with one lowercase letter, one
/// uppercase letter and one digit.
pub(crate) fn validate_password(password: &str) -> Result<(), ApiError> {
    lazy_static! {
        static ref HAS_LOWER: Regex = Regex::new("[a-z]").unwrap();
        static ref HAS_UPPER: Regex = Regex::new("[A-Z]").unwrap();
        static ref HAS_DIGIT: Regex = Regex::new(r"\d").unwrap();
    }

    if password.chars().count() < 8 {
        return Err(ApiError::validation(
            "Password must be at least 8 characters",
        ));
    }
    if !HAS_LOWER.is_match(password)
        || !HAS_UPPER.is_match(password)
        || !HAS_DIGIT.is_match(password)
    {
        return Err(ApiError::validation(
            "Password must contain at least one lowercase letter, one uppercase letter, and one number",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_length() {
        assert!(validate_username("ab").is_err());
        assert!(validate_username("abc").is_ok());
        assert!(validate_username("a_longer_name").is_ok());
    }

    #[test]
    fn password_too_short() {
        assert!(validate_password("Ab1").is_err());
        assert!(validate_password("Abcdef1").is_err()); // 7 chars
    }

    #[test]
    fn password_missing_character_classes() {
        assert!(validate_password("alllowercase1").is_err()); // no uppercase
        assert!(validate_password("ALLUPPERCASE1").is_err()); // no lowercase
        assert!(validate_password("NoDigitsHere").is_err());
    }

    #[test]
    fn password_accepts_compliant_input() {
        assert!(validate_password("Abcdefg1").is_ok());
        assert!(validate_password("CorrectHorse7").is_ok());
    }
}
