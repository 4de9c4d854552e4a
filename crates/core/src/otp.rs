//! One-time code rules for the second login step.
//!
//! Codes are not generated or delivered by this system; any well-formed code
//! is accepted once the password step has succeeded.

/// Required number of digits in a one-time code.
pub const CODE_LENGTH: usize = 6;

/// Default simulated dispatch delay for a one-time code (milliseconds).
pub const DEFAULT_SEND_DELAY_MS: u64 = 500;

/// A code is well-formed when it is exactly [`CODE_LENGTH`] ASCII decimal digits.
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_digits_are_accepted() {
        assert!(is_valid_code("123456"));
        assert!(is_valid_code("000000"));
    }

    #[test]
    fn letters_are_rejected() {
        assert!(!is_valid_code("12a456"));
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert!(!is_valid_code("12345"));
        assert!(!is_valid_code("1234567"));
        assert!(!is_valid_code(""));
    }

    #[test]
    fn non_ascii_digits_are_rejected() {
        // Arabic-Indic digits are numeric but not ASCII.
        assert!(!is_valid_code("١٢٣٤٥٦"));
        assert!(!is_valid_code(" 12345"));
    }
}
