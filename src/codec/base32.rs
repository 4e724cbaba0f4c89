//! Base-32 digits for action codes.
//!
//! Digits use the RFC 4648 alphabet, most significant digit first. Codes
//! are one digit (5 bits) or two digits (10 bits) long.

pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

fn digit(value: u32) -> char {
    char::from(ALPHABET.as_bytes()[(value & 0b1_1111) as usize])
}

fn value_of(c: char) -> Option<u32> {
    ALPHABET.find(c).map(|index| index as u32)
}

/// Whether every character of `code` is a digit. The empty string is valid.
#[must_use]
pub fn is_valid(code: &str) -> bool {
    code.chars().all(|c| value_of(c).is_some())
}

#[must_use]
pub fn encode_bits5(value: u32) -> String {
    assert!(value < 1 << 5, "Value does not fit in 5 bits");
    digit(value).to_string()
}

#[must_use]
pub fn encode_bits10(value: u32) -> String {
    assert!(value < 1 << 10, "Value does not fit in 10 bits");
    [digit(value >> 5), digit(value)].into_iter().collect()
}

/// Value of a code, or `None` if it is empty, too long or holds a
/// non-digit.
#[must_use]
pub fn decode(code: &str) -> Option<u32> {
    if code.is_empty() || code.len() > 2 {
        return None;
    }
    code.chars()
        .try_fold(0, |acc, c| value_of(c).map(|v| acc << 5 | v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_digits() {
        assert_eq!(encode_bits5(0), "A");
        assert_eq!(encode_bits5(25), "Z");
        assert_eq!(encode_bits5(26), "2");
        assert_eq!(encode_bits5(31), "7");
        assert_eq!(decode("7"), Some(31));
    }

    #[test]
    fn test_two_digits() {
        assert_eq!(encode_bits10(4), "AE");
        assert_eq!(encode_bits10(1023), "77");
        assert_eq!(decode("AE"), Some(4));
        assert_eq!(decode("BA"), Some(32));
    }

    #[test]
    fn test_invalid() {
        assert!(is_valid("AZ27"));
        assert!(!is_valid("a"));
        assert!(!is_valid("18"));
        assert_eq!(decode(""), None);
        assert_eq!(decode("AAA"), None);
        assert_eq!(decode("A1"), None);
    }

    #[test]
    #[should_panic(expected = "Value does not fit in 5 bits")]
    fn test_five_bit_overflow() {
        let _ = encode_bits5(32);
    }
}
