//! Decimal argument parsing

use super::error::CommandError;

/// Longest accepted numeric argument, in characters
pub const MAX_NUMBER_LEN: usize = 10;

/// Parse an unsigned decimal argument
///
/// Only ASCII digits are accepted: no sign, no whitespace, no prefix.
/// Malformed text is [`CommandError::InvalidValue`]; a well-formed number
/// that does not fit `u32` is [`CommandError::OutOfRange`].
pub fn parse_decimal(text: &str) -> Result<u32, CommandError> {
    if text.is_empty() || text.len() > MAX_NUMBER_LEN {
        return Err(CommandError::InvalidValue);
    }
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CommandError::InvalidValue);
    }

    // Ten digits always fit u64
    let value = text
        .bytes()
        .fold(0u64, |acc, b| acc * 10 + (b - b'0') as u64);
    u32::try_from(value).map_err(|_| CommandError::OutOfRange)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_numbers() {
        assert_eq!(parse_decimal("0"), Ok(0));
        assert_eq!(parse_decimal("250"), Ok(250));
        assert_eq!(parse_decimal("007"), Ok(7));
        assert_eq!(parse_decimal("4294967295"), Ok(u32::MAX));
    }

    #[test]
    fn test_rejects_malformed() {
        for text in ["", "abc", "-5", "+5", "12a", " 1", "1.5", "0x10"] {
            assert_eq!(parse_decimal(text), Err(CommandError::InvalidValue), "{:?}", text);
        }
    }

    #[test]
    fn test_rejects_too_long() {
        assert_eq!(parse_decimal("99999999999"), Err(CommandError::InvalidValue));
    }

    #[test]
    fn test_above_u32() {
        assert_eq!(parse_decimal("4294967296"), Err(CommandError::OutOfRange));
        assert_eq!(parse_decimal("9999999999"), Err(CommandError::OutOfRange));
    }
}
