//! Validation for the jump-to-offset field.

use crate::error::OffsetInputError;

/// Parses a byte offset written in decimal or with a `0x` prefix in hexadecimal.
/// Signs, separators and other radix prefixes are rejected.
pub fn parse_offset(raw: &str) -> Result<u64, OffsetInputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(OffsetInputError::Empty);
    }

    let (digits, radix) = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => (hex, 16),
        None => (trimmed, 10),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(OffsetInputError::Malformed(trimmed.to_string()));
    }

    u64::from_str_radix(digits, radix).map_err(|_| OffsetInputError::Overflow(trimmed.to_string()))
}

pub fn check_in_range(offset: u64, data_len: usize) -> Result<u64, OffsetInputError> {
    if offset >= data_len as u64 {
        return Err(OffsetInputError::OutOfRange {
            offset,
            len: data_len,
        });
    }
    Ok(offset)
}

#[cfg(test)]
#[path = "tests/offset_tests.rs"]
mod tests;
