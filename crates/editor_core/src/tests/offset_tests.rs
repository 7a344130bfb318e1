use super::*;

#[test]
fn accepts_decimal_and_hex() {
    assert_eq!(parse_offset("0"), Ok(0));
    assert_eq!(parse_offset(" 4096 "), Ok(4096));
    assert_eq!(parse_offset("0x1F"), Ok(31));
    assert_eq!(parse_offset("0XfF"), Ok(255));
}

#[test]
fn rejects_malformed_input() {
    assert_eq!(parse_offset(""), Err(OffsetInputError::Empty));
    assert_eq!(parse_offset("   "), Err(OffsetInputError::Empty));
    for raw in ["-1", "+5", "0x", "0x+1", "12ab", "1_000", "1.5", "0b101"] {
        assert_eq!(
            parse_offset(raw),
            Err(OffsetInputError::Malformed(raw.to_string())),
            "{raw} should be malformed"
        );
    }
}

#[test]
fn rejects_values_beyond_u64() {
    assert_eq!(
        parse_offset("18446744073709551616"),
        Err(OffsetInputError::Overflow("18446744073709551616".to_string()))
    );
    assert_eq!(parse_offset("0xFFFFFFFFFFFFFFFF"), Ok(u64::MAX));
}

#[test]
fn range_is_bounded_by_loaded_length() {
    assert_eq!(check_in_range(15, 16), Ok(15));
    assert_eq!(
        check_in_range(16, 16),
        Err(OffsetInputError::OutOfRange { offset: 16, len: 16 })
    );
}
