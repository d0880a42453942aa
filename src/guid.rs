//! Textual device-class GUID parsing.
//!
//! Only the registry form is accepted: `{xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx}`,
//! optionally surrounded by whitespace. Malformed input is a terminal error
//! and is never silently defaulted.

use std::error::Error;
use std::fmt::{self, Display};
use windows_sys::core::GUID;

/// Parses a curly-braced, hyphenated hexadecimal GUID string.
///
/// Leading and trailing whitespace is trimmed before parsing, so padding
/// never changes the resulting identifier. Hex digit case is ignored.
pub fn parse(text: &str) -> Result<GUID, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    let inner = trimmed
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .ok_or(ParseError::MissingBraces)?;

    // 8-4-4-4-12 hex digit groups; the count is checked before any group is
    // inspected so a wrong shape never reports a group-level error
    let groups: Vec<&str> = inner.split('-').collect();
    let [g1, g2, g3, g4, g5] = groups[..] else {
        return Err(ParseError::BadGroupCount);
    };
    let data1 = hex_group(g1, 8)?;
    let data2 = hex_group(g2, 4)?;
    let data3 = hex_group(g3, 4)?;
    let node_hi = hex_group(g4, 4)?;
    let node_lo = hex_group(g5, 12)?;

    let mut data4 = [0u8; 8];
    data4[0] = (node_hi >> 8) as u8;
    data4[1] = node_hi as u8;
    for (i, byte) in data4[2..].iter_mut().enumerate() {
        *byte = (node_lo >> (8 * (5 - i))) as u8;
    }

    Ok(GUID {
        data1: data1 as u32,
        data2: data2 as u16,
        data3: data3 as u16,
        data4,
    })
}

fn hex_group(group: &str, len: usize) -> Result<u64, ParseError> {
    if group.len() != len {
        return Err(ParseError::BadGroupLength);
    }
    let mut value = 0u64;
    for c in group.chars() {
        let digit = c.to_digit(16).ok_or(ParseError::BadHexDigit)?;
        value = value << 4 | digit as u64;
    }
    Ok(value)
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    MissingBraces,
    BadGroupCount,
    BadGroupLength,
    BadHexDigit,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "the identifier is empty"),
            ParseError::MissingBraces => {
                write!(f, "the identifier is not enclosed in curly braces")
            }
            ParseError::BadGroupCount => {
                write!(f, "expected five hyphen-separated hex digit groups")
            }
            ParseError::BadGroupLength => {
                write!(f, "a hex digit group has the wrong length")
            }
            ParseError::BadHexDigit => {
                write!(f, "the identifier contains a non-hexadecimal character")
            }
        }
    }
}

impl Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "{12345678-1234-5678-9abc-123456789abc}";

    fn fields(guid: &GUID) -> (u32, u16, u16, [u8; 8]) {
        (guid.data1, guid.data2, guid.data3, guid.data4)
    }

    #[test]
    fn parses_braced_form() {
        let guid = parse(TEXT).unwrap();
        assert_eq!(
            fields(&guid),
            (
                0x12345678,
                0x1234,
                0x5678,
                [0x9a, 0xbc, 0x12, 0x34, 0x56, 0x78, 0x9a, 0xbc]
            )
        );
    }

    #[test]
    fn whitespace_padding_is_ignored() {
        let plain = parse(TEXT).unwrap();
        let padded = parse(&format!("  \t{TEXT} \n")).unwrap();
        assert_eq!(fields(&plain), fields(&padded));
    }

    #[test]
    fn hex_digit_case_is_ignored() {
        let lower = parse(TEXT).unwrap();
        let upper = parse(&TEXT.to_uppercase()).unwrap();
        assert_eq!(fields(&lower), fields(&upper));
    }

    #[test]
    fn empty_input_is_malformed() {
        assert!(matches!(parse(""), Err(ParseError::Empty)));
        assert!(matches!(parse("   \t "), Err(ParseError::Empty)));
    }

    #[test]
    fn missing_braces_are_malformed() {
        assert!(matches!(
            parse("12345678-1234-5678-9abc-123456789abc"),
            Err(ParseError::MissingBraces)
        ));
        assert!(matches!(
            parse("{12345678-1234-5678-9abc-123456789abc"),
            Err(ParseError::MissingBraces)
        ));
        assert!(matches!(
            parse("12345678-1234-5678-9abc-123456789abc}"),
            Err(ParseError::MissingBraces)
        ));
    }

    #[test]
    fn wrong_group_count_is_malformed() {
        assert!(matches!(
            parse("{12345678-1234-5678-9abc}"),
            Err(ParseError::BadGroupCount)
        ));
        assert!(matches!(
            parse("{12345678-1234-5678-9abc-1234-56789abc}"),
            Err(ParseError::BadGroupCount)
        ));
        // the count decides even when the stray groups also have bad lengths
        assert!(matches!(
            parse("{1234-1234-5678-9abc-1234-56789abc}"),
            Err(ParseError::BadGroupCount)
        ));
    }

    #[test]
    fn wrong_group_length_is_malformed() {
        assert!(matches!(
            parse("{1234567-1234-5678-9abc-123456789abc}"),
            Err(ParseError::BadGroupLength)
        ));
        assert!(matches!(
            parse("{12345678-1234-5678-9abc-123456789abcd}"),
            Err(ParseError::BadGroupLength)
        ));
    }

    #[test]
    fn non_hex_digits_are_malformed() {
        assert!(matches!(
            parse("{1234567g-1234-5678-9abc-123456789abc}"),
            Err(ParseError::BadHexDigit)
        ));
    }
}
