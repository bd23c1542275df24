//! Parsing of silicon ID codes stored as strings.
//!
//! JSON has no hex literals, so `devices.json` stores ID codes as strings such
//! as `"0x41111043"`. The radix is detected from the usual integer-literal
//! prefixes: `0x`/`0X` for hex, a leading `0` for octal, decimal otherwise.

use crate::error::ParseError;

/// Parses an ID code string into a `u32`.
///
/// # Errors
///
/// Returns [`ParseError::InvalidIdcode`] if the string is empty, contains
/// digits invalid for the detected radix, or does not fit in 32 bits.
pub fn parse_idcode(s: &str) -> Result<u32, ParseError> {
    let trimmed = s.trim();
    let (digits, radix) = if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        (hex, 16)
    } else if trimmed.len() > 1 && trimmed.starts_with('0') {
        (&trimmed[1..], 8)
    } else {
        (trimmed, 10)
    };

    if digits.is_empty() {
        return Err(ParseError::InvalidIdcode {
            input: s.to_string(),
            reason: "no digits".to_string(),
        });
    }

    u32::from_str_radix(digits, radix).map_err(|e| ParseError::InvalidIdcode {
        input: s.to_string(),
        reason: e.to_string(),
    })
}

/// Formats an ID code as a zero-padded hex string, e.g. `0x41111043`.
pub fn format_idcode(idcode: u32) -> String {
    format!("0x{idcode:08x}")
}
