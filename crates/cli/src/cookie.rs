//! `--cookie` argument decoding.

use crate::error::CliError;

/// Decodes a hex cookie. Whitespace is not accepted; an empty string yields
/// an empty cookie, which the hash call then rejects as too short.
pub(crate) fn parse_cookie_hex(text: &str) -> Result<Vec<u8>, CliError> {
    let digits = text.as_bytes();
    if digits.len() % 2 != 0 {
        return Err(CliError::InvalidCookie {
            reason: format!("odd number of hex digits ({})", digits.len()),
        });
    }

    digits
        .chunks_exact(2)
        .enumerate()
        .map(|(index, pair)| match (hex_value(pair[0]), hex_value(pair[1])) {
            (Some(high), Some(low)) => Ok((high << 4) | low),
            _ => Err(CliError::InvalidCookie {
                reason: format!("invalid hex digit near offset {}", index * 2),
            }),
        })
        .collect()
}

const fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_mixed_case() {
        assert_eq!(
            parse_cookie_hex("00ff10Ab").unwrap(),
            vec![0x00, 0xff, 0x10, 0xab]
        );
    }

    #[test]
    fn empty_input_is_empty_cookie() {
        assert!(parse_cookie_hex("").unwrap().is_empty());
    }

    #[test]
    fn rejects_odd_length() {
        let err = parse_cookie_hex("abc").unwrap_err();
        assert!(err.to_string().contains("odd number"));
    }

    #[test]
    fn rejects_non_hex_digit() {
        let err = parse_cookie_hex("00zz").unwrap_err();
        assert!(err.to_string().contains("offset 2"));
    }
}
