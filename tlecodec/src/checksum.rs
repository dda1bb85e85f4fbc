//! Modulo-10 line checksum
//!
//! Digits count their value, '-' counts one, everything else counts zero.
//! The sum runs over the 68 columns before the checksum digit.

use crate::{decode::DecodeError, CHECKSUM_COLUMN, LINE_LENGTH};

/// Checksum digit for the first 68 columns of `line`
pub fn tle_checksum(line: &str) -> Result<u8, DecodeError> {
    let b = line.as_bytes();
    let line_number = b.first().map(|c| c.wrapping_sub(b'0')).unwrap_or(0);
    if b.len() < CHECKSUM_COLUMN {
        return Err(DecodeError::TooShort {
            line: line_number,
            len: line.len(),
        });
    }
    check_characters(line, line_number)?;
    Ok(checksum_digit(&b[..CHECKSUM_COLUMN]))
}

pub(crate) fn checksum_digit(columns: &[u8]) -> u8 {
    let total: u32 = columns
        .iter()
        .map(|&c| match c {
            b'0'..=b'9' => u32::from(c - b'0'),
            b'-' => 1,
            _ => 0,
        })
        .sum();
    (total % 10) as u8
}

fn check_characters(line: &str, line_number: u8) -> Result<(), DecodeError> {
    let end = line.len().min(CHECKSUM_COLUMN);
    match line.as_bytes()[..end]
        .iter()
        .position(|&c| !(b' '..=b'z').contains(&c))
    {
        Some(idx) => Err(DecodeError::InvalidCharacter {
            line: line_number,
            column: idx + 1,
            found: line[idx..].chars().next().unwrap_or('\0'),
        }),
        None => Ok(()),
    }
}

/// Structural validation of one line, `Ok(true)` when the trailing
/// checksum digit matches
///
/// Lines must start with their line number and a space, hold only
/// printable characters up to the checksum, be at least 69 characters
/// long and carry nothing but whitespace after the checksum.
pub fn verify_line(line: &str, line_number: u8) -> Result<bool, DecodeError> {
    let b = line.as_bytes();
    if b.first() != Some(&(b'0' + line_number)) || b.get(1) != Some(&b' ') {
        return Err(DecodeError::WrongLineMarker { line: line_number });
    }

    check_characters(line, line_number)?;

    if b.len() < LINE_LENGTH {
        return Err(DecodeError::TooShort {
            line: line_number,
            len: line.len(),
        });
    }

    if b[LINE_LENGTH..].iter().any(|&c| c > b' ') {
        return Err(DecodeError::Unterminated { line: line_number });
    }

    let computed = checksum_digit(&b[..CHECKSUM_COLUMN]);
    match b[CHECKSUM_COLUMN] {
        c @ b'0'..=b'9' => Ok(c - b'0' == computed),
        b' ' => Ok(false),
        c => Err(DecodeError::InvalidCharacter {
            line: line_number,
            column: CHECKSUM_COLUMN + 1,
            found: line[CHECKSUM_COLUMN..].chars().next().unwrap_or(char::from(c)),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISS_L1: &str = "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
    const ISS_L2: &str = "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

    #[test]
    fn valid_lines() {
        assert_eq!(tle_checksum(ISS_L1), Ok(7));
        assert_eq!(tle_checksum(ISS_L2), Ok(7));
        assert_eq!(verify_line(ISS_L1, 1), Ok(true));
        assert_eq!(verify_line(ISS_L2, 2), Ok(true));
    }

    #[test]
    fn trailing_whitespace_is_allowed() {
        assert_eq!(verify_line(&format!("{ISS_L1}\r"), 1), Ok(true));
        assert_eq!(verify_line(&format!("{ISS_L1}   "), 1), Ok(true));
        assert_eq!(
            verify_line(&format!("{ISS_L1}0"), 1),
            Err(DecodeError::Unterminated { line: 1 })
        );
    }

    #[test]
    fn wrong_digit_is_a_mismatch() {
        let mut line = ISS_L1.to_owned();
        line.replace_range(68.., "3");
        assert_eq!(verify_line(&line, 1), Ok(false));
        line.replace_range(68.., " ");
        assert_eq!(verify_line(&line, 1), Ok(false));
    }

    #[test]
    fn every_single_digit_flip_is_detected() {
        for (idx, c) in ISS_L2.char_indices().take(CHECKSUM_COLUMN) {
            if idx < 2 || !c.is_ascii_digit() {
                continue;
            }
            let flipped = char::from(b'0' + (c as u8 - b'0' + 1) % 10);
            let mut line = ISS_L2.to_owned();
            line.replace_range(idx..idx + 1, &flipped.to_string());
            assert_eq!(verify_line(&line, 2), Ok(false), "column {}", idx + 1);
        }
    }

    #[test]
    fn structural_failures() {
        assert_eq!(
            verify_line(ISS_L2, 1),
            Err(DecodeError::WrongLineMarker { line: 1 })
        );
        assert_eq!(
            verify_line("1X25544U", 1),
            Err(DecodeError::WrongLineMarker { line: 1 })
        );
        assert_eq!(
            verify_line(&ISS_L1[..60], 1),
            Err(DecodeError::TooShort { line: 1, len: 60 })
        );

        let mut line = ISS_L1.to_owned();
        line.replace_range(10..11, "~");
        assert_eq!(
            verify_line(&line, 1),
            Err(DecodeError::InvalidCharacter {
                line: 1,
                column: 11,
                found: '~'
            })
        );

        let mut line = ISS_L1.to_owned();
        line.replace_range(20..21, "\t");
        assert!(matches!(
            verify_line(&line, 1),
            Err(DecodeError::InvalidCharacter { column: 21, .. })
        ));

        let mut line = ISS_L1.to_owned();
        line.replace_range(68.., "x");
        assert!(matches!(
            verify_line(&line, 1),
            Err(DecodeError::InvalidCharacter { column: 69, .. })
        ));
    }
}
