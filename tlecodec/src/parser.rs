//! Splits TLE text files into entries
//!
//! Accepts both the bare two-line form and the three-line form with a
//! title line (optionally prefixed "0 ", as space-track writes it).
//! Blank lines between entries are skipped.

use crate::{
    decode::{decode, DecodeError, Decoded},
    fields::Field,
};
use nom::{
    branch::alt,
    character::complete::{line_ending, not_line_ending, space0},
    combinator::{eof, opt, recognize, verify},
    error::ErrorKind,
    multi::{fold_many0, many0_count},
    sequence::{pair, terminated},
};
use tletypes::prelude::*;
use tracing::warn;

pub type Result<I, O, E = ParseError<I>> = std::result::Result<(I, O), nom::Err<E>>;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ParseError<I> {
    #[error("Malformed {0} field")]
    Field(Field),
    #[error("Parse error")]
    Nom(I, ErrorKind),
}

/// Decoding for entries produced by [`parse_tle_set`]
pub trait RawTleExt {
    fn decode(&self) -> std::result::Result<Decoded, DecodeError>;
}

impl RawTleExt for RawTle {
    fn decode(&self) -> std::result::Result<Decoded, DecodeError> {
        decode(&self.line1, &self.line2)
    }
}

/// Parse every entry in `set`, in file order. Parsing stops at the first
/// text that is not an entry; that text is returned as the remainder.
pub fn parse_tle_set(set: &str) -> Result<&str, Vec<RawTle>> {
    let (s, _) = blank_lines(set)?;
    let (s, tle_set) = fold_many0(
        terminated(tle, blank_lines),
        Vec::new,
        |mut tle_set: Vec<RawTle>, tle| {
            tle_set.push(tle);
            tle_set
        },
    )(s)?;
    Ok((s, tle_set))
}

/// Parse and decode every entry in `set`. Entries that fail to decode
/// are logged and skipped.
pub fn decode_tle_set(set: &str) -> Vec<(RawTle, Decoded)> {
    let (rest, tle_set) = match parse_tle_set(set) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!(error = %e, "Failed to split TLE set");
            return Vec::new();
        }
    };
    if !rest.trim().is_empty() {
        warn!(
            remaining_bytes = rest.len(),
            "Ignoring trailing text that is not a TLE entry"
        );
    }

    tle_set
        .into_iter()
        .filter_map(|tle| match tle.decode() {
            Ok(decoded) => Some((tle, decoded)),
            Err(e) => {
                warn!(name = ?tle.name, error = %e, "Skipping undecodable TLE");
                None
            }
        })
        .collect()
}

fn tle(s: &str) -> Result<&str, RawTle> {
    let (s, name) = opt(title_line)(s)?;
    let (s, line1) = element_line('1')(s)?;
    let (s, line2) = element_line('2')(s)?;
    let tle = RawTle::new(line1, line2);
    let tle = match name {
        Some(name) => tle.with_name(name),
        None => tle,
    };
    Ok((s, tle))
}

/// One line without its terminator; the last line may end at end of input
fn line(s: &str) -> Result<&str, &str> {
    let (s, text) = not_line_ending(s)?;
    let (s, _) = alt((line_ending, eof))(s)?;
    Ok((s, text))
}

fn is_element_line(text: &str, marker: char) -> bool {
    let mut chars = text.chars();
    chars.next() == Some(marker) && chars.next() == Some(' ')
}

fn element_line(marker: char) -> impl FnMut(&str) -> Result<&str, &str> {
    move |s| {
        let (s, text) = verify(line, |text: &str| is_element_line(text, marker))(s)?;
        Ok((s, text.trim_end()))
    }
}

fn title_line(s: &str) -> Result<&str, String> {
    let (s, text) = verify(line, |text: &str| {
        !text.trim().is_empty() && !is_element_line(text, '1')
    })(s)?;
    let text = text.trim();
    let text = text.strip_prefix("0 ").unwrap_or(text);
    Ok((s, text.trim_start().to_string()))
}

fn blank_lines(s: &str) -> Result<&str, usize> {
    many0_count(recognize(pair(space0, line_ending)))(s)
}

impl<I> nom::error::ParseError<I> for ParseError<I> {
    fn from_error_kind(s: I, kind: ErrorKind) -> Self {
        ParseError::Nom(s, kind)
    }

    fn append(_: I, _: ErrorKind, other: Self) -> Self {
        other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const TWO_LINE: &str = indoc! {r#"
        1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927
        2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537
        1 00005U 58002B   00179.78495062  .00000023  00000-0  28098-4 0  4753
        2 00005  34.2682 348.7242 1859667 331.7664  19.3264 10.82419157413667
    "#};

    const THREE_LINE: &str = indoc! {r#"
        0 ISS (ZARYA)
        1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927
        2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537

        VANGUARD 1
        1 00005U 58002B   00179.78495062  .00000023  00000-0  28098-4 0  4753
        2 00005  34.2682 348.7242 1859667 331.7664  19.3264 10.82419157413667"#};

    #[test]
    fn two_line_set() {
        let (rest, set) = parse_tle_set(TWO_LINE).unwrap();
        assert_eq!(rest, "");
        assert_eq!(set.len(), 2);
        assert_eq!(set[0].name, None);
        assert!(set[1].line1.starts_with("1 00005U"));
        assert!(set[1].line2.ends_with("413667"));
    }

    #[test]
    fn three_line_set_without_final_newline() {
        let (rest, set) = parse_tle_set(THREE_LINE).unwrap();
        assert_eq!(rest, "");
        assert_eq!(set.len(), 2);
        assert_eq!(set[0].name.as_deref(), Some("ISS (ZARYA)"));
        assert_eq!(set[1].name.as_deref(), Some("VANGUARD 1"));
        assert_eq!(set[1].line2.len(), 69);
    }

    #[test]
    fn crlf_line_endings() {
        let crlf = TWO_LINE.replace('\n', "\r\n");
        let (rest, set) = parse_tle_set(&crlf).unwrap();
        assert_eq!(rest, "");
        assert_eq!(set.len(), 2);
        assert_eq!(set[0].line1.len(), 69);
    }

    #[test]
    fn stops_at_garbage() {
        let text = format!("{TWO_LINE}not a tle\n");
        let (rest, set) = parse_tle_set(&text).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(rest, "not a tle\n");
    }

    #[test]
    fn decodes_set_skipping_bad_entries() {
        let text = format!(
            "{TWO_LINE}{}",
            indoc! {r#"
            BROKEN
            1 99999U
            2 99999
            "#}
        );
        let decoded = decode_tle_set(&text);
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].1.elements.catalog_number, 25544);
        assert_eq!(decoded[1].1.elements.catalog_number, 5);
    }
}
