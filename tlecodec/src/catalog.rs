//! Catalog number field, all four numbering eras
//!
//! * Classic: "00000".."99999"
//! * Alpha-5: a leading letter (I and O skipped) for 100000..=339999
//! * Super-5 A: trailing non-digit, 340000..=906309663
//! * Super-5 B: trailing digit after a non-digit, 906309664..=1047867423
//!
//! The Super-5 forms use a 64 symbol alphabet: digits, A-Z, a-z, '+', '-'.

use crate::MAX_CATALOG_NUMBER;
use thiserror::Error;

const ALPHA5_START: u32 = 100_000;
const SUPER5A_START: u32 = 340_000;
const SUPER5B_START: u32 = SUPER5A_START + 905_969_664;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CatalogEra {
    Classic,
    Alpha5,
    Super5A,
    Super5B,
}

impl CatalogEra {
    /// The era whose range holds `n`, `None` past the last era
    pub fn of(n: u32) -> Option<Self> {
        match n {
            0..=99_999 => Some(CatalogEra::Classic),
            ALPHA5_START..=339_999 => Some(CatalogEra::Alpha5),
            SUPER5A_START..=906_309_663 => Some(CatalogEra::Super5A),
            SUPER5B_START..=MAX_CATALOG_NUMBER => Some(CatalogEra::Super5B),
            _ => None,
        }
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum CatalogNumberError {
    #[error("Catalog number field '{0}' is not 5 valid characters")]
    InvalidField(String),
    #[error("Catalog number {0} exceeds the largest encodable value 1047867423")]
    OutOfRange(u32),
}

fn base64_value(b: u8) -> Option<u32> {
    match b {
        b'0'..=b'9' => Some(u32::from(b - b'0')),
        b'A'..=b'Z' => Some(u32::from(b - b'A') + 10),
        b'a'..=b'z' => Some(u32::from(b - b'a') + 36),
        b'+' => Some(62),
        b'-' => Some(63),
        b' ' => Some(0),
        _ => None,
    }
}

fn base64_symbol(v: u32) -> u8 {
    const ALPHABET: &[u8; 64] =
        b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz+-";
    ALPHABET[(v & 63) as usize]
}

/// Alpha-5 leading character value, 0..=33
fn alpha5_value(b: u8) -> Option<u32> {
    match b {
        b' ' => Some(0),
        b'0'..=b'9' => Some(u32::from(b - b'0')),
        b'I' | b'O' => None,
        b'A'..=b'Z' => {
            let mut v = u32::from(b - b'A') + 10;
            if b > b'I' {
                v -= 1;
            }
            if b > b'O' {
                v -= 1;
            }
            Some(v)
        }
        _ => None,
    }
}

fn alpha5_symbol(v: u32) -> u8 {
    let mut offset = v - 10;
    if v >= 18 {
        offset += 1;
    }
    if v >= 23 {
        offset += 1;
    }
    b'A' + offset as u8
}

/// Decode the 5-character catalog number field
pub fn decode_catalog_number(field: &str) -> Result<u32, CatalogNumberError> {
    read_catalog_number(field).ok_or_else(|| CatalogNumberError::InvalidField(field.to_owned()))
}

pub(crate) fn read_catalog_number(field: &str) -> Option<u32> {
    let b = field.as_bytes();
    if b.len() != 5 {
        return None;
    }

    // Only a non-digit in the last two places selects a Super-5 range,
    // so an all-digit field is always classic
    let c4 = base64_value(b[4])?;
    let c3 = base64_value(b[3])?;
    if c4 > 9 {
        let (c0, c1, c2) = (base64_value(b[0])?, base64_value(b[1])?, base64_value(b[2])?);
        return Some(SUPER5A_START + (c4 - 10) + 54 * (c3 + (c2 << 6) + (c1 << 12) + (c0 << 18)));
    }
    if c3 > 9 {
        let (c0, c1, c2) = (base64_value(b[0])?, base64_value(b[1])?, base64_value(b[2])?);
        return Some(SUPER5B_START + c4 + (c3 - 10) * 10 + 540 * (c2 + (c1 << 6) + (c0 << 12)));
    }

    let lead = alpha5_value(b[0])?;
    let rest = crate::fields::read_uint(&field[1..])?;
    Some(lead * 10_000 + rest)
}

/// Encode a catalog number in the narrowest era that holds it
pub fn encode_catalog_number(n: u32) -> Result<String, CatalogNumberError> {
    let era = CatalogEra::of(n).ok_or(CatalogNumberError::OutOfRange(n))?;
    let s = match era {
        CatalogEra::Classic => format!("{n:05}"),
        CatalogEra::Alpha5 => format!("{}{:04}", char::from(alpha5_symbol(n / 10_000)), n % 10_000),
        CatalogEra::Super5A => {
            let m = n - SUPER5A_START;
            let q = m / 54;
            let digits = [q >> 18, q >> 12, q >> 6, q, 10 + m % 54];
            digits.iter().map(|&d| char::from(base64_symbol(d))).collect()
        }
        CatalogEra::Super5B => {
            let m = n - SUPER5B_START;
            let q = m / 540;
            let digits = [q >> 12, q >> 6, q, 10 + (m / 10) % 54, m % 10];
            digits.iter().map(|&d| char::from(base64_symbol(d))).collect()
        }
    };
    Ok(s)
}

/// International designator for objects without one, built from the
/// catalog number: launch "00", part letters from base 26.
///
/// The two launch digits are the base-26 quotient modulo 100, so catalog
/// numbers from 1,757,600 up wrap around instead of producing
/// non-digit characters.
pub fn analyst_designator(catalog_number: u32) -> String {
    let mut desig = [b'0'; 8];
    let mut n = catalog_number;
    for c in desig[5..].iter_mut().rev() {
        *c = b'A' + (n % 26) as u8;
        n /= 26;
    }
    desig[1] = b'0' + (n % 10) as u8;
    desig[0] = b'0' + ((n / 10) % 10) as u8;
    String::from_utf8_lossy(&desig).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic() {
        assert_eq!(decode_catalog_number("25544"), Ok(25544));
        assert_eq!(decode_catalog_number("00005"), Ok(5));
        assert_eq!(decode_catalog_number(" 1234"), Ok(1234));
        assert_eq!(encode_catalog_number(5).unwrap(), "00005");
        assert_eq!(encode_catalog_number(99_999).unwrap(), "99999");
    }

    #[test]
    fn alpha5() {
        assert_eq!(decode_catalog_number("A0000"), Ok(100_000));
        assert_eq!(decode_catalog_number("H9999"), Ok(179_999));
        assert_eq!(decode_catalog_number("J0000"), Ok(180_000));
        assert_eq!(decode_catalog_number("P0000"), Ok(230_000));
        assert_eq!(decode_catalog_number("Z9999"), Ok(339_999));
        assert!(decode_catalog_number("I0000").is_err());
        assert!(decode_catalog_number("O0000").is_err());
        assert!(decode_catalog_number("a0000").is_err());

        assert_eq!(encode_catalog_number(100_000).unwrap(), "A0000");
        assert_eq!(encode_catalog_number(180_000).unwrap(), "J0000");
        assert_eq!(encode_catalog_number(230_000).unwrap(), "P0000");
        assert_eq!(encode_catalog_number(339_999).unwrap(), "Z9999");
    }

    #[test]
    fn super5() {
        assert_eq!(encode_catalog_number(340_000).unwrap(), "0000A");
        assert_eq!(encode_catalog_number(906_309_663).unwrap(), "-----");
        assert_eq!(encode_catalog_number(906_309_664).unwrap(), "000A0");
        assert_eq!(encode_catalog_number(MAX_CATALOG_NUMBER).unwrap(), "----9");

        assert_eq!(decode_catalog_number("0000A"), Ok(340_000));
        assert_eq!(decode_catalog_number("-----"), Ok(906_309_663));
        assert_eq!(decode_catalog_number("000A0"), Ok(906_309_664));
        assert_eq!(decode_catalog_number("----9"), Ok(MAX_CATALOG_NUMBER));
    }

    #[test]
    fn out_of_range() {
        assert_eq!(
            encode_catalog_number(MAX_CATALOG_NUMBER + 1),
            Err(CatalogNumberError::OutOfRange(MAX_CATALOG_NUMBER + 1))
        );
        assert_eq!(CatalogEra::of(u32::MAX), None);
    }

    #[test]
    fn eras_partition_the_range() {
        let cases = [
            (0, CatalogEra::Classic),
            (99_999, CatalogEra::Classic),
            (100_000, CatalogEra::Alpha5),
            (339_999, CatalogEra::Alpha5),
            (340_000, CatalogEra::Super5A),
            (906_309_663, CatalogEra::Super5A),
            (906_309_664, CatalogEra::Super5B),
            (MAX_CATALOG_NUMBER, CatalogEra::Super5B),
        ];
        for (n, era) in cases {
            assert_eq!(CatalogEra::of(n), Some(era), "{n}");
            let field = encode_catalog_number(n).unwrap();
            assert_eq!(field.len(), 5);
            assert_eq!(decode_catalog_number(&field), Ok(n), "{field}");
        }
    }

    #[test]
    fn sampled_round_trip() {
        let mut n = 1_u32;
        while n < MAX_CATALOG_NUMBER {
            let field = encode_catalog_number(n).unwrap();
            assert_eq!(decode_catalog_number(&field), Ok(n), "{field}");
            n = n.saturating_mul(3).saturating_add(7).min(MAX_CATALOG_NUMBER);
            if n == MAX_CATALOG_NUMBER {
                break;
            }
        }
    }

    #[test]
    fn analyst_designators() {
        assert_eq!(analyst_designator(0), "00000AAA");
        assert_eq!(analyst_designator(1), "00000AAB");
        assert_eq!(analyst_designator(26), "00000ABA");
        // 88888 = 5 * 26^3 + 1 * 26^2 + 12 * 26 + 20
        assert_eq!(analyst_designator(88_888), "05000BMU");
        // Launch digits wrap at 100 * 26^3
        assert_eq!(analyst_designator(1_757_600), "00000AAA");
        assert_eq!(analyst_designator(1_047_867_423), "19000FTF");
    }
}
