//! Codec for NORAD two-line element sets
//!
//! Handles all four catalog numbering eras (classic, Alpha-5 and both
//! Super-5 ranges) and the state-vector 'H' extension used for orbits
//! beyond the reach of the analytic models.

pub use crate::catalog::{
    analyst_designator, decode_catalog_number, encode_catalog_number, CatalogEra,
    CatalogNumberError,
};
pub use crate::checksum::{tle_checksum, verify_line};
pub use crate::decode::{decode, ChecksumStatus, DecodeError, Decoded};
pub use crate::encode::{encode, EncodeError};
pub use crate::fields::Field;
pub use crate::parser::{
    decode_tle_set, parse_tle_set, ParseError, RawTleExt,
};

pub mod catalog;
pub mod checksum;
pub mod decode;
pub mod encode;
pub mod fields;
pub mod parser;

/// Length of a TLE line up to and including the checksum digit
pub const LINE_LENGTH: usize = 69;

/// Column (0-based) of the checksum digit
pub const CHECKSUM_COLUMN: usize = 68;

/// Largest catalog number representable in the 5-character field
pub const MAX_CATALOG_NUMBER: u32 = 1_047_867_423;
