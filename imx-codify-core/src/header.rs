//! Image header: descriptor text codec and the 16-byte field layout.
//!
//! A header descriptor is the header written out as hex text, two digits
//! per byte, high nibble first. Only the first [`DESCRIPTOR_LEN`]
//! characters are consumed, so a trailing newline or comment is harmless.

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::layout::{
    CHECKSUM_OFFSET, CHECKSUM_RESERVED_OFFSET, DATE_OFFSET, DESCRIPTOR_LEN, HEADER_LEN,
    LENGTH_OFFSET, VERSION_OFFSET,
};

/// Raw header bytes, written verbatim at the start of the image.
pub type HeaderBytes = [u8; HEADER_LEN];

/// Decode the first [`DESCRIPTOR_LEN`] characters of `text` into header bytes.
pub fn decode_descriptor(text: &str) -> Result<HeaderBytes, DecodeError> {
    decode_descriptor_bytes(text.as_bytes())
}

/// Same as [`decode_descriptor`], for text that has not been checked for UTF-8.
pub fn decode_descriptor_bytes(text: &[u8]) -> Result<HeaderBytes, DecodeError> {
    if text.len() < DESCRIPTOR_LEN {
        return Err(DecodeError::too_short(DESCRIPTOR_LEN, text.len()));
    }

    let mut header = [0u8; HEADER_LEN];
    for (i, pair) in text[..DESCRIPTOR_LEN].chunks_exact(2).enumerate() {
        let hi = hex_nibble(pair[0], i * 2)?;
        let lo = hex_nibble(pair[1], i * 2 + 1)?;
        header[i] = (hi << 4) | lo;
    }
    Ok(header)
}

fn hex_nibble(c: u8, position: usize) -> Result<u8, DecodeError> {
    (c as char)
        .to_digit(16)
        .map(|d| d as u8)
        .ok_or(DecodeError::InvalidHexDigit { position, found: c })
}

/// Render header bytes as descriptor text (lowercase, no separators).
pub fn encode_descriptor(header: &HeaderBytes) -> String {
    header.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Calendar date stamped into the header.
///
/// The year is stored as two bytes, century then year-of-century, so 2019
/// becomes `20, 19`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildDate {
    pub day: u8,
    /// Calendar month, 1-12
    pub month: u8,
    pub year: u16,
}

impl BuildDate {
    /// Latest year the century and year-of-century bytes can hold.
    pub const MAX_YEAR: u16 = u8::MAX as u16 * 100 + 99;

    /// Build a date, clamping `year` to [`BuildDate::MAX_YEAR`].
    pub fn new(day: u8, month: u8, year: u16) -> Self {
        Self {
            day,
            month,
            year: year.min(Self::MAX_YEAR),
        }
    }
}

impl std::fmt::Display for BuildDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Firmware version carried in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FirmwareVersion {
    pub major: u8,
    pub minor: u8,
}

impl FirmwareVersion {
    pub fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
}

impl std::fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirmwareVersionParseError(pub String);

impl std::fmt::Display for FirmwareVersionParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid firmware version: '{}' (expected MAJOR.MINOR)", self.0)
    }
}

impl std::error::Error for FirmwareVersionParseError {}

impl std::str::FromStr for FirmwareVersion {
    type Err = FirmwareVersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || FirmwareVersionParseError(s.to_string());
        let (major, minor) = s.trim().split_once('.').ok_or_else(err)?;
        Ok(Self {
            major: major.parse().map_err(|_| err())?,
            minor: minor.parse().map_err(|_| err())?,
        })
    }
}

/// Structured view of the 16 header bytes.
///
/// | offset | field                              |
/// |--------|------------------------------------|
/// | 0..4   | payload length, u32 LE             |
/// | 4..6   | payload checksum, u16 LE           |
/// | 6..8   | reserved (zero)                    |
/// | 8..12  | build day, month, century, year    |
/// | 12..14 | firmware major, minor              |
/// | 14..16 | reserved (zero)                    |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImageHeader {
    pub payload_len: u32,
    pub checksum: u16,
    /// `None` when the date bytes are zero
    pub build_date: Option<BuildDate>,
    pub version: FirmwareVersion,
}

impl ImageHeader {
    pub fn from_bytes(bytes: &HeaderBytes) -> Self {
        let payload_len = u32::from_le_bytes([
            bytes[LENGTH_OFFSET],
            bytes[LENGTH_OFFSET + 1],
            bytes[LENGTH_OFFSET + 2],
            bytes[LENGTH_OFFSET + 3],
        ]);
        let checksum = u16::from_le_bytes([bytes[CHECKSUM_OFFSET], bytes[CHECKSUM_OFFSET + 1]]);

        let date = &bytes[DATE_OFFSET..DATE_OFFSET + 4];
        let build_date = if date[0] == 0 {
            None
        } else {
            Some(BuildDate {
                day: date[0],
                month: date[1],
                year: date[2] as u16 * 100 + date[3] as u16,
            })
        };

        Self {
            payload_len,
            checksum,
            build_date,
            version: FirmwareVersion {
                major: bytes[VERSION_OFFSET],
                minor: bytes[VERSION_OFFSET + 1],
            },
        }
    }

    pub fn to_bytes(&self) -> HeaderBytes {
        let mut bytes = [0u8; HEADER_LEN];
        bytes[LENGTH_OFFSET..LENGTH_OFFSET + 4].copy_from_slice(&self.payload_len.to_le_bytes());
        bytes[CHECKSUM_OFFSET..CHECKSUM_OFFSET + 2].copy_from_slice(&self.checksum.to_le_bytes());
        bytes[CHECKSUM_RESERVED_OFFSET] = 0;
        bytes[CHECKSUM_RESERVED_OFFSET + 1] = 0;
        if let Some(date) = self.build_date {
            bytes[DATE_OFFSET] = date.day;
            bytes[DATE_OFFSET + 1] = date.month;
            let year = date.year.min(BuildDate::MAX_YEAR);
            bytes[DATE_OFFSET + 2] = (year / 100) as u8;
            bytes[DATE_OFFSET + 3] = (year % 100) as u8;
        }
        bytes[VERSION_OFFSET] = self.version.major;
        bytes[VERSION_OFFSET + 1] = self.version.minor;
        bytes
    }

    pub fn to_descriptor(&self) -> String {
        encode_descriptor(&self.to_bytes())
    }
}

/// Overwrite the checksum field of raw header bytes in place.
pub fn embed_checksum(header: &mut HeaderBytes, checksum: u16) {
    header[CHECKSUM_OFFSET..CHECKSUM_OFFSET + 2].copy_from_slice(&checksum.to_le_bytes());
}

#[cfg(test)]
#[path = "tests/header_tests.rs"]
mod tests;
