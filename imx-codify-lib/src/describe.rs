//! Header descriptor generation.
//!
//! Builds the descriptor that [`crate::assemble`] later consumes: payload
//! length and checksum, build date and firmware version, packed into the
//! 16-byte layout of [`ImageHeader`] and written out as hex text.

use std::io::Write;
use std::path::Path;

use chrono::{Datelike, Local, NaiveDate};

use imx_codify_core::{
    BuildDate, ChecksumAlgorithm, FirmwareVersion, HeaderBytes, ImageHeader, PAYLOAD_SKIP,
    encode_descriptor,
};

use crate::error::CodifyError;
use crate::files::{read_payload, write_atomically};

/// Options that control descriptor generation.
#[derive(Debug, Clone)]
pub struct DescribeOptions {
    /// Leading payload bytes to drop, same as the assembler's skip.
    pub payload_skip: u64,
    pub algorithm: ChecksumAlgorithm,
    /// Date stamped into the header; `None` leaves the date bytes zero.
    pub build_date: Option<NaiveDate>,
    pub version: FirmwareVersion,
}

impl Default for DescribeOptions {
    fn default() -> Self {
        Self {
            payload_skip: PAYLOAD_SKIP,
            algorithm: ChecksumAlgorithm::default(),
            build_date: Some(Local::now().date_naive()),
            version: FirmwareVersion::new(1, 0),
        }
    }
}

/// Convert a calendar date into the header's date fields.
pub fn build_date_from(date: NaiveDate) -> BuildDate {
    BuildDate::new(
        date.day() as u8,
        date.month() as u8,
        date.year().clamp(0, u16::MAX as i32) as u16,
    )
}

/// Read a payload the way the assembler will and describe it.
pub fn describe_payload(
    payload_path: &Path,
    options: &DescribeOptions,
) -> Result<ImageHeader, CodifyError> {
    let payload = read_payload(payload_path, options.payload_skip)?;
    let payload_len = u32::try_from(payload.len()).map_err(|_| CodifyError::PayloadTooLarge {
        path: payload_path.to_path_buf(),
        actual: payload.len() as u64,
    })?;

    let header = ImageHeader {
        payload_len,
        checksum: options.algorithm.compute(&payload),
        build_date: options.build_date.map(build_date_from),
        version: options.version,
    };
    log::debug!(
        "Described {}: {} bytes, {} 0x{:04X}",
        payload_path.display(),
        header.payload_len,
        options.algorithm,
        header.checksum
    );
    Ok(header)
}

/// Write header bytes as descriptor text (32 lowercase hex characters).
pub fn write_descriptor(path: &Path, header: &HeaderBytes) -> Result<(), CodifyError> {
    let text = encode_descriptor(header);
    write_atomically(path, |out: &mut dyn Write| out.write_all(text.as_bytes()))
        .map_err(|e| CodifyError::descriptor_write(path, e))
}
