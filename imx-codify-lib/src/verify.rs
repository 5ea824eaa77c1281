//! Read-back check of a codified image.

use std::fs;
use std::path::{Path, PathBuf};

use imx_codify_core::{ChecksumAlgorithm, HEADER_LEN, HeaderBytes, ImageHeader};

use crate::error::CodifyError;

/// Outcome of checking an image against its own header.
#[derive(Debug, Clone)]
pub struct VerifyReport {
    pub image_path: PathBuf,
    pub header: ImageHeader,
    /// Bytes following the header
    pub payload_len: u64,
    pub algorithm: ChecksumAlgorithm,
    /// Checksum recomputed over the payload
    pub computed: u16,
}

impl VerifyReport {
    pub fn length_ok(&self) -> bool {
        self.header.payload_len as u64 == self.payload_len
    }

    pub fn checksum_ok(&self) -> bool {
        self.header.checksum == self.computed
    }

    pub fn is_valid(&self) -> bool {
        self.length_ok() && self.checksum_ok()
    }
}

/// Parse an image's header and recompute the payload checksum.
///
/// Only I/O problems and images too small to hold a header are errors; a
/// mismatch is reported through [`VerifyReport::is_valid`].
pub fn verify_image(
    image_path: &Path,
    algorithm: ChecksumAlgorithm,
) -> Result<VerifyReport, CodifyError> {
    let image = fs::read(image_path).map_err(|e| CodifyError::image_read(image_path, e))?;
    if image.len() < HEADER_LEN {
        return Err(CodifyError::ImageTooShort {
            path: image_path.to_path_buf(),
            expected: HEADER_LEN as u64,
            actual: image.len() as u64,
        });
    }

    let (head, payload) = image.split_at(HEADER_LEN);
    let mut header_bytes: HeaderBytes = [0u8; HEADER_LEN];
    header_bytes.copy_from_slice(head);

    let report = VerifyReport {
        image_path: image_path.to_path_buf(),
        header: ImageHeader::from_bytes(&header_bytes),
        payload_len: payload.len() as u64,
        algorithm,
        computed: algorithm.compute(payload),
    };
    log::debug!(
        "Verified {}: header says {} bytes / 0x{:04X}, found {} bytes / 0x{:04X}",
        image_path.display(),
        report.header.payload_len,
        report.header.checksum,
        report.payload_len,
        report.computed
    );
    Ok(report)
}

#[cfg(test)]
#[path = "tests/verify_tests.rs"]
mod tests;
