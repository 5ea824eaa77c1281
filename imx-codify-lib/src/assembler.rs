//! Image codification: `header ‖ payload` written as one file.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use imx_codify_core::header::embed_checksum;
use imx_codify_core::{ChecksumAlgorithm, HEADER_LEN, HeaderBytes, PAYLOAD_SKIP};

use crate::error::CodifyError;
use crate::files::{read_descriptor, read_payload, write_atomically};

/// What happens to the payload checksum once it is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChecksumPlacement {
    /// Returned in the report only; the header is written as decoded
    #[default]
    Report,
    /// Also written little-endian into the header's checksum field
    Header,
}

/// Options that control how an image is assembled.
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    /// Leading payload bytes to drop before codifying.
    pub payload_skip: u64,
    pub algorithm: ChecksumAlgorithm,
    pub placement: ChecksumPlacement,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            payload_skip: PAYLOAD_SKIP,
            algorithm: ChecksumAlgorithm::default(),
            placement: ChecksumPlacement::default(),
        }
    }
}

impl AssembleOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn payload_skip(mut self, skip: u64) -> Self {
        self.payload_skip = skip;
        self
    }

    pub fn algorithm(mut self, algorithm: ChecksumAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn placement(mut self, placement: ChecksumPlacement) -> Self {
        self.placement = placement;
        self
    }
}

/// Result of a successful codification run.
#[derive(Debug, Clone)]
pub struct AssemblyReport {
    pub output_path: PathBuf,
    /// Header bytes as written (checksum included when embedded)
    pub header: HeaderBytes,
    pub payload_len: u64,
    /// Total bytes written: header plus payload
    pub image_len: u64,
    pub checksum: u16,
    pub algorithm: ChecksumAlgorithm,
    pub placement: ChecksumPlacement,
}

/// Codify an image from a descriptor file and a payload binary.
///
/// Steps run in order and the first failure aborts the run: decode the
/// descriptor, read the payload past `options.payload_skip`, checksum the
/// payload, then write `header ‖ payload` to `output_path`. The output is
/// staged and renamed into place, so a failed run never leaves a truncated
/// image behind. Concurrent runs against the same output are unsupported.
pub fn assemble(
    descriptor_path: &Path,
    payload_path: &Path,
    output_path: &Path,
    options: &AssembleOptions,
) -> Result<AssemblyReport, CodifyError> {
    log::debug!("Decoding header descriptor {}", descriptor_path.display());
    let mut header = read_descriptor(descriptor_path)?;

    log::debug!("Reading payload {}", payload_path.display());
    let payload = read_payload(payload_path, options.payload_skip)?;

    let checksum = options.algorithm.compute(&payload);
    log::debug!("{} over payload: 0x{:04X}", options.algorithm, checksum);

    if options.placement == ChecksumPlacement::Header {
        embed_checksum(&mut header, checksum);
    }

    write_image(output_path, &header, &payload)?;

    let report = AssemblyReport {
        output_path: output_path.to_path_buf(),
        header,
        payload_len: payload.len() as u64,
        image_len: (HEADER_LEN + payload.len()) as u64,
        checksum,
        algorithm: options.algorithm,
        placement: options.placement,
    };
    log::debug!(
        "Wrote {} bytes to {}",
        report.image_len,
        report.output_path.display()
    );
    Ok(report)
}

/// Write `header ‖ payload` to `path` as one contiguous stream.
pub fn write_image(path: &Path, header: &HeaderBytes, payload: &[u8]) -> Result<(), CodifyError> {
    write_atomically(path, |out: &mut dyn Write| {
        out.write_all(header)?;
        out.write_all(payload)
    })
    .map_err(|e| CodifyError::output_write(path, e))
}

#[cfg(test)]
#[path = "tests/assembler_tests.rs"]
mod tests;
