use std::io;
use std::path::{Path, PathBuf};

use imx_codify_core::DecodeError;
use thiserror::Error;

/// Errors that can occur while codifying, describing or verifying an image.
///
/// Every variant names the file involved so a failure can be reported
/// without extra context from the caller.
#[derive(Debug, Error)]
pub enum CodifyError {
    /// The header descriptor file could not be read, or holds too few characters
    #[error("Cannot read header descriptor {}: {source}", .path.display())]
    HeaderRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The header descriptor text is not valid hex
    #[error("Malformed header descriptor {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    /// The payload binary is missing or cannot be opened
    #[error("Cannot open payload {}: {source}", .path.display())]
    PayloadOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// I/O failure while reading the payload, including a payload shorter
    /// than the prefix that must be skipped
    #[error("Cannot read payload {}: {source}", .path.display())]
    PayloadRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The payload length does not fit the header's 32-bit length field
    #[error("Payload {} too large for the header length field: {actual} bytes", .path.display())]
    PayloadTooLarge { path: PathBuf, actual: u64 },

    /// I/O failure while writing the output image
    #[error("Cannot write image {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// I/O failure while writing a generated descriptor
    #[error("Cannot write header descriptor {}: {source}", .path.display())]
    DescriptorWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An assembled image could not be read back
    #[error("Cannot read image {}: {source}", .path.display())]
    ImageRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An assembled image is too small to hold a header
    #[error("Image {} too small: {actual} bytes, a header alone is {expected}", .path.display())]
    ImageTooShort {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },

    /// Settings file could not be read, parsed or saved
    #[error("Settings error: {0}")]
    Settings(String),
}

impl CodifyError {
    pub fn header_read(path: &Path, source: io::Error) -> Self {
        Self::HeaderRead {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn decode(path: &Path, source: DecodeError) -> Self {
        Self::Decode {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn payload_open(path: &Path, source: io::Error) -> Self {
        Self::PayloadOpen {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn payload_read(path: &Path, source: io::Error) -> Self {
        Self::PayloadRead {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn output_write(path: &Path, source: io::Error) -> Self {
        Self::OutputWrite {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn descriptor_write(path: &Path, source: io::Error) -> Self {
        Self::DescriptorWrite {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn image_read(path: &Path, source: io::Error) -> Self {
        Self::ImageRead {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }

    /// The stage of the run that failed, for user-facing reports.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::HeaderRead { .. } | Self::Decode { .. } => "header",
            Self::PayloadOpen { .. }
            | Self::PayloadRead { .. }
            | Self::PayloadTooLarge { .. } => "payload",
            Self::OutputWrite { .. } | Self::DescriptorWrite { .. } => "output",
            Self::ImageRead { .. } | Self::ImageTooShort { .. } => "image",
            Self::Settings(_) => "settings",
        }
    }
}
