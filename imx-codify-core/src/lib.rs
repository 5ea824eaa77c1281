//! Core building blocks for codifying firmware images.
//!
//! This crate knows nothing about files: it decodes header descriptors,
//! describes the 16-byte image header layout, and implements the CRC-16
//! algorithms that protect the payload. File handling lives in
//! `imx-codify-lib`.

pub mod checksum;
pub mod error;
pub mod header;
pub mod layout;
pub mod util;

pub use checksum::{ChecksumAlgorithm, Crc16, crc16};
pub use error::DecodeError;
pub use header::{BuildDate, FirmwareVersion, HeaderBytes, ImageHeader, decode_descriptor, encode_descriptor};
pub use layout::{DESCRIPTOR_LEN, HEADER_LEN, PAYLOAD_SKIP};
