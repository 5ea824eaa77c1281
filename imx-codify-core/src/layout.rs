//! Fixed sizes and field offsets of a codified image.
//!
//! The header length and the payload skip happen to share a value but are
//! independent: the header is defined by the layout below, the skip by the
//! prefix the build toolchain leaves in front of the application binary.

/// Number of raw bytes in a decoded image header.
pub const HEADER_LEN: usize = 16;

/// Number of hex characters consumed from a header descriptor.
pub const DESCRIPTOR_LEN: usize = HEADER_LEN * 2;

/// Default number of leading bytes dropped from the payload binary.
pub const PAYLOAD_SKIP: u64 = 16;

/// Payload length, `u32` little-endian.
pub const LENGTH_OFFSET: usize = 0;

/// Payload checksum, `u16` little-endian.
pub const CHECKSUM_OFFSET: usize = 4;

/// Two bytes kept zero so the checksum field can grow to 32 bits.
pub const CHECKSUM_RESERVED_OFFSET: usize = 6;

/// Build date: day, month, century, year-of-century.
pub const DATE_OFFSET: usize = 8;

/// Firmware version: major, minor.
pub const VERSION_OFFSET: usize = 12;
