use thiserror::Error;

/// Errors produced while decoding a header descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Not enough characters to fill a whole header
    #[error("descriptor too short: expected at least {expected} hex characters, got {actual}")]
    TooShort { expected: usize, actual: usize },

    /// A character in the consumed range is not a hex digit
    #[error("invalid hex digit '{}' at position {position}", .found.escape_ascii())]
    InvalidHexDigit { position: usize, found: u8 },
}

impl DecodeError {
    pub fn too_short(expected: usize, actual: usize) -> Self {
        Self::TooShort { expected, actual }
    }
}
