//! Firmware image codification.
//!
//! Turns a hex header descriptor and an application binary into a single
//! flashable image (`header ‖ payload`), and provides the supporting
//! operations around it: generating descriptors from a payload, verifying
//! an assembled image, and loading settings.

pub mod assembler;
pub mod describe;
pub mod error;
pub mod files;
pub mod settings;
pub mod verify;

pub use assembler::{AssembleOptions, AssemblyReport, ChecksumPlacement, assemble, write_image};
pub use describe::{DescribeOptions, describe_payload, write_descriptor};
pub use error::CodifyError;
pub use files::{read_descriptor, read_payload};
pub use settings::{Settings, load_settings, save_settings, settings_path};
pub use verify::{VerifyReport, verify_image};

// Re-export core types so frontends only need this crate.
pub use imx_codify_core::{
    ChecksumAlgorithm, FirmwareVersion, HEADER_LEN, HeaderBytes, ImageHeader, PAYLOAD_SKIP,
};
