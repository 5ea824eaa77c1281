//! Codifier settings (default file paths, payload skip, checksum options).
//!
//! The settings file lives at `~/.config/imx-codify/settings.toml` unless a
//! path is given explicitly. Every key is optional; missing keys fall back
//! to the `copydown/` build layout defaults, and command-line flags
//! override whatever the file says.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use imx_codify_core::{ChecksumAlgorithm, FirmwareVersion, PAYLOAD_SKIP};

use crate::assembler::{AssembleOptions, ChecksumPlacement};
use crate::error::CodifyError;
use crate::files::write_atomically;

pub const DEFAULT_DESCRIPTOR: &str = "Application_CRC_file.txt";
pub const DEFAULT_PAYLOAD: &str = "copydown/ea3_wsgw.imx";
pub const DEFAULT_OUTPUT: &str = "copydown/CRC_ea3_wsgw.imx";

/// Settings loaded from `settings.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Header descriptor text file
    pub descriptor: PathBuf,
    /// Application binary to codify
    pub payload: PathBuf,
    /// Codified image to produce
    pub output: PathBuf,
    pub payload_skip: u64,
    pub algorithm: ChecksumAlgorithm,
    pub placement: ChecksumPlacement,
    /// Firmware version stamped by `describe`
    pub version: FirmwareVersion,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            descriptor: PathBuf::from(DEFAULT_DESCRIPTOR),
            payload: PathBuf::from(DEFAULT_PAYLOAD),
            output: PathBuf::from(DEFAULT_OUTPUT),
            payload_skip: PAYLOAD_SKIP,
            algorithm: ChecksumAlgorithm::default(),
            placement: ChecksumPlacement::default(),
            version: FirmwareVersion::new(1, 0),
        }
    }
}

impl Settings {
    pub fn assemble_options(&self) -> AssembleOptions {
        AssembleOptions::new()
            .payload_skip(self.payload_skip)
            .algorithm(self.algorithm)
            .placement(self.placement)
    }
}

/// Canonical path to the settings file: `~/.config/imx-codify/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("imx-codify").join("settings.toml")
}

/// Parse settings from TOML text.
pub fn parse_settings(text: &str) -> Result<Settings, CodifyError> {
    toml::from_str(text).map_err(|e| CodifyError::settings(e.to_string()))
}

/// Load settings.
///
/// An explicit path must exist. Without one, the canonical settings file
/// is used when present and built-in defaults otherwise.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings, CodifyError> {
    let (path, required) = match explicit {
        Some(p) => (p.to_path_buf(), true),
        None => (settings_path(), false),
    };

    match fs::read_to_string(&path) {
        Ok(contents) => {
            log::debug!("Loading settings from {}", path.display());
            parse_settings(&contents).map_err(|e| match e {
                CodifyError::Settings(msg) => {
                    CodifyError::settings(format!("{}: {}", path.display(), msg))
                }
                other => other,
            })
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound && !required => {
            log::debug!("No settings file at {}, using defaults", path.display());
            Ok(Settings::default())
        }
        Err(e) => Err(CodifyError::settings(format!(
            "cannot read {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Save settings to `path`, creating parent directories as needed.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), CodifyError> {
    let serialized =
        toml::to_string_pretty(settings).map_err(|e| CodifyError::settings(e.to_string()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            CodifyError::settings(format!("cannot create {}: {}", parent.display(), e))
        })?;
    }
    write_atomically(path, |out: &mut dyn Write| out.write_all(serialized.as_bytes()))
        .map_err(|e| CodifyError::settings(format!("cannot write {}: {}", path.display(), e)))
}

/// Render settings as TOML for display.
pub fn settings_to_string(settings: &Settings) -> Result<String, CodifyError> {
    toml::to_string_pretty(settings).map_err(|e| CodifyError::settings(e.to_string()))
}
