//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use imx_codify_lib::{ChecksumAlgorithm, FirmwareVersion};

#[derive(Parser)]
#[command(name = "imx-codify")]
#[command(
    about = "Codify firmware images: prepend a header descriptor to an application binary",
    long_about = None
)]
pub(crate) struct Cli {
    /// Settings file (defaults to ~/.config/imx-codify/settings.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Only show warnings and errors
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to `codify` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Arguments shared by commands that read a payload binary.
#[derive(Args, Clone, Default)]
pub(crate) struct PayloadArgs {
    /// Application binary
    #[arg(short, long)]
    pub payload: Option<PathBuf>,

    /// Leading payload bytes to skip
    #[arg(long)]
    pub skip: Option<u64>,

    /// Checksum algorithm (ccitt, x25)
    #[arg(short, long)]
    pub algorithm: Option<ChecksumAlgorithm>,
}

#[derive(Args, Clone, Default)]
pub(crate) struct CodifyArgs {
    /// Header descriptor text file
    #[arg(short, long)]
    pub descriptor: Option<PathBuf>,

    /// Codified image to write
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the payload checksum into the header (bytes 4-5, little-endian)
    #[arg(long)]
    pub embed_checksum: bool,

    #[command(flatten)]
    pub payload: PayloadArgs,
}

#[derive(Args, Clone)]
pub(crate) struct DescribeArgs {
    /// Descriptor file to write
    #[arg(short, long)]
    pub descriptor: Option<PathBuf>,

    /// Build date stamped into the header, YYYY-MM-DD (defaults to today)
    #[arg(long, conflicts_with = "no_date")]
    pub date: Option<NaiveDate>,

    /// Leave the build date bytes zero
    #[arg(long)]
    pub no_date: bool,

    /// Firmware version, MAJOR.MINOR
    #[arg(long)]
    pub fw_version: Option<FirmwareVersion>,

    /// Print the descriptor without writing it
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub payload: PayloadArgs,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Assemble header + payload into a flashable image
    Codify(CodifyArgs),

    /// Generate a header descriptor (length, checksum, date, version) for a payload
    Describe(DescribeArgs),

    /// Check a codified image against the length and checksum in its header
    Verify {
        /// Codified image to check
        image: PathBuf,

        /// Checksum algorithm (ccitt, x25)
        #[arg(short, long)]
        algorithm: Option<ChecksumAlgorithm>,
    },

    /// Manage the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show effective settings
    Show,

    /// Print the settings file path
    Path,

    /// Write a settings file with default values
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
}
