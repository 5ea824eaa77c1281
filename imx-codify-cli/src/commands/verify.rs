use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use imx_codify_core::util::{format_checksum, format_size};
use imx_codify_lib::{ChecksumAlgorithm, Settings, verify_image};

use crate::CliError;

/// Run the verify command. An image that does not match its header is
/// reported as an error so the exit status is non-zero.
pub(crate) fn run_verify(
    settings: &Settings,
    image: &Path,
    algorithm: Option<ChecksumAlgorithm>,
) -> Result<(), CliError> {
    let algorithm = algorithm.unwrap_or(settings.algorithm);
    let report = verify_image(image, algorithm)?;

    let mark = |ok: bool| {
        if ok {
            "ok".if_supports_color(Stdout, |t| t.green()).to_string()
        } else {
            "MISMATCH".if_supports_color(Stdout, |t| t.red()).to_string()
        }
    };

    log::info!(
        "Image: {}",
        image.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!(
        "  Length:   header {} / actual {}  {}",
        format_size(report.header.payload_len as u64),
        format_size(report.payload_len),
        mark(report.length_ok()),
    );
    log::info!(
        "  Checksum: header {} / actual {} ({})  {}",
        format_checksum(report.header.checksum),
        format_checksum(report.computed),
        algorithm,
        mark(report.checksum_ok()),
    );
    if let Some(date) = report.header.build_date {
        log::info!("  Date:     {}", date);
    }
    log::info!("  Version:  {}", report.header.version);

    if report.is_valid() {
        Ok(())
    } else {
        Err(CliError::invalid(format!(
            "{} does not match its header",
            image.display()
        )))
    }
}
