use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use imx_codify_core::util::{format_checksum, format_size, hex_bytes};
use imx_codify_lib::{ChecksumPlacement, Settings, assemble};

use crate::CliError;
use crate::cli_types::CodifyArgs;

/// Run the codify command: decode the descriptor, skip the payload prefix
/// and write `header ‖ payload`.
pub(crate) fn run_codify(settings: &Settings, args: CodifyArgs) -> Result<(), CliError> {
    let descriptor = args.descriptor.unwrap_or_else(|| settings.descriptor.clone());
    let payload = args.payload.payload.unwrap_or_else(|| settings.payload.clone());
    let output = args.output.unwrap_or_else(|| settings.output.clone());

    let mut options = settings.assemble_options();
    if let Some(skip) = args.payload.skip {
        options = options.payload_skip(skip);
    }
    if let Some(algorithm) = args.payload.algorithm {
        options = options.algorithm(algorithm);
    }
    if args.embed_checksum {
        options = options.placement(ChecksumPlacement::Header);
    }

    log::info!(
        "Header descriptor: {}",
        descriptor.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!(
        "Payload:           {} (skipping {} bytes)",
        payload.display().if_supports_color(Stdout, |t| t.cyan()),
        options.payload_skip,
    );

    let report = assemble(&descriptor, &payload, &output, &options)?;

    crate::log_blank();
    log::info!(
        "{} {}",
        "Image file codified successfully:".if_supports_color(Stdout, |t| t.green()),
        report.output_path.display(),
    );
    log::info!("  Header:   {}", hex_bytes(&report.header));
    log::info!("  Payload:  {}", format_size(report.payload_len));
    log::info!("  Image:    {}", format_size(report.image_len));
    let placement = match report.placement {
        ChecksumPlacement::Report => "",
        ChecksumPlacement::Header => ", embedded in header",
    };
    log::info!(
        "  Checksum: {} ({}{})",
        format_checksum(report.checksum).if_supports_color(Stdout, |t| t.bold()),
        report.algorithm,
        placement,
    );
    Ok(())
}
