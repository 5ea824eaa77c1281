use chrono::Local;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use imx_codify_core::util::{format_checksum, format_size};
use imx_codify_lib::describe::DescribeOptions;
use imx_codify_lib::{Settings, describe_payload, write_descriptor};

use crate::CliError;
use crate::cli_types::DescribeArgs;

/// Run the describe command: build a header descriptor for a payload.
pub(crate) fn run_describe(settings: &Settings, args: DescribeArgs) -> Result<(), CliError> {
    let payload = args.payload.payload.unwrap_or_else(|| settings.payload.clone());
    let descriptor = args.descriptor.unwrap_or_else(|| settings.descriptor.clone());

    let options = DescribeOptions {
        payload_skip: args.payload.skip.unwrap_or(settings.payload_skip),
        algorithm: args.payload.algorithm.unwrap_or(settings.algorithm),
        build_date: if args.no_date {
            None
        } else {
            Some(args.date.unwrap_or_else(|| Local::now().date_naive()))
        },
        version: args.fw_version.unwrap_or(settings.version),
    };

    log::info!(
        "Describing payload: {}",
        payload.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    let header = describe_payload(&payload, &options)?;

    log::info!("  Length:   {}", format_size(header.payload_len as u64));
    log::info!(
        "  Checksum: {} ({})",
        format_checksum(header.checksum),
        options.algorithm,
    );
    match header.build_date {
        Some(date) => log::info!("  Date:     {}", date),
        None => log::info!("  Date:     (none)"),
    }
    log::info!("  Version:  {}", header.version);
    crate::log_blank();

    let text = header.to_descriptor();
    if args.dry_run {
        log::info!(
            "{}",
            "Dry run: descriptor not written".if_supports_color(Stdout, |t| t.dimmed()),
        );
        log::info!("{}", text);
        return Ok(());
    }

    write_descriptor(&descriptor, &header.to_bytes())?;
    log::info!(
        "{} {} ({})",
        "Descriptor written:".if_supports_color(Stdout, |t| t.green()),
        descriptor.display(),
        text,
    );
    Ok(())
}
