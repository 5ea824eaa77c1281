//! imx-codify CLI
//!
//! Command-line interface for codifying firmware images.

mod cli_types;
mod commands;
mod error;

use std::io::Write;

use clap::Parser;
use log::LevelFilter;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use cli_types::{Cli, CodifyArgs, Commands, ConfigAction};
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logger(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}", failure_report(&e));
        std::process::exit(1);
    }
}

/// One-line failure report naming the stage. Printed outside the logger so
/// `--quiet` and `RUST_LOG` cannot hide it.
fn failure_report(e: &CliError) -> String {
    format!(
        "{} [{}] {}",
        "\u{2718}".if_supports_color(Stderr, |t| t.red()),
        e.stage(),
        e,
    )
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = cli.config.as_deref();
    match cli.command.unwrap_or(Commands::Codify(CodifyArgs::default())) {
        Commands::Codify(args) => {
            let settings = imx_codify_lib::load_settings(config)?;
            commands::codify::run_codify(&settings, args)
        }
        Commands::Describe(args) => {
            let settings = imx_codify_lib::load_settings(config)?;
            commands::describe::run_describe(&settings, args)
        }
        Commands::Verify { image, algorithm } => {
            let settings = imx_codify_lib::load_settings(config)?;
            commands::verify::run_verify(&settings, &image, algorithm)
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(config),
            ConfigAction::Path => commands::config::run_config_path(config),
            ConfigAction::Init { force } => commands::config::run_config_init(config, force),
        },
    }
}

/// Install the logger.
///
/// Normal output is the bare message on stdout; `--verbose` switches to
/// debug level with timestamps. `RUST_LOG` still overrides the level.
fn init_logger(quiet: bool, verbose: bool) {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stdout);
    if verbose {
        builder.format_timestamp_millis();
    } else {
        builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    }
    builder.init();
}

/// Print an empty line through the logger so `--quiet` suppresses it too.
pub(crate) fn log_blank() {
    log::info!("");
}
