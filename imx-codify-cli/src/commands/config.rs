use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use imx_codify_lib::settings::settings_to_string;
use imx_codify_lib::{Settings, load_settings, save_settings, settings_path};

use crate::CliError;

fn resolve_path(config: Option<&Path>) -> PathBuf {
    config.map(Path::to_path_buf).unwrap_or_else(settings_path)
}

/// Show the effective settings and where they come from.
pub(crate) fn run_config_show(config: Option<&Path>) -> Result<(), CliError> {
    let path = resolve_path(config);
    let settings = load_settings(config)?;

    if path.exists() {
        log::info!(
            "Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    crate::log_blank();
    log::info!("{}", settings_to_string(&settings)?);
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path(config: Option<&Path>) -> Result<(), CliError> {
    log::info!("{}", resolve_path(config).display());
    Ok(())
}

/// Write a settings file populated with defaults.
pub(crate) fn run_config_init(config: Option<&Path>, force: bool) -> Result<(), CliError> {
    let path = resolve_path(config);
    if path.exists() && !force {
        return Err(CliError::config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    save_settings(&path, &Settings::default())?;
    log::info!(
        "{} {}",
        "Settings written:".if_supports_color(Stdout, |t| t.green()),
        path.display(),
    );
    Ok(())
}
