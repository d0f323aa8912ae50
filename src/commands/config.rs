//! Config command - show the effective configuration or its location

use crate::{
    NoteboardError, Result,
    cli::ConfigCommands,
    config::NoteboardConfig,
    output::OutputWriter,
};

/// Shown instead of the configured token
const REDACTED: &str = "********";

/// Execute a config subcommand
///
/// # Errors
///
/// Returns `NoteboardError::Config` if the config path cannot be determined
/// or the configuration cannot be serialized.
pub fn execute(config: &NoteboardConfig, command: ConfigCommands, out: &dyn OutputWriter) -> Result<()> {
    match command {
        ConfigCommands::Show => out.write(&render(config)?),
        ConfigCommands::Path => {
            out.write(&NoteboardConfig::config_path()?.display().to_string());
        }
    }
    Ok(())
}

/// TOML rendering with the token masked
///
/// # Errors
///
/// Returns `NoteboardError::Config` if serialization fails.
pub fn render(config: &NoteboardConfig) -> Result<String> {
    let mut shown = config.clone();
    if shown.token().is_some() {
        shown.token = Some(REDACTED.to_string());
    }
    if shown.log_file.is_none() {
        shown.log_file = Some(config.log_file_path());
    }
    toml::to_string_pretty(&shown).map_err(|e| {
        NoteboardError::Config(::config::ConfigError::Message(format!(
            "Failed to serialize config: {e}"
        )))
    })
}
