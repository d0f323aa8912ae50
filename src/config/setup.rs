//! Interactive setup wizard for first-time configuration
//!
//! Runs when noteboard starts on a terminal and no config file exists yet.

use super::{DEFAULT_API_URL, NoteboardConfig};
use config::ConfigError;
use dialoguer::{Input, Password, theme::ColorfulTheme};
use std::path::Path;

/// Interactive first-time setup - prompts for the notes API and a token
///
/// 1. Prompts for the API base URL (default: the public notes service)
/// 2. Prompts for an access token (may be left empty)
/// 3. Saves the configuration to `path`
///
/// # Errors
///
/// Returns `ConfigError` if user input cannot be read or the configuration
/// cannot be saved.
pub fn first_time_setup(path: &Path) -> Result<NoteboardConfig, ConfigError> {
    println!("Welcome to noteboard! Let's connect to your notes service.\n");

    let api_url: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Notes API URL")
        .default(DEFAULT_API_URL.to_string())
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.starts_with("http://") || input.starts_with("https://") {
                Ok(())
            } else {
                Err("URL must start with http:// or https://")
            }
        })
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let token = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Access token (leave empty for none)")
        .allow_empty_password(true)
        .interact()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let config = from_answers(&api_url, token);
    config.save_to(path)?;

    println!("\nConfiguration saved to {}", path.display());
    Ok(config)
}

/// Configuration built from the wizard's answers
fn from_answers(api_url: &str, token: String) -> NoteboardConfig {
    NoteboardConfig {
        api_url: api_url.trim_end_matches('/').to_string(),
        token: Some(token).filter(|t| !t.trim().is_empty()),
        ..NoteboardConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::Environment;
    use std::collections::HashMap;

    fn no_env() -> Environment {
        Environment::with_prefix(crate::config::ENV_PREFIX).source(Some(HashMap::new()))
    }

    #[test]
    fn test_answers_are_normalized() {
        let config = from_answers("http://localhost:3000/api/", "  ".to_string());
        assert_eq!(config.api_url, "http://localhost:3000/api");
        assert!(config.token.is_none());
        assert_eq!(config.per_page, NoteboardConfig::default().per_page);
    }

    #[test]
    fn test_answers_saved_and_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("noteboard").join("config.toml");

        let config = from_answers(DEFAULT_API_URL, "abc123".to_string());
        config.save_to(&path).unwrap();

        let loaded = NoteboardConfig::from_sources(&path, no_env()).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.token(), Some("abc123"));
    }
}
