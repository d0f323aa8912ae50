//! Noteboard CLI application entry point
//!
//! # Usage
//!
//! ```bash
//! # Browse notes interactively (default command)
//! noteboard
//! noteboard browse -s groceries -t Shopping
//!
//! # Print a page of notes
//! noteboard list -p 2
//!
//! # Create a note
//! noteboard create --title "Standup" --content "9:30 daily" --tag Meeting
//!
//! # Quiet mode (only output results)
//! noteboard -q list -t all
//! ```
//!
//! # Configuration
//!
//! On first run, noteboard prompts for the notes API URL and an optional
//! token. Configuration is stored in the user's config directory
//! (`~/.config/noteboard/config.toml` on Linux) and can be overridden with
//! `NOTEBOARD_*` environment variables.

use noteboard::{
    NoteboardError,
    api::{HttpNotesClient, NewNote, NotesSource},
    cli::{Cli, Commands},
    commands,
    config::NoteboardConfig,
    logging,
    output::{OutputWriter, StdoutWriter},
};
use std::process::ExitCode;
use std::sync::Arc;

type Result<T> = std::result::Result<T, NoteboardError>;

fn build_client(config: &NoteboardConfig) -> Result<HttpNotesClient> {
    let client = HttpNotesClient::new(
        config.api_url.clone(),
        config.token().map(str::to_string),
        config.per_page,
        config.request_timeout(),
    )?;
    tracing::debug!(base_url = client.base_url(), "notes client ready");
    Ok(client)
}

fn run(cli: &Cli, out: &dyn OutputWriter) -> Result<()> {
    let command = cli.get_command();

    let config = match command {
        // Never prompt when the user only asks where the file lives
        Commands::Config { .. } => NoteboardConfig::load()?,
        _ => NoteboardConfig::load_or_setup()?,
    };

    if let Err(e) = logging::init(&config.log_file_path()) {
        out.warning(&format!("Logging disabled: {e}"));
    }

    match command {
        Commands::Browse { query, no_prefetch } => {
            let source: Arc<dyn NotesSource> = Arc::new(build_client(&config)?);
            commands::browse(source, &config, query, no_prefetch)
        }
        Commands::List { query } => {
            let client = build_client(&config)?;
            commands::list(&client, &query, out, cli.quiet)
        }
        Commands::Create {
            title,
            content,
            tag,
        } => {
            let client = build_client(&config)?;
            commands::create(&client, &NewNote::new(title, content, tag), out, cli.quiet)
                .map(|_| ())
        }
        Commands::Config { command } => commands::config(&config, command, out),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    let out = StdoutWriter::quiet(cli.quiet);

    let result = run(&cli, &out);
    tracing::info!(ok = result.is_ok(), "noteboard exiting");

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            out.error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
