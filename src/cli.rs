//! Command-line interface definitions and parsing
//!
//! # Commands
//!
//! - **browse**: Interactive notes view (default)
//! - **list**: Print one page of notes
//! - **create**: Create a note from flags
//! - **config**: Show the effective configuration or its file location
//!
//! # Examples
//!
//! ```
//! use noteboard::cli::{Cli, Commands};
//! use clap::Parser;
//!
//! let cli = Cli::parse_from(["noteboard", "list", "-s", "groceries", "-t", "Shopping"]);
//! assert!(matches!(cli.get_command(), Commands::List { .. }));
//! ```

use crate::api::NoteTag;
use clap::{Args, Parser, Subcommand};

/// Search inputs shared by `browse` and `list`
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryArgs {
    /// Search text
    #[arg(short = 's', long = "query", value_name = "TEXT", default_value = "")]
    pub query: String,

    /// Page to start on
    #[arg(
        short = 'p',
        long = "page",
        value_name = "N",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub page: u32,

    /// Tag filter ("all" for every tag)
    #[arg(short = 't', long = "tag", value_name = "TAG")]
    pub tag: Option<String>,
}

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "noteboard")]
#[command(about = "Browse, search and create notes from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Open the interactive notes view (default)
    #[command(visible_alias = "b")]
    Browse {
        #[command(flatten)]
        query: QueryArgs,

        /// Start with an empty view instead of fetching the first page up front
        #[arg(long = "no-prefetch")]
        no_prefetch: bool,
    },

    /// Print one page of notes
    #[command(visible_alias = "l")]
    List {
        #[command(flatten)]
        query: QueryArgs,
    },

    /// Create a note
    #[command(visible_alias = "c")]
    Create {
        /// Note title (3 to 50 characters)
        #[arg(long = "title", value_name = "TITLE")]
        title: String,

        /// Note body (up to 500 characters)
        #[arg(long = "content", value_name = "TEXT", default_value = "")]
        content: String,

        /// One of Todo, Work, Personal, Meeting, Shopping
        #[arg(long = "tag", value_name = "TAG", default_value_t = NoteTag::Todo)]
        tag: NoteTag,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,

    /// Print the config file location
    Path,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to Browse if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Browse {
            query: QueryArgs {
                page: 1,
                ..QueryArgs::default()
            },
            no_prefetch: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_browse() {
        let cli = Cli::parse_from(["noteboard"]);
        assert_eq!(
            cli.get_command(),
            Commands::Browse {
                query: QueryArgs {
                    query: String::new(),
                    page: 1,
                    tag: None,
                },
                no_prefetch: false,
            }
        );
    }

    #[test]
    fn test_parse_browse_alias_with_flags() {
        let cli = Cli::parse_from(["noteboard", "b", "-s", "cats", "-p", "2", "-t", "all"]);
        let Commands::Browse { query, .. } = cli.get_command() else {
            panic!("Expected Browse command");
        };
        assert_eq!(query.query, "cats");
        assert_eq!(query.page, 2);
        assert_eq!(query.tag.as_deref(), Some("all"));
    }

    #[test]
    fn test_page_zero_rejected() {
        assert!(Cli::try_parse_from(["noteboard", "list", "-p", "0"]).is_err());
    }

    #[test]
    fn test_parse_create() {
        let cli = Cli::parse_from([
            "noteboard", "c", "--title", "Standup", "--tag", "meeting", "-q",
        ]);
        assert!(cli.quiet);
        assert_eq!(
            cli.get_command(),
            Commands::Create {
                title: "Standup".to_string(),
                content: String::new(),
                tag: NoteTag::Meeting,
            }
        );
    }

    #[test]
    fn test_create_rejects_unknown_tag() {
        assert!(
            Cli::try_parse_from(["noteboard", "create", "--title", "abc", "--tag", "Urgent"])
                .is_err()
        );
    }

    #[test]
    fn test_parse_config_path() {
        let cli = Cli::parse_from(["noteboard", "config", "path"]);
        assert_eq!(
            cli.get_command(),
            Commands::Config {
                command: ConfigCommands::Path
            }
        );
    }
}
