//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `source`: Full sourcing run and schema output
//! - `fetch`: Single-resource fetches
//! - `config`: Config file inspection

mod config;
mod fetch;
mod source;

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::error::{self, ResultExt};
use crate::simplecast::{FetchLimit, SimplecastClient};
use crate::source::SeasonLink;

pub use config::cmd_config;
pub use fetch::{cmd_episode, cmd_episodes, cmd_podcast, cmd_seasons, cmd_show_info};
pub use source::{cmd_schema, cmd_source};

/// Simplecast Source CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Credentials shared by every command that talks to the API
#[derive(Args, Debug, Clone, Default)]
pub struct ApiArgs {
    /// Simplecast API token (or set SIMPLECAST_TOKEN env var)
    #[arg(long, env = "SIMPLECAST_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
    /// Podcast id (or set SIMPLECAST_PODCAST_ID env var)
    #[arg(long, env = "SIMPLECAST_PODCAST_ID")]
    pub podcast_id: Option<String>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch everything and print the resulting nodes
    Source {
        #[command(flatten)]
        api: ApiArgs,
        /// Page size for episodes and seasons (non-numbers fall back to 10)
        #[arg(short, long)]
        limit: Option<FetchLimit>,
        /// Write JSON to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Skip image downloads
        #[arg(long)]
        no_images: bool,
        /// How records reference each other
        #[arg(long, value_enum)]
        season_link: Option<SeasonLink>,
    },
    /// Fetch podcast metadata
    Podcast {
        #[command(flatten)]
        api: ApiArgs,
    },
    /// Fetch the full podcast payload, including fields the node omits
    ShowInfo {
        #[command(flatten)]
        api: ApiArgs,
    },
    /// Fetch a single episode by id
    Episode {
        #[command(flatten)]
        api: ApiArgs,
        /// Episode id
        id: String,
    },
    /// Fetch episodes
    Episodes {
        #[command(flatten)]
        api: ApiArgs,
        /// Page size (non-numbers fall back to 10)
        #[arg(short, long)]
        limit: Option<FetchLimit>,
    },
    /// Fetch seasons
    Seasons {
        #[command(flatten)]
        api: ApiArgs,
        /// Page size (non-numbers fall back to 10)
        #[arg(short, long)]
        limit: Option<FetchLimit>,
    },
    /// Print the node type definitions as SDL
    Schema {
        /// How records reference each other
        #[arg(long, value_enum)]
        season_link: Option<SeasonLink>,
    },
    /// Show the config file location and effective settings
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let rt = Runtime::new()?;
    let config = crate::config::load();

    match &cli.command {
        Commands::Source {
            api,
            limit,
            output,
            no_images,
            season_link,
        } => cmd_source(
            &rt,
            &config,
            api,
            *limit,
            output.as_deref(),
            *no_images,
            *season_link,
        ),
        Commands::Podcast { api } => cmd_podcast(&rt, &config, api),
        Commands::ShowInfo { api } => cmd_show_info(&rt, &config, api),
        Commands::Episode { api, id } => cmd_episode(&rt, &config, api, id),
        Commands::Episodes { api, limit } => cmd_episodes(&rt, &config, api, *limit),
        Commands::Seasons { api, limit } => cmd_seasons(&rt, &config, api, *limit),
        Commands::Schema { season_link } => cmd_schema(&config, *season_link),
        Commands::Config { init } => cmd_config(&config, *init),
    }
}

/// Build a client from flags/env, falling back to the config file
pub(crate) fn build_client(config: &Config, api: &ApiArgs) -> error::Result<SimplecastClient> {
    let token = api
        .token
        .clone()
        .or_else(|| config.credentials.token.clone())
        .unwrap_or_default();
    let podcast_id = api
        .podcast_id
        .clone()
        .or_else(|| config.credentials.podcast_id.clone())
        .unwrap_or_default();

    SimplecastClient::with_options(token, podcast_id, config.client_options())
        .with_context("Cannot create Simplecast client")
}

/// Print pretty JSON to stdout, or write it to `output`
pub(crate) fn emit_json<T: serde::Serialize>(
    value: &T,
    output: Option<&Path>,
) -> error::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(path, json + "\n")
                .with_context(format!("Failed to write {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_limit_parsing() {
        let cli = Cli::try_parse_from(["simplecast-source", "episodes", "--limit", "25"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Episodes { limit: Some(l), .. } if l == FetchLimit::new(25)
        ));

        let cli = Cli::try_parse_from(["simplecast-source", "seasons", "--limit", "abc"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Seasons { limit: Some(l), .. } if l == FetchLimit::new(10)
        ));
    }

    #[test]
    fn test_single_resource_commands() {
        let cli = Cli::try_parse_from(["simplecast-source", "episode", "ep-2"]).unwrap();
        assert!(matches!(cli.command, Commands::Episode { ref id, .. } if id == "ep-2"));

        let cli = Cli::try_parse_from(["simplecast-source", "show-info", "--podcast-id", "p"])
            .unwrap();
        match cli.command {
            Commands::ShowInfo { api } => assert_eq!(api.podcast_id.as_deref(), Some("p")),
            _ => panic!("expected show-info command"),
        }

        assert!(Cli::try_parse_from(["simplecast-source", "episode"]).is_err());
    }

    #[test]
    fn test_source_flags() {
        let cli = Cli::try_parse_from([
            "simplecast-source",
            "source",
            "--token",
            "t",
            "--podcast-id",
            "p",
            "--no-images",
            "--season-link",
            "reference",
        ])
        .unwrap();

        match cli.command {
            Commands::Source {
                api,
                no_images,
                season_link,
                ..
            } => {
                assert_eq!(api.token.as_deref(), Some("t"));
                assert_eq!(api.podcast_id.as_deref(), Some("p"));
                assert!(no_images);
                assert_eq!(season_link, Some(SeasonLink::Reference));
            }
            _ => panic!("expected source command"),
        }
    }

    #[test]
    fn test_build_client_prefers_flags() {
        let mut config = Config::default();
        config.credentials.token = Some("file-token".to_string());
        config.credentials.podcast_id = Some("file-pod".to_string());

        let api = ApiArgs {
            token: None,
            podcast_id: Some("flag-pod".to_string()),
        };
        let client = build_client(&config, &api).unwrap();
        assert_eq!(client.podcast_id(), "flag-pod");
    }

    #[test]
    fn test_build_client_reports_missing_token() {
        let api = ApiArgs {
            token: None,
            podcast_id: Some("pod".to_string()),
        };
        let result = build_client(&Config::default(), &api);
        assert!(matches!(
            result,
            Err(error::Error::WithContext { ref context, .. }) if context == "Cannot create Simplecast client"
        ));
    }

    #[test]
    fn test_emit_json_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        emit_json(&serde_json::json!({"a": 1}), Some(&path)).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"a\": 1"));
    }
}
