//! Single-resource fetch commands.
//!
//! Each prints the camelCased records exactly as they would appear as node
//! fields. Unlike a sourcing run, a failed fetch is an error here.

use serde_json::Value;
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::error::ResultExt;
use crate::simplecast::FetchLimit;

use super::{ApiArgs, build_client, emit_json};

/// Fetch and print podcast metadata
pub fn cmd_podcast(rt: &Runtime, config: &Config, api: &ApiArgs) -> anyhow::Result<()> {
    let client = build_client(config, api)?;
    let podcast = rt
        .block_on(client.fetch_podcast())
        .with_context("Failed to fetch podcast")?;

    emit_json(&Value::Object(podcast.to_fields()), None)?;
    Ok(())
}

/// Fetch and print the full podcast payload, nothing filtered
pub fn cmd_show_info(rt: &Runtime, config: &Config, api: &ApiArgs) -> anyhow::Result<()> {
    let client = build_client(config, api)?;
    let info = rt
        .block_on(client.fetch_show_info())
        .with_context("Failed to fetch show info")?;

    emit_json(&info, None)?;
    Ok(())
}

/// Fetch and print one episode
pub fn cmd_episode(
    rt: &Runtime,
    config: &Config,
    api: &ApiArgs,
    episode_id: &str,
) -> anyhow::Result<()> {
    let client = build_client(config, api)?;
    let episode = rt
        .block_on(client.fetch_episode(episode_id))
        .with_context(format!("Failed to fetch episode {}", episode_id))?;

    emit_json(&Value::Object(episode.to_fields()), None)?;
    Ok(())
}

/// Fetch and print episodes, newest first as the API returns them
pub fn cmd_episodes(
    rt: &Runtime,
    config: &Config,
    api: &ApiArgs,
    limit: Option<FetchLimit>,
) -> anyhow::Result<()> {
    let client = build_client(config, api)?;
    let limit = limit.unwrap_or(config.source.fetch_limit);
    let episodes = rt
        .block_on(client.fetch_episodes(limit))
        .with_context("Failed to fetch episodes")?;

    let fields: Vec<Value> = episodes
        .iter()
        .map(|e| Value::Object(e.to_fields()))
        .collect();
    eprintln!("{} episodes (limit {})", fields.len(), limit);
    emit_json(&fields, None)?;
    Ok(())
}

/// Fetch and print seasons
pub fn cmd_seasons(
    rt: &Runtime,
    config: &Config,
    api: &ApiArgs,
    limit: Option<FetchLimit>,
) -> anyhow::Result<()> {
    let client = build_client(config, api)?;
    let limit = limit.unwrap_or(config.source.fetch_limit);
    let seasons = rt
        .block_on(client.fetch_seasons(limit))
        .with_context("Failed to fetch seasons")?;

    let fields: Vec<Value> = seasons
        .iter()
        .map(|s| Value::Object(s.to_fields()))
        .collect();
    eprintln!("{} seasons (limit {})", fields.len(), limit);
    emit_json(&fields, None)?;
    Ok(())
}
