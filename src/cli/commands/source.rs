//! Sourcing run and schema commands.

use std::path::Path;

use serde_json::json;
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::simplecast::FetchLimit;
use crate::source::{
    CachedImageLinker, ImageLinker, MemorySink, NodeFactory, SchemaRegistrar, SdlRegistrar,
    SeasonLink, SourceService, type_definitions,
};

use super::{ApiArgs, build_client, emit_json};

/// Run a full sourcing pass and print `{ nodes, status, report }`
pub fn cmd_source(
    rt: &Runtime,
    config: &Config,
    api: &ApiArgs,
    limit: Option<FetchLimit>,
    output: Option<&Path>,
    no_images: bool,
    season_link: Option<SeasonLink>,
) -> anyhow::Result<()> {
    let client = build_client(config, api)?;

    let mut options = config.source_options();
    if let Some(limit) = limit {
        options.fetch_limit = limit;
    }
    if let Some(link) = season_link {
        options.season_link = link;
    }
    if no_images {
        options.attach_images = false;
    }

    let service = SourceService::new(client, options);
    let linker = CachedImageLinker::new(config.image_cache_dir())?;
    let mut sink = MemorySink::new();

    let mut registrar = SdlRegistrar::new();
    service.customize_schema(&mut registrar)?;

    let report = rt.block_on(service.source_nodes(&mut sink, Some(&linker as &dyn ImageLinker)));

    if !report.is_complete() {
        eprintln!("Warning: some resources could not be fetched, see report");
    }

    emit_json(
        &json!({
            "nodes": sink.nodes,
            "status": sink.status,
            "report": report,
            "schema": registrar.sdl(),
        }),
        output,
    )?;
    Ok(())
}

/// Print the type definitions as SDL
pub fn cmd_schema(config: &Config, season_link: Option<SeasonLink>) -> anyhow::Result<()> {
    let factory = NodeFactory::new(config.source.type_prefix.clone());
    let link = season_link.unwrap_or(config.source.season_link);

    let mut registrar = SdlRegistrar::new();
    registrar.create_types(&type_definitions(&factory, link))?;
    println!("{}", registrar.sdl());
    Ok(())
}
