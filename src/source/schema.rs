//! Type definitions registered with the host schema.
//!
//! Image fields are always declared as links to file nodes. How seasons,
//! episodes and the podcast point at each other depends on [`SeasonLink`].

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use super::node::{
    FILE_TYPE, IMAGE_LINK_FIELD, NodeFactory, NodeKind, PODCAST_LINK_FIELD, SEASON_LINK_FIELD,
};

/// How records reference each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SeasonLink {
    /// Resolve through shared keys (`seasonNumber`, `podcastId`)
    #[default]
    Key,
    /// Store node ids on the records (`season___NODE`, `podcast___NODE`)
    Reference,
}

/// `@link` directive arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub by: Option<String>,
    pub from: String,
}

/// One field on a type definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    pub name: String,
    /// GraphQL type reference, e.g. `File` or `[SimplecastPodcastEpisode]`
    pub type_ref: String,
    pub link: Option<Link>,
}

impl FieldDefinition {
    fn linked_from(name: &str, type_ref: impl Into<String>, from: &str) -> Self {
        Self {
            name: name.to_string(),
            type_ref: type_ref.into(),
            link: Some(Link {
                by: None,
                from: from.to_string(),
            }),
        }
    }

    fn linked_by(name: &str, type_ref: impl Into<String>, by: &str, from: &str) -> Self {
        Self {
            name: name.to_string(),
            type_ref: type_ref.into(),
            link: Some(Link {
                by: Some(by.to_string()),
                from: from.to_string(),
            }),
        }
    }
}

/// A node type with explicitly declared fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDefinition {
    pub name: String,
    pub interfaces: Vec<String>,
    pub fields: Vec<FieldDefinition>,
}

impl TypeDefinition {
    fn node(name: String, fields: Vec<FieldDefinition>) -> Self {
        Self {
            name,
            interfaces: vec!["Node".to_string()],
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Render as SDL
    pub fn to_sdl(&self) -> String {
        let mut out = format!("type {}", self.name);
        if !self.interfaces.is_empty() {
            let _ = write!(out, " implements {}", self.interfaces.join(" & "));
        }
        out.push_str(" {\n");
        for field in &self.fields {
            let _ = write!(out, "  {}: {}", field.name, field.type_ref);
            if let Some(ref link) = field.link {
                match link.by {
                    Some(ref by) => {
                        let _ = write!(out, " @link(by: \"{}\", from: \"{}\")", by, link.from);
                    }
                    None => {
                        let _ = write!(out, " @link(from: \"{}\")", link.from);
                    }
                }
            }
            out.push('\n');
        }
        out.push('}');
        out
    }
}

/// Type definitions for podcast, episode and season nodes
pub fn type_definitions(factory: &NodeFactory, season_link: SeasonLink) -> Vec<TypeDefinition> {
    let podcast = factory.type_name(NodeKind::Podcast);
    let episode = factory.type_name(NodeKind::Episode);
    let season = factory.type_name(NodeKind::Season);
    let remote_id = factory.remote_id_field();

    let image = || FieldDefinition::linked_from("image", FILE_TYPE, IMAGE_LINK_FIELD);

    match season_link {
        SeasonLink::Key => vec![
            TypeDefinition::node(
                podcast.clone(),
                vec![
                    image(),
                    FieldDefinition::linked_by(
                        "episodes",
                        format!("[{}]", episode),
                        "podcastId",
                        &remote_id,
                    ),
                ],
            ),
            TypeDefinition::node(
                episode.clone(),
                vec![
                    image(),
                    FieldDefinition::linked_by("season", season.clone(), "number", "seasonNumber"),
                    FieldDefinition::linked_by("podcast", podcast.clone(), &remote_id, "podcastId"),
                ],
            ),
            TypeDefinition::node(
                season,
                vec![
                    FieldDefinition::linked_by(
                        "episodes",
                        format!("[{}]", episode),
                        "seasonNumber",
                        "number",
                    ),
                    FieldDefinition::linked_by("podcast", podcast, &remote_id, "podcastId"),
                ],
            ),
        ],
        SeasonLink::Reference => vec![
            TypeDefinition::node(podcast.clone(), vec![image()]),
            TypeDefinition::node(
                episode,
                vec![
                    image(),
                    FieldDefinition::linked_from("season", season.clone(), SEASON_LINK_FIELD),
                    FieldDefinition::linked_from("podcast", podcast.clone(), PODCAST_LINK_FIELD),
                ],
            ),
            TypeDefinition::node(
                season,
                vec![FieldDefinition::linked_from("podcast", podcast, PODCAST_LINK_FIELD)],
            ),
        ],
    }
}

/// All definitions as one SDL document
pub fn to_sdl(types: &[TypeDefinition]) -> String {
    types
        .iter()
        .map(TypeDefinition::to_sdl)
        .collect::<Vec<_>>()
        .join("\n\n")
}
