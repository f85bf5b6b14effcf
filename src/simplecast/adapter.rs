//! Adapter layer: Convert Simplecast DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.

use serde_json::Value;

use super::dto;
use crate::simplecast::domain::{Episode, Podcast, Season};

/// Keep the allow-listed podcast fields and unwrap the keyword envelope
pub fn to_podcast(response: dto::PodcastResponse) -> Podcast {
    let keywords = response
        .keywords
        .map(|envelope| {
            envelope
                .collection
                .into_iter()
                .filter_map(dto::Keyword::into_value)
                .collect()
        })
        .unwrap_or_default();

    Podcast {
        id: response.id,
        title: response.title,
        subtitle: response.subtitle,
        description: response.description,
        copyright: response.copyright,
        created_at: response.created_at,
        published_at: response.published_at,
        feed_url: response.feed_url,
        image_url: response.image_url,
        image_path: response.image_path,
        logo_image_url: response.logo_image_url,
        language: response.language,
        site: response.site,
        owner: response.owner,
        time_zone: response.time_zone,
        keywords,
    }
}

/// Unwrap the episode envelope, keeping API order
pub fn to_episodes(response: dto::Collection<dto::EpisodeItem>, podcast_id: &str) -> Vec<Episode> {
    response
        .collection
        .into_iter()
        .map(|item| to_episode(item, podcast_id))
        .collect()
}

/// Convert one episode.
///
/// `seasonNumber`, `podcastId` and `audioUrl` are derived for linking; the
/// raw `enclosure_url`, `season` and `podcast` objects are kept as sent.
pub fn to_episode(item: dto::EpisodeItem, podcast_id: &str) -> Episode {
    let season_number = item.season_number();
    let podcast_id = item.podcast_id().unwrap_or_else(|| podcast_id.to_string());

    let mut extra = item.extra;
    if let Some(ref url) = item.enclosure_url {
        extra.insert("enclosure_url".to_string(), Value::String(url.clone()));
    }
    if let Some(season) = item.season {
        extra.insert("season".to_string(), season);
    }
    if let Some(podcast) = item.podcast {
        extra.insert("podcast".to_string(), podcast);
    }

    Episode {
        id: item.id,
        podcast_id: Some(podcast_id),
        season_number,
        number: item.number,
        title: item.title,
        description: item.description,
        published_at: item.published_at,
        status: item.status,
        image_url: item.image_url,
        audio_url: item.enclosure_url,
        extra,
    }
}

/// Convert seasons, synthesizing an id when the API doesn't send one
pub fn to_seasons(response: dto::SeasonsResponse, podcast_id: &str) -> Vec<Season> {
    response
        .into_items()
        .into_iter()
        .map(|item| {
            let podcast_id = item
                .podcast_id()
                .unwrap_or_else(|| podcast_id.to_string());
            let id = item
                .id
                .clone()
                .unwrap_or_else(|| format!("{}-season-{}", podcast_id, item.number));
            let episode_count = item.count();

            let mut extra = item.extra;
            if let Some(episodes) = item.episodes {
                extra.insert("episodes".to_string(), episodes);
            }
            if let Some(podcast) = item.podcast {
                extra.insert("podcast".to_string(), podcast);
            }

            Season {
                id,
                podcast_id,
                number: item.number,
                episode_count,
                extra,
            }
        })
        .collect()
}
