//! Simplecast API Data Transfer Objects
//!
//! These types match what the Simplecast v2 API returns.
//! DO NOT use these types outside the simplecast module - convert to domain types.
//!
//! API Reference: https://help.simplecast.com/en/articles/2724796-simplecast-2-0-api
//!
//! Collections come wrapped in an envelope:
//! ```json
//! {
//!   "href": "https://api.simplecast.com/podcasts/abc/episodes?limit=99",
//!   "pages": { "total": 1, "limit": 99, "current": 1 },
//!   "collection": [ { "id": "ep-1", "title": "Pilot", ... } ]
//! }
//! ```

use serde::Deserialize;
use serde_json::{Map, Value};

/// Collection envelope around a list of items
#[derive(Debug, Clone, Deserialize)]
pub struct Collection<T> {
    pub collection: Vec<T>,
}

/// `GET /podcasts/{id}`, restricted to the fields we keep
#[derive(Debug, Clone, Deserialize)]
pub struct PodcastResponse {
    pub id: String,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub copyright: Option<String>,
    pub created_at: Option<String>,
    pub published_at: Option<String>,
    pub feed_url: Option<String>,
    pub image_url: Option<String>,
    pub image_path: Option<String>,
    pub logo_image_url: Option<String>,
    pub language: Option<String>,
    pub site: Option<Value>,
    pub owner: Option<Value>,
    pub time_zone: Option<String>,
    pub keywords: Option<Collection<Keyword>>,
}

/// Keyword entries are objects in the v2 API; older payloads use bare strings.
///
/// Anything else is tolerated and dropped so one odd entry can't fail the
/// whole podcast.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Keyword {
    Plain(String),
    Object {
        #[serde(alias = "name")]
        value: String,
    },
    Other(serde::de::IgnoredAny),
}

impl Keyword {
    pub fn into_value(self) -> Option<String> {
        match self {
            Keyword::Plain(value) | Keyword::Object { value } => Some(value),
            Keyword::Other(_) => None,
        }
    }
}

/// One item of `GET /podcasts/{id}/episodes`, or `GET /episodes/{id}`
///
/// `season` and `podcast` stay raw: the adapter reads the number and id out
/// of them and passes the objects through untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct EpisodeItem {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub published_at: Option<String>,
    pub status: Option<String>,
    pub image_url: Option<String>,
    pub enclosure_url: Option<String>,
    pub number: Option<u32>,
    pub season: Option<Value>,
    pub podcast: Option<Value>,
    /// Remaining fields, passed through to the node
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EpisodeItem {
    /// `season.number`, if the episode belongs to a season
    pub fn season_number(&self) -> Option<u32> {
        self.season.as_ref().and_then(|s| u32_field(s, "number"))
    }

    /// `podcast.id`, if the API embedded the parent podcast
    pub fn podcast_id(&self) -> Option<String> {
        str_field(self.podcast.as_ref()?, "id")
    }
}

/// `GET /podcasts/{id}/seasons`
///
/// The seasons contract isn't documented; accept both the usual envelope
/// and a bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SeasonsResponse {
    Envelope(Collection<SeasonItem>),
    Bare(Vec<SeasonItem>),
}

impl SeasonsResponse {
    pub fn into_items(self) -> Vec<SeasonItem> {
        match self {
            SeasonsResponse::Envelope(envelope) => envelope.collection,
            SeasonsResponse::Bare(items) => items,
        }
    }
}

/// One season entry
#[derive(Debug, Clone, Deserialize)]
pub struct SeasonItem {
    pub id: Option<String>,
    pub number: u32,
    pub episode_count: Option<u32>,
    /// `{"count": n, "href": ...}` sub-resource summary
    pub episodes: Option<Value>,
    pub podcast: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SeasonItem {
    /// `episode_count`, or `episodes.count` when only the summary is sent
    pub fn count(&self) -> Option<u32> {
        self.episode_count
            .or_else(|| self.episodes.as_ref().and_then(|e| u32_field(e, "count")))
    }

    pub fn podcast_id(&self) -> Option<String> {
        str_field(self.podcast.as_ref()?, "id")
    }
}

fn u32_field(value: &Value, name: &str) -> Option<u32> {
    value
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
}

fn str_field(value: &Value, name: &str) -> Option<String> {
    value.get(name).and_then(Value::as_str).map(str::to_string)
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================

#[cfg(test)]
mod contract_tests {
    use super::*;
    use crate::test_utils::{EPISODES_JSON, PODCAST_JSON};

    #[test]
    fn test_parse_full_podcast() {
        let podcast: PodcastResponse =
            serde_json::from_str(PODCAST_JSON).expect("Should parse podcast");

        assert_eq!(podcast.id, "6d2ef9d5-0d83-4bd6-9ad3-6c3e3d7a2b11");
        assert_eq!(podcast.title.as_deref(), Some("Rust in Production"));
        assert_eq!(podcast.time_zone.as_deref(), Some("America/New_York"));
        let keywords = podcast.keywords.expect("keywords envelope");
        assert_eq!(keywords.collection.len(), 2);
    }

    #[test]
    fn test_parse_minimal_podcast() {
        let json = r#"{ "id": "abc" }"#;
        let podcast: PodcastResponse = serde_json::from_str(json).expect("Should parse minimal");
        assert_eq!(podcast.id, "abc");
        assert!(podcast.keywords.is_none());
        assert!(podcast.owner.is_none());
    }

    #[test]
    fn test_parse_null_fields() {
        let json = r#"{ "id": "abc", "copyright": null, "keywords": { "collection": [] } }"#;
        let podcast: PodcastResponse = serde_json::from_str(json).expect("Should parse nulls");
        assert!(podcast.copyright.is_none());
        assert!(podcast.keywords.unwrap().collection.is_empty());
    }

    #[test]
    fn test_keyword_shapes() {
        let json = r#"[ "plain", { "value": "object" }, { "name": "named", "href": "x" } ]"#;
        let keywords: Vec<Keyword> = serde_json::from_str(json).expect("Should parse keywords");
        let values: Vec<_> = keywords.into_iter().filter_map(Keyword::into_value).collect();
        assert_eq!(values, vec!["plain", "object", "named"]);
    }

    #[test]
    fn test_unknown_keyword_shape_does_not_fail_podcast() {
        let json = PODCAST_JSON.replacen(
            r#"{ "value": "rust", "href": "https://api.simplecast.com/keywords/1" }"#,
            r#"{ "href": "https://api.simplecast.com/keywords/1" }"#,
            1,
        );
        let podcast: PodcastResponse =
            serde_json::from_str(&json).expect("Should parse despite odd keyword");

        let keywords = podcast.keywords.expect("keywords envelope");
        assert_eq!(keywords.collection.len(), 2);
        assert!(matches!(keywords.collection[0], Keyword::Other(_)));

        let json = r#"{ "id": "abc", "keywords": { "collection": [ 42, null, "ok" ] } }"#;
        let podcast: PodcastResponse = serde_json::from_str(json).expect("Should parse");
        let values: Vec<_> = podcast
            .keywords
            .unwrap()
            .collection
            .into_iter()
            .filter_map(Keyword::into_value)
            .collect();
        assert_eq!(values, vec!["ok"]);
    }

    #[test]
    fn test_parse_episode_collection() {
        let episodes: Collection<EpisodeItem> =
            serde_json::from_str(EPISODES_JSON).expect("Should parse episodes");

        assert_eq!(episodes.collection.len(), 2);
        let first = &episodes.collection[0];
        assert_eq!(first.id, "ep-2");
        assert_eq!(first.season_number(), Some(1));
        assert_eq!(first.enclosure_url.as_deref(), Some("https://cdn.example.com/ep-2.mp3"));
        assert!(first.extra.contains_key("duration"));
        assert!(first.podcast_id().is_none());
        assert_eq!(episodes.collection[1].podcast_id().as_deref(), Some("pod-1"));
        assert_eq!(episodes.collection[1].season_number(), None);
    }

    #[test]
    fn test_episode_collection_requires_envelope() {
        let json = r#"[ { "id": "ep-1" } ]"#;
        let result: Result<Collection<EpisodeItem>, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_seasons_envelope_and_bare() {
        let envelope = r#"{ "collection": [ { "number": 1, "episodes": { "count": 8 } } ] }"#;
        let bare = r#"[ { "id": "s-2", "number": 2, "episode_count": 4 } ]"#;

        let from_envelope: SeasonsResponse = serde_json::from_str(envelope).unwrap();
        let items = from_envelope.into_items();
        assert_eq!(items[0].number, 1);
        assert_eq!(items[0].count(), Some(8));

        let from_bare: SeasonsResponse = serde_json::from_str(bare).unwrap();
        let items = from_bare.into_items();
        assert_eq!(items[0].id.as_deref(), Some("s-2"));
        assert_eq!(items[0].count(), Some(4));
    }
}
