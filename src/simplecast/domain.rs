//! Internal domain models for Simplecast data.
//!
//! These types are OUR types - they don't change when the Simplecast API changes.
//! API responses get converted into these types in `adapter.rs`, and these get
//! turned into camelCased node fields via [`to_fields`](Podcast::to_fields).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::casing;

/// Default page size for collection fetches
pub const DEFAULT_FETCH_LIMIT: u32 = 99;

/// Page size used when a limit can't be read as a number
pub const FALLBACK_FETCH_LIMIT: u32 = 10;

/// Podcast show metadata.
///
/// The field list is the allow-list: anything else the API returns for a
/// podcast is discarded.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Podcast {
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
    /// Plain keyword strings, unwrapped from the API's collection envelope
    pub keywords: Vec<String>,
}

/// A single podcast episode.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Episode {
    pub id: String,
    /// Podcast this episode belongs to
    pub podcast_id: Option<String>,
    /// Season number, when the show is organized in seasons
    pub season_number: Option<u32>,
    /// Episode number within its season
    pub number: Option<u32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub published_at: Option<String>,
    pub status: Option<String>,
    pub image_url: Option<String>,
    /// Audio file URL (the API's `enclosure_url`)
    pub audio_url: Option<String>,
    /// Every other field the API returned, untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A podcast season.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Season {
    pub id: String,
    pub podcast_id: String,
    pub number: u32,
    pub episode_count: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

macro_rules! impl_to_fields {
    ($($ty:ty),*) => {$(
        impl $ty {
            /// Node fields for this record: serialized, then camelCased deeply.
            pub fn to_fields(&self) -> Map<String, Value> {
                match serde_json::to_value(self) {
                    Ok(Value::Object(map)) => casing::camel_case_map(map),
                    _ => Map::new(),
                }
            }
        }
    )*};
}

impl_to_fields!(Podcast, Episode, Season);

/// Page size for collection fetches.
///
/// Numbers are taken as-is. Anything that isn't a number (e.g. `"abc"` in a
/// config file or on the command line) falls back to
/// [`FALLBACK_FETCH_LIMIT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FetchLimit(u32);

impl FetchLimit {
    pub fn new(limit: u32) -> Self {
        Self(limit)
    }

    /// Parse a user-supplied limit, falling back to 10 for non-numeric input
    pub fn parse(input: &str) -> Self {
        input
            .trim()
            .parse::<u32>()
            .map(Self)
            .unwrap_or(Self(FALLBACK_FETCH_LIMIT))
    }

    /// Read a limit from an arbitrary JSON value
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Number(n) => n
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .map(Self)
                .unwrap_or(Self(FALLBACK_FETCH_LIMIT)),
            _ => Self(FALLBACK_FETCH_LIMIT),
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for FetchLimit {
    fn default() -> Self {
        Self(DEFAULT_FETCH_LIMIT)
    }
}

impl std::str::FromStr for FetchLimit {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl std::fmt::Display for FetchLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for FetchLimit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Float(f64),
            Text(String),
            Other(serde::de::IgnoredAny),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => u32::try_from(n)
                .map(Self)
                .unwrap_or(Self(FALLBACK_FETCH_LIMIT)),
            Raw::Float(_) | Raw::Other(_) => Self(FALLBACK_FETCH_LIMIT),
            Raw::Text(s) => Self::parse(&s),
        })
    }
}

/// Errors raised while constructing a client. These are fatal.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    #[error(
        "It looks like you forgot your Simplecast auth token! Pass it as `token` in the [credentials] \
         section of the config file, with --token, or via SIMPLECAST_TOKEN.\n\
         To learn more about Simplecast authentication, visit \
         https://help.simplecast.com/en/articles/2724796-simplecast-2-0-api"
    )]
    MissingToken,

    #[error(
        "It looks like you forgot your Simplecast podcast ID! Pass it as `podcast_id` in the \
         [credentials] section of the config file, with --podcast-id, or via SIMPLECAST_PODCAST_ID.\n\
         To get your podcast ID, log in to Simplecast and click 'Show Settings' from your \
         account dashboard."
    )]
    MissingPodcastId,

    #[error("Auth token contains characters that can't be sent in an HTTP header")]
    InvalidToken,

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Errors from a single fetch. These are never fatal to a sourcing run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("No episode ID provided")]
    MissingEpisodeId,
}

impl FetchError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Parse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Outcome of one best-effort fetch.
///
/// A failed fetch degrades to "no data" and keeps the reason, instead of
/// aborting the rest of the run.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Fetched(T),
    Degraded(FetchError),
}

impl<T> FetchOutcome<T> {
    /// Convert a fetch result, logging the failure under `label`
    pub fn from_result(label: &str, result: Result<T, FetchError>) -> Self {
        match result {
            Ok(value) => Self::Fetched(value),
            Err(e) => {
                tracing::error!("Simplecast {} fetch failed: {}", label, e);
                Self::Degraded(e)
            }
        }
    }

    pub fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched(_))
    }

    pub fn reason(&self) -> Option<&FetchError> {
        match self {
            Self::Fetched(_) => None,
            Self::Degraded(e) => Some(e),
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Fetched(value) => Some(value),
            Self::Degraded(_) => None,
        }
    }
}
