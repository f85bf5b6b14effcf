//! Simplecast HTTP client
//!
//! Handles communication with the Simplecast v2 API.
//! See: https://help.simplecast.com/en/articles/2724796-simplecast-2-0-api
//!
//! Every request carries `Authorization: Bearer {token}` and
//! `Content-Type: application/json`. Callers can merge extra headers with
//! [`SimplecastClient::set_headers`], but can never replace the
//! Authorization header that way.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{adapter, dto};
use crate::casing;
use crate::simplecast::domain::{ClientError, Episode, FetchError, FetchLimit, Podcast, Season};

/// Simplecast API root
pub const BASE_URL: &str = "https://api.simplecast.com";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent string
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Connection settings that aren't credentials
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: String,
    pub timeout: Duration,
    /// Honor HTTP(S)_PROXY from the environment
    pub use_system_proxy: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            use_system_proxy: true,
        }
    }
}

/// Simplecast API client
pub struct SimplecastClient {
    http_client: reqwest::Client,
    base_url: String,
    podcast_id: String,
    headers: HeaderMap,
}

// Headers carry the bearer token, so they stay out of debug output
impl std::fmt::Debug for SimplecastClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimplecastClient")
            .field("base_url", &self.base_url)
            .field("podcast_id", &self.podcast_id)
            .finish_non_exhaustive()
    }
}

impl SimplecastClient {
    /// Create a client against the public Simplecast API.
    ///
    /// Fails before any network activity if either credential is empty.
    pub fn new(
        token: impl Into<String>,
        podcast_id: impl Into<String>,
    ) -> Result<Self, ClientError> {
        Self::with_options(token, podcast_id, ClientOptions::default())
    }

    /// Create a client with custom connection options
    pub fn with_options(
        token: impl Into<String>,
        podcast_id: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        let token = token.into();
        let podcast_id = podcast_id.into();

        if token.trim().is_empty() {
            return Err(ClientError::MissingToken);
        }
        if podcast_id.trim().is_empty() {
            return Err(ClientError::MissingPodcastId);
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
            .map_err(|_| ClientError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .gzip(true)
            .user_agent(USER_AGENT)
            .timeout(options.timeout);
        if !options.use_system_proxy {
            builder = builder.no_proxy();
        }
        let http_client = builder
            .build()
            .map_err(|e| ClientError::HttpClient(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: options.base_url,
            podcast_id: podcast_id.trim().to_string(),
            headers,
        })
    }

    /// The podcast this client is bound to
    pub fn podcast_id(&self) -> &str {
        &self.podcast_id
    }

    /// Headers sent with every request
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Merge extra headers into every subsequent request.
    ///
    /// `Authorization` (any casing) is dropped so credentials can't be
    /// overridden here. Names or values that aren't valid HTTP are skipped.
    pub fn set_headers<I, K, V>(&mut self, extra: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, value) in extra {
            let name = name.as_ref();
            if name.trim().eq_ignore_ascii_case(AUTHORIZATION.as_str()) {
                tracing::warn!("Ignoring Authorization in extra headers");
                continue;
            }

            let Ok(header_name) = HeaderName::from_bytes(name.trim().as_bytes()) else {
                tracing::warn!("Skipping invalid header name {:?}", name);
                continue;
            };
            let Ok(header_value) = HeaderValue::from_str(value.as_ref()) else {
                tracing::warn!("Skipping invalid value for header {}", header_name);
                continue;
            };

            self.headers.insert(header_name, header_value);
        }
    }

    /// Fetch the podcast's show metadata
    pub async fn fetch_podcast(&self) -> Result<Podcast, FetchError> {
        let path = format!("podcasts/{}", self.encoded_podcast_id());
        let response: dto::PodcastResponse = self.get_json(&path).await?;
        Ok(adapter::to_podcast(response))
    }

    /// Fetch the full podcast payload, camelCased, without the allow-list
    pub async fn fetch_show_info(&self) -> Result<Value, FetchError> {
        let path = format!("podcasts/{}", self.encoded_podcast_id());
        let response: Value = self.get_json(&path).await?;
        Ok(casing::camel_case_keys(response))
    }

    /// Fetch a single episode by id.
    ///
    /// An empty id is rejected before any request is made.
    pub async fn fetch_episode(&self, episode_id: &str) -> Result<Episode, FetchError> {
        let episode_id = episode_id.trim();
        if episode_id.is_empty() {
            return Err(FetchError::MissingEpisodeId);
        }

        let path = format!("episodes/{}", urlencoding::encode(episode_id));
        let response: dto::EpisodeItem = self.get_json(&path).await?;
        Ok(adapter::to_episode(response, &self.podcast_id))
    }

    /// Fetch one page of episodes, in the order the API returns them
    pub async fn fetch_episodes(&self, limit: FetchLimit) -> Result<Vec<Episode>, FetchError> {
        let path = format!(
            "podcasts/{}/episodes?limit={}",
            self.encoded_podcast_id(),
            limit
        );
        let response: dto::Collection<dto::EpisodeItem> = self.get_json(&path).await?;
        let episodes = adapter::to_episodes(response, &self.podcast_id);
        tracing::info!("Fetched {} episodes", episodes.len());
        Ok(episodes)
    }

    /// Fetch one page of seasons
    pub async fn fetch_seasons(&self, limit: FetchLimit) -> Result<Vec<Season>, FetchError> {
        let path = format!(
            "podcasts/{}/seasons?limit={}",
            self.encoded_podcast_id(),
            limit
        );
        let response: dto::SeasonsResponse = self.get_json(&path).await?;
        let seasons = adapter::to_seasons(response, &self.podcast_id);
        tracing::info!("Fetched {} seasons", seasons.len());
        Ok(seasons)
    }

    /// Full URL for an API path
    pub fn url_for(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    fn encoded_podcast_id(&self) -> String {
        urlencoding::encode(&self.podcast_id).into_owned()
    }

    /// Send a GET and parse the JSON body
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = self.url_for(path);
        tracing::debug!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .headers(self.headers.clone())
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: format!(
                    "{} - {}",
                    status.canonical_reason().unwrap_or("Unknown"),
                    body.chars().take(200).collect::<String>()
                ),
            });
        }

        let body = response.bytes().await.map_err(FetchError::from_reqwest)?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Parse(e.to_string()))
    }
}

/// Strip leading and trailing slashes from a path fragment
pub fn unslash(path: &str) -> &str {
    path.trim_matches('/')
}

/// Join a base URL and a path with exactly one slash between them
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), unslash(path))
}
