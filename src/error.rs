//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`, while the
//! CLI uses `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`Error`]: Top-level error enum
//! - Module-specific errors ([`ClientError`], [`FetchError`], [`HostError`],
//!   [`ConfigError`]) for detailed handling
//!
//! # Example
//!
//! ```ignore
//! use simplecast_source::error::{Result, ResultExt};
//!
//! fn client(config: &Config) -> Result<SimplecastClient> {
//!     let client = SimplecastClient::with_options(token, id, config.client_options())
//!         .map_err(Error::from)
//!         .with_context("building Simplecast client")?;
//!     Ok(client)
//! }
//! ```

use crate::config::ConfigError;
use crate::simplecast::{ClientError, FetchError};
use crate::source::HostError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Client construction error (missing or unusable credentials)
    #[error(transparent)]
    Client(#[from] ClientError),

    /// API request error
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Host collaborator error
    #[error(transparent)]
    Host(#[from] HostError),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, ClientError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Client(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, FetchError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Fetch(e).context(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_is_transparent() {
        let err = Error::from(ClientError::MissingToken);
        assert_eq!(err.to_string(), ClientError::MissingToken.to_string());
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::from(FetchError::Timeout).context("while fetching episodes");
        let msg = err.to_string();
        assert!(msg.contains("while fetching episodes"));
        assert!(msg.contains("Request timed out"));
    }

    #[test]
    fn test_result_ext() {
        let result: std::result::Result<(), FetchError> = Err(FetchError::Status {
            status: 401,
            message: "Unauthorized".to_string(),
        });
        let with_ctx = result.with_context("podcast");
        let msg = with_ctx.unwrap_err().to_string();
        assert!(msg.contains("podcast"));
        assert!(msg.contains("401"));
    }

    #[test]
    fn test_io_context() {
        let result: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::other("disk full"));
        let err = result.with_context("writing output").unwrap_err();
        assert!(matches!(err, Error::WithContext { .. }));
        assert!(err.to_string().contains("disk full"));
    }
}
