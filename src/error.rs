//! Error types for the homework poller

use std::error::Error as StdError;

/// Boxed cause carried by transport-level failures.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Errors a single polling cycle can fail with.
///
/// All of them are recovered by the poller: logged, relayed to the recipient
/// when distinct from the last reported error, and retried on the next cycle.
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error("API request failed: {}", error_chain(.source.as_ref()))]
    Transport {
        #[source]
        source: BoxError,
    },

    #[error("API returned {status} for {url}")]
    Endpoint { status: u16, url: String },

    #[error("malformed API response: {0}")]
    MalformedResponse(String),

    #[error("unknown homework status: {0}")]
    UnknownStatus(String),
}

/// Render `err` followed by each of its sources, joined with ": ".
/// A source whose text the rendering already contains is skipped.
pub fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut rendered = err.to_string();
    let mut current = err.source();
    while let Some(cause) = current {
        let text = cause.to_string();
        if !rendered.contains(&text) {
            rendered.push_str(": ");
            rendered.push_str(&text);
        }
        current = cause.source();
    }
    rendered
}

impl PollError {
    pub fn transport(source: impl Into<BoxError>) -> Self {
        PollError::Transport {
            source: source.into(),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        PollError::MalformedResponse(reason.into())
    }
}

/// The messaging collaborator could not deliver a message.
#[derive(Debug, thiserror::Error)]
#[error("failed to deliver message: {0}")]
pub struct DeliveryError(#[source] pub BoxError);

impl DeliveryError {
    pub fn new(source: impl Into<BoxError>) -> Self {
        Self(source.into())
    }
}

/// Startup configuration failures. These are fatal.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),

    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_display_includes_cause() {
        let err = PollError::transport(std::io::Error::other("connection refused"));
        assert_eq!(err.to_string(), "API request failed: connection refused");
        assert!(err.source().is_some());
    }

    #[derive(Debug, thiserror::Error)]
    #[error("error sending request")]
    struct Outer(#[source] std::io::Error);

    #[test]
    fn test_transport_display_walks_source_chain() {
        let inner = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        let err = PollError::transport(Outer(inner));
        assert_eq!(
            err.to_string(),
            "API request failed: error sending request: connection refused"
        );
    }

    #[test]
    fn test_error_chain_skips_repeated_text() {
        #[derive(Debug, thiserror::Error)]
        #[error("tcp connect error: {0}")]
        struct Echoing(#[source] std::io::Error);

        let err = Echoing(std::io::Error::other("connection refused"));
        assert_eq!(error_chain(&err), "tcp connect error: connection refused");
    }

    #[test]
    fn test_endpoint_display() {
        let err = PollError::Endpoint {
            status: 503,
            url: "https://example.test/api/".to_string(),
        };
        assert_eq!(err.to_string(), "API returned 503 for https://example.test/api/");
    }

    #[test]
    fn test_missing_credentials_lists_all_names() {
        let err = ConfigError::MissingCredentials(vec!["PRACTICUM_TOKEN", "TELEGRAM_CHAT_ID"]);
        assert_eq!(
            err.to_string(),
            "missing required environment variables: PRACTICUM_TOKEN, TELEGRAM_CHAT_ID"
        );
    }
}
