//! Error types for the seller API client.
//!
//! # Design
//! Each stage of a round-trip fails with its own variant: encoding the
//! payload, building the URL, sending, reading the body, checking the status
//! and decoding the envelope. A malformed body therefore always surfaces as
//! `Decode`, never as `Transport`. Nothing here is retried; the caller owns
//! retry policy.

use std::fmt;

use thiserror::Error;

/// Failure reported by a [`Transport`](crate::http::Transport) implementation.
///
/// Wraps whatever error type the underlying HTTP library produces so the
/// client does not depend on any particular one.
#[derive(Debug)]
pub struct TransportError(Box<dyn std::error::Error + Send + Sync>);

impl TransportError {
    pub fn new<E>(source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self(source.into())
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

/// Errors returned by `MarketplaceClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// `host + path` is not a valid absolute URL.
    #[error("invalid request URL '{url}': {source}")]
    RequestConstruction {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The transport could not send the request or the connection failed.
    #[error("transport error for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: TransportError,
    },

    /// The response body stream failed before it was fully read.
    #[error("failed to read response body from {url}: {source}")]
    BodyRead {
        url: String,
        #[source]
        source: std::io::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("HTTP {status} from {url}: {body}")]
    HttpStatus {
        url: String,
        status: u16,
        body: String,
    },

    /// The response body is not valid JSON or does not match the envelope.
    #[error("deserialization failed for {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A listing page came back empty before the reported total was reached.
    #[error("pagination stalled after {collected} of {total} items")]
    PaginationStalled { collected: usize, total: usize },
}

/// A multi-request operation that aborted part-way.
///
/// `items` holds everything accumulated before `error` occurred, in the
/// order it was received. Whether the partial data is usable is up to the
/// caller.
#[derive(Debug, Error)]
#[error("aborted after {} items: {error}", .items.len())]
pub struct PartialFetch<T: std::fmt::Debug> {
    pub items: Vec<T>,
    #[source]
    pub error: ApiError,
}

impl<T: std::fmt::Debug> PartialFetch<T> {
    /// Discards the partial items and keeps only the error.
    pub fn into_error(self) -> ApiError {
        self.error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_display_includes_body() {
        let err = ApiError::HttpStatus {
            url: "http://localhost/v2/product/info".to_string(),
            status: 404,
            body: r#"{"code":5}"#.to_string(),
        };
        assert_eq!(
            err.to_string(),
            r#"HTTP 404 from http://localhost/v2/product/info: {"code":5}"#
        );
    }

    #[test]
    fn partial_fetch_reports_count_and_source() {
        let partial = PartialFetch {
            items: vec!["a", "b"],
            error: ApiError::PaginationStalled {
                collected: 2,
                total: 5,
            },
        };
        assert_eq!(
            partial.to_string(),
            "aborted after 2 items: pagination stalled after 2 of 5 items"
        );
        let source = std::error::Error::source(&partial).unwrap();
        assert_eq!(source.to_string(), "pagination stalled after 2 of 5 items");
    }

    #[test]
    fn transport_error_is_transparent() {
        let err = TransportError::new("connection refused");
        assert_eq!(err.to_string(), "connection refused");
    }
}
