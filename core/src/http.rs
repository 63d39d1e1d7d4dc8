//! HTTP request/response types and the transport seam.
//!
//! # Design
//! Requests and responses are plain data. The client builds an
//! `HttpRequest`, hands it to a [`Transport`], and receives a [`RawResponse`]
//! whose body is still an open stream. [`read_response`] drains that stream
//! into an `HttpResponse`; the stream is dropped on every path out of it.
//! Keeping the transport behind a trait lets tests script responses without
//! a network and lets callers bring their own HTTP library.

use std::io::Read;
use std::sync::Arc;

use crate::error::{ApiError, TransportError};

/// An HTTP POST request described as plain data.
///
/// The seller API only accepts POST with a JSON body, so there is no method
/// field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A response as returned by a transport, body not yet read.
pub struct RawResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Box<dyn Read>,
}

impl std::fmt::Debug for RawResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// A fully read HTTP response.
///
/// `body` holds the bytes exactly as received; JSON decoding works on them
/// directly so a body that is not UTF-8 fails to decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// URL of the request this answers.
    pub url: String,
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text for diagnostics, invalid UTF-8 replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Sends one request and returns the response with an unread body.
///
/// Implementations must not retry or interpret the status code; non-2xx
/// responses are returned as data. Sharing a transport across threads is
/// only sound when the implementation is `Sync`.
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> Result<RawResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &HttpRequest) -> Result<RawResponse, TransportError> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: &HttpRequest) -> Result<RawResponse, TransportError> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, request: &HttpRequest) -> Result<RawResponse, TransportError> {
        (**self).send(request)
    }
}

/// Read the whole body of `raw` into an `HttpResponse` for `url`.
pub fn read_response(raw: RawResponse, url: &str) -> Result<HttpResponse, ApiError> {
    let RawResponse {
        status,
        headers,
        mut body,
    } = raw;

    let mut buf = Vec::new();
    body.read_to_end(&mut buf).map_err(|e| ApiError::BodyRead {
        url: url.to_string(),
        source: e,
    })?;

    Ok(HttpResponse {
        url: url.to_string(),
        status,
        headers,
        body: buf,
    })
}
