//! Blocking `ureq` transport.
//!
//! The agent is configured not to turn 4xx/5xx statuses into errors, so the
//! client sees every response as data and applies its own status check.
//! Timeouts, pooling and TLS are whatever the agent was configured with.

use crate::error::TransportError;
use crate::http::{HttpRequest, RawResponse, Transport};

#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl std::fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Wrap an agent the caller configured. Its `http_status_as_error`
    /// setting should be off, otherwise non-2xx responses arrive as
    /// transport errors.
    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<RawResponse, TransportError> {
        let mut builder = self.agent.post(request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .send(request.body.as_bytes())
            .map_err(TransportError::new)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.into_body().into_reader();

        Ok(RawResponse {
            status,
            headers,
            body: Box::new(body),
        })
    }
}
