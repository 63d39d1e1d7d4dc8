//! Client configuration and the well-known environment presets.
//!
//! # Design
//! Configuration is an explicit value the caller builds at startup and hands
//! to `MarketplaceClient::new`. The sandbox and production environments are
//! exposed as constructors instead of process-wide constants. Loading the
//! values from files or the environment is left to the caller; the struct
//! derives `Deserialize` so any loader can produce one.

use serde::Deserialize;

/// Public sandbox environment of the seller API.
pub const SANDBOX_HOST: &str = "https://cb-api.ozonru.me";
pub const SANDBOX_CLIENT_ID: i64 = 836;
pub const SANDBOX_API_KEY: &str = "0296d4f2-70a1-4c09-b507-904fd05567b9";

/// Production environment. Requests here act on a real seller account.
pub const PRODUCTION_HOST: &str = "https://api-seller.ozon.ru";

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Base URL, e.g. `https://api-seller.ozon.ru`. A trailing slash is ignored.
    pub host: String,
    /// Seller account id, sent as `Client-Id`.
    pub client_id: i64,
    /// Sent as `Api-Key`.
    pub api_key: String,
}

impl ClientConfig {
    pub fn new(host: impl Into<String>, client_id: i64, api_key: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            client_id,
            api_key: api_key.into(),
        }
    }

    pub fn sandbox() -> Self {
        Self::new(SANDBOX_HOST, SANDBOX_CLIENT_ID, SANDBOX_API_KEY)
    }

    pub fn production(client_id: i64, api_key: impl Into<String>) -> Self {
        Self::new(PRODUCTION_HOST, client_id, api_key)
    }

    /// Host with any trailing slashes removed.
    pub fn base_url(&self) -> &str {
        self.host.trim_end_matches('/')
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("client_id", &self.client_id)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
