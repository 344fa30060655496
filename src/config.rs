//! Client configuration.
//!
//! Credentials are always passed in explicitly, either through a [`Config`]
//! (which can be deserialized from whatever source the application uses) or
//! through the fluent [`ClientBuilder`](crate::ClientBuilder).

use serde::Deserialize;
use std::fmt;

/// Default base URL of the cleaning API.
pub const DEFAULT_CLEAN_URL: &str = "https://dadata.ru/api";

/// Default base URL of the suggestion API.
pub const DEFAULT_SUGGEST_URL: &str = "https://suggestions.dadata.ru/suggestions/api";

/// Default base URL of the IP geolocation API.
pub const DEFAULT_GEOLOCATION_URL: &str = "https://suggestions.dadata.ru/suggestions/api";

/// Everything needed to construct a client.
///
/// # Examples
///
/// ```
/// use dadata::Config;
///
/// let config: Config = serde_json::from_str(r#"{
///     "token": "api-token",
///     "secret": "secret-key",
///     "transport": { "timeout_ms": 5000 }
/// }"#).unwrap();
///
/// assert_eq!(config.transport.timeout_ms, Some(5000));
/// assert_eq!(config.endpoints.clean, dadata::config::DEFAULT_CLEAN_URL);
/// ```
#[derive(Clone, Deserialize)]
pub struct Config {
    /// API token, sent as `Authorization: Token <token>`.
    pub token: String,

    /// Secret key, sent as `X-Secret`. Required by the cleaning API only.
    #[serde(default)]
    pub secret: Option<String>,

    /// Options handed to the default transport.
    #[serde(default)]
    pub transport: TransportOptions,

    /// Base URLs of the three API families.
    #[serde(default)]
    pub endpoints: Endpoints,
}

impl Config {
    /// Creates a configuration with the given token and default everything else.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            secret: None,
            transport: TransportOptions::default(),
            endpoints: Endpoints::default(),
        }
    }

    /// Sets the secret key.
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("transport", &self.transport)
            .field("endpoints", &self.endpoints)
            .finish()
    }
}

/// Options for the default reqwest transport. The core never reads them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransportOptions {
    /// Total request timeout in milliseconds.
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Connect timeout in milliseconds.
    #[serde(default)]
    pub connect_timeout_ms: Option<u64>,

    /// Proxy URL applied to all requests.
    #[serde(default)]
    pub proxy: Option<String>,

    /// `User-Agent` header value.
    #[serde(default)]
    pub user_agent: Option<String>,
}

/// Base URLs for the cleaning, suggestion and geolocation APIs.
///
/// Request URLs are these bases followed by a version segment and the
/// operation path, joined with `/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// Cleaning API base.
    pub clean: String,
    /// Suggestion API base.
    pub suggest: String,
    /// Geolocation API base.
    pub geolocation: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            clean: DEFAULT_CLEAN_URL.to_string(),
            suggest: DEFAULT_SUGGEST_URL.to_string(),
            geolocation: DEFAULT_GEOLOCATION_URL.to_string(),
        }
    }
}
