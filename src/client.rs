//! Client construction.
//!
//! [`ClientBuilder`] collects credentials, transport options and endpoint
//! overrides, then builds either a [`CleanClient`] or a [`SuggestClient`].

use crate::config::{Config, Endpoints, TransportOptions};
use crate::dispatch::Dispatcher;
use crate::transport::{ReqwestTransport, Transport};
use crate::{CleanClient, Error, Result, SuggestClient};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// State shared by clones of a client.
pub(crate) struct ClientInner {
    pub(crate) dispatcher: Dispatcher,
    pub(crate) endpoints: Endpoints,
}

/// Builder for configuring and creating clients.
///
/// # Examples
///
/// ```no_run
/// use dadata::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), dadata::Error> {
/// let clean = ClientBuilder::new()
///     .token("api-token")
///     .secret("secret-key")
///     .timeout(Duration::from_secs(10))
///     .user_agent("my-app/1.0")
///     .build_clean()?;
///
/// let suggest = ClientBuilder::new()
///     .token("api-token")
///     .proxy("http://proxy.local:3128")?
///     .build_suggest()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct ClientBuilder {
    token: Option<String>,
    secret: Option<String>,
    options: TransportOptions,
    endpoints: Endpoints,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    /// Creates a builder with default endpoints and transport options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing [`Config`].
    pub fn from_config(config: Config) -> Self {
        Self {
            token: Some(config.token),
            secret: config.secret,
            options: config.transport,
            endpoints: config.endpoints,
            transport: None,
        }
    }

    /// Sets the API token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the secret key used by the cleaning API.
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Sets the total request timeout of the default transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout_ms = Some(duration_ms(timeout));
        self
    }

    /// Sets the connect timeout of the default transport.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.options.connect_timeout_ms = Some(duration_ms(timeout));
        self
    }

    /// Routes the default transport through a proxy.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn proxy(mut self, url: impl AsRef<str>) -> Result<Self> {
        Url::parse(url.as_ref())?;
        self.options.proxy = Some(url.as_ref().to_string());
        Ok(self)
    }

    /// Sets the `User-Agent` of the default transport.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.options.user_agent = Some(user_agent.into());
        self
    }

    /// Overrides the cleaning API base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn clean_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.endpoints.clean = validated(url.as_ref())?;
        Ok(self)
    }

    /// Overrides the suggestion API base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn suggest_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.endpoints.suggest = validated(url.as_ref())?;
        Ok(self)
    }

    /// Overrides the geolocation API base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn geolocation_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.endpoints.geolocation = validated(url.as_ref())?;
        Ok(self)
    }

    /// Replaces the default reqwest transport. Transport options are ignored.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds a client for the cleaning API.
    ///
    /// # Errors
    ///
    /// Returns an error if the token or secret is missing or invalid, or the
    /// transport cannot be built.
    pub fn build_clean(self) -> Result<CleanClient> {
        if self.secret.is_none() {
            return Err(Error::ConfigurationError(
                "A secret key is required for the cleaning API".to_string(),
            ));
        }
        Ok(CleanClient::from_inner(self.into_inner()?))
    }

    /// Builds a client for the suggestion API. The secret, if set, is unused.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is missing or invalid, or the transport
    /// cannot be built.
    pub fn build_suggest(self) -> Result<SuggestClient> {
        Ok(SuggestClient::from_inner(self.into_inner()?))
    }

    fn into_inner(self) -> Result<Arc<ClientInner>> {
        let token = self
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::ConfigurationError("API token is required".to_string()))?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(&self.options)?),
        };

        for base in [
            &self.endpoints.clean,
            &self.endpoints.suggest,
            &self.endpoints.geolocation,
        ] {
            Url::parse(base)?;
        }

        let dispatcher = Dispatcher::new(transport, &token, self.secret.as_deref())?;

        Ok(Arc::new(ClientInner {
            dispatcher,
            endpoints: self.endpoints,
        }))
    }
}

fn validated(url: &str) -> Result<String> {
    Url::parse(url)?;
    Ok(url.trim_end_matches('/').to_string())
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_required() {
        let result = ClientBuilder::new().secret("s").build_clean();
        assert!(matches!(result, Err(Error::ConfigurationError(_))));

        let result = ClientBuilder::new().token("").build_suggest();
        assert!(matches!(result, Err(Error::ConfigurationError(_))));
    }

    #[test]
    fn clean_client_requires_a_secret() {
        let result = ClientBuilder::new().token("t").build_clean();
        assert!(matches!(result, Err(Error::ConfigurationError(_))));
        assert!(ClientBuilder::new().token("t").build_suggest().is_ok());
    }

    #[test]
    fn endpoint_overrides_are_validated() {
        assert!(matches!(
            ClientBuilder::new().clean_url("not a url"),
            Err(Error::InvalidUrl(_))
        ));

        let builder = ClientBuilder::new()
            .suggest_url("http://localhost:8080/")
            .unwrap();
        assert_eq!(builder.endpoints.suggest, "http://localhost:8080");
    }

    #[test]
    fn config_endpoints_are_validated_at_build() {
        let mut config = Config::new("t");
        config.endpoints.geolocation = "::".to_string();
        let result = ClientBuilder::from_config(config).build_suggest();
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn timeouts_are_recorded_in_milliseconds() {
        let builder = ClientBuilder::new()
            .timeout(Duration::from_secs(2))
            .connect_timeout(Duration::from_millis(250));
        assert_eq!(builder.options.timeout_ms, Some(2000));
        assert_eq!(builder.options.connect_timeout_ms, Some(250));
    }
}
