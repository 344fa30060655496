//! The HTTP seam between the dispatcher and the network.
//!
//! Requests and responses are plain data. The dispatcher builds an
//! [`HttpRequest`], a [`Transport`] executes it, and the dispatcher interprets
//! the returned [`HttpResponse`]. Timeouts, proxies and connection reuse are
//! the transport's business; the core imposes none of its own.

use crate::config::TransportOptions;
use crate::{Error, Result};
use async_trait::async_trait;
use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use std::time::Duration;
use url::Url;

/// An HTTP request described as plain data.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// The HTTP method (GET, POST).
    pub method: Method,

    /// The absolute request URL, query string included.
    pub url: String,

    /// Request headers.
    pub headers: HeaderMap,

    /// Serialized JSON body, if any.
    pub body: Option<String>,
}

impl HttpRequest {
    /// Creates a request with no headers and no body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Adds a header.
    pub fn with_header_value(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Serializes `body` as the JSON request body.
    pub fn with_json_body(mut self, body: &serde_json::Value) -> Result<Self> {
        let json =
            serde_json::to_string(body).map_err(|e| Error::SerializationFailed(e.to_string()))?;
        self.body = Some(json);
        Ok(self)
    }

    /// Returns a header value by name, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub status: StatusCode,

    /// The raw response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a response.
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Executes HTTP requests on behalf of the clients.
///
/// Implementations must be safe to share between tasks; the clients hold one
/// behind an `Arc` and issue calls concurrently when their callers do.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use dadata::transport::{HttpRequest, HttpResponse, Transport};
/// use http::StatusCode;
///
/// struct Canned;
///
/// #[async_trait]
/// impl Transport for Canned {
///     async fn send(&self, _request: HttpRequest) -> dadata::Result<HttpResponse> {
///         Ok(HttpResponse::new(StatusCode::OK, r#"{"balance": 10.5}"#))
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` and returns whatever the server answered.
    ///
    /// Non-2xx statuses are returned as responses, not errors. Only failures
    /// to obtain a response at all should produce [`Error::Transport`].
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// The default [`Transport`], backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http_client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds a transport from the pass-through options.
    ///
    /// # Errors
    ///
    /// Returns an error if the proxy URL is invalid or the underlying client
    /// cannot be constructed.
    pub fn new(options: &TransportOptions) -> Result<Self> {
        let mut builder = reqwest::Client::builder();

        if let Some(ms) = options.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        if let Some(ms) = options.connect_timeout_ms {
            builder = builder.connect_timeout(Duration::from_millis(ms));
        }
        if let Some(proxy) = &options.proxy {
            let proxy = reqwest::Proxy::all(proxy.as_str())
                .map_err(|e| Error::ConfigurationError(format!("Invalid proxy: {}", e)))?;
            builder = builder.proxy(proxy);
        }
        if let Some(user_agent) = &options.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }

        let http_client = builder.build().map_err(|e| {
            Error::ConfigurationError(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = Url::parse(&request.url)?;

        let mut builder = self
            .http_client
            .request(request.method, url)
            .headers(request.headers);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        Ok(HttpResponse::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_are_readable_by_name() {
        let request = HttpRequest::new(Method::GET, "https://example.com")
            .with_header_value(http::header::ACCEPT, HeaderValue::from_static("application/json"));
        assert_eq!(request.header("accept"), Some("application/json"));
        assert_eq!(request.header("content-type"), None);
    }

    #[test]
    fn json_body_is_serialized() {
        let request = HttpRequest::new(Method::POST, "https://example.com")
            .with_json_body(&serde_json::json!(["Moscow"]))
            .unwrap();
        assert_eq!(request.body.as_deref(), Some(r#"["Moscow"]"#));
    }

    #[test]
    fn invalid_proxy_is_a_configuration_error() {
        let options = TransportOptions {
            proxy: Some("not a url".to_string()),
            ..TransportOptions::default()
        };
        assert!(matches!(
            ReqwestTransport::new(&options),
            Err(Error::ConfigurationError(_))
        ));
    }

    #[test]
    fn default_options_build() {
        assert!(ReqwestTransport::new(&TransportOptions::default()).is_ok());
    }
}
