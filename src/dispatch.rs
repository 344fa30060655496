//! Request dispatch: build, send, check status, decode, unwrap.
//!
//! One [`Dispatcher`] is shared by a client for its whole life. It holds the
//! transport and the pre-validated credential headers and keeps no other state.

use crate::catalog::{Envelope, Family, Operation};
use crate::envelope;
use crate::transport::{HttpRequest, HttpResponse, Transport};
use crate::{Error, Result};
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderName, HeaderValue, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

const SECRET_HEADER: HeaderName = HeaderName::from_static("x-secret");
const APPLICATION_JSON: HeaderValue = HeaderValue::from_static("application/json");

pub(crate) struct Dispatcher {
    transport: Arc<dyn Transport>,
    authorization: HeaderValue,
    secret: Option<HeaderValue>,
}

impl Dispatcher {
    /// Validates the credentials as header values.
    ///
    /// # Errors
    ///
    /// Returns an error if the token or secret contains characters that are
    /// not allowed in an HTTP header.
    pub(crate) fn new(
        transport: Arc<dyn Transport>,
        token: &str,
        secret: Option<&str>,
    ) -> Result<Self> {
        let authorization = sensitive(&format!("Token {}", token), "token")?;
        let secret = secret.map(|s| sensitive(s, "secret")).transpose()?;
        Ok(Self {
            transport,
            authorization,
            secret,
        })
    }

    /// Performs `operation` against `url` and returns the normalized body.
    pub(crate) async fn call(
        &self,
        operation: &Operation,
        url: String,
        body: Option<&Value>,
    ) -> Result<Value> {
        let request = self.build_request(operation, url, body)?;

        tracing::debug!(
            operation = operation.name,
            method = %request.method,
            url = %request.url,
            "Executing HTTP request"
        );

        let start_time = Instant::now();
        let response = self.transport.send(request).await?;

        tracing::debug!(
            operation = operation.name,
            status = response.status.as_u16(),
            latency_ms = start_time.elapsed().as_millis(),
            "Received HTTP response"
        );

        match operation.family {
            Family::Clean => check_clean_status(&response)?,
            Family::Suggest | Family::Geolocation => check_protocol_status(&response)?,
        }

        let decoded = decode(response)?;

        match operation.envelope {
            Envelope::Single => envelope::unwrap_clean(decoded),
            Envelope::Suggestions => envelope::unwrap_suggestions(decoded),
            Envelope::Raw => Ok(decoded),
        }
    }

    fn build_request(
        &self,
        operation: &Operation,
        url: String,
        body: Option<&Value>,
    ) -> Result<HttpRequest> {
        let mut request = HttpRequest::new(operation.method.clone(), url)
            .with_header_value(AUTHORIZATION, self.authorization.clone());

        match operation.family {
            Family::Clean => {
                let secret = self.secret.clone().ok_or_else(|| {
                    Error::ConfigurationError(
                        "A secret key is required for the cleaning API".to_string(),
                    )
                })?;
                request = request
                    .with_header_value(CONTENT_TYPE, APPLICATION_JSON)
                    .with_header_value(SECRET_HEADER, secret);
            }
            Family::Suggest => {
                request = request
                    .with_header_value(CONTENT_TYPE, APPLICATION_JSON)
                    .with_header_value(ACCEPT, APPLICATION_JSON);
            }
            Family::Geolocation => {
                request = request.with_header_value(ACCEPT, APPLICATION_JSON);
            }
        }

        if let Some(body) = body {
            request = request.with_json_body(body)?;
        }

        Ok(request)
    }
}

fn sensitive(value: &str, what: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::try_from(value)
        .map_err(|e| Error::ConfigurationError(format!("Invalid {}: {}", what, e)))?;
    value.set_sensitive(true);
    Ok(value)
}

/// Cleaning endpoints answer 2xx or fail with the raw body.
fn check_clean_status(response: &HttpResponse) -> Result<()> {
    if response.status.is_success() {
        return Ok(());
    }
    Err(Error::HttpError {
        status: response.status,
        raw_response: response.body.clone(),
    })
}

/// Suggestion and geolocation endpoints document a fixed set of statuses.
/// The body is never decoded when the status is not 200.
fn check_protocol_status(response: &HttpResponse) -> Result<()> {
    let raw_response = || response.body.clone();
    match response.status {
        StatusCode::OK => Ok(()),
        StatusCode::BAD_REQUEST => Err(Error::BadRequest {
            raw_response: raw_response(),
        }),
        StatusCode::UNAUTHORIZED => Err(Error::MissingApiKey {
            raw_response: raw_response(),
        }),
        StatusCode::FORBIDDEN => Err(Error::InvalidApiKey {
            raw_response: raw_response(),
        }),
        StatusCode::METHOD_NOT_ALLOWED => Err(Error::MethodNotAllowed {
            raw_response: raw_response(),
        }),
        StatusCode::PAYLOAD_TOO_LARGE => Err(Error::LimitExceeded {
            raw_response: raw_response(),
        }),
        StatusCode::INTERNAL_SERVER_ERROR => Err(Error::ServerError {
            raw_response: raw_response(),
        }),
        status => Err(Error::UnexpectedStatus {
            status,
            raw_response: raw_response(),
        }),
    }
}

fn decode(response: HttpResponse) -> Result<Value> {
    serde_json::from_str::<Value>(&response.body).map_err(|e| Error::Decode {
        serde_error: e.to_string(),
        raw_response: response.body,
        status: response.status,
    })
}
