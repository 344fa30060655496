//! Error types for DaData API calls.
//!
//! Every failure surfaces to the caller as an [`Error`]. Nothing is retried,
//! logged or swallowed on the way out, and variants that originate from an HTTP
//! response keep the raw body so the provider's own message is never lost.

use http::StatusCode;

/// Boxed error produced by a [`Transport`](crate::transport::Transport).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for DaData API calls.
///
/// # Examples
///
/// ```no_run
/// use dadata::{CleanClient, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = CleanClient::builder()
///     .token("token")
///     .secret("secret")
///     .build_clean()?;
///
/// match client.clean_phone("+7 495 123-45-67").await {
///     Ok(phone) => println!("Normalized: {:?}", phone.phone),
///     Err(Error::EmptyResult) => eprintln!("Nothing recognized"),
///     Err(Error::Decode { raw_response, .. }) => eprintln!("Garbled body: {}", raw_response),
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The transport failed before a response was received (connection,
    /// DNS, TLS, timeout configured on the transport, ...).
    #[error("Transport error: {0}")]
    Transport(#[source] BoxError),

    /// A cleaning-family request came back with a non-2xx status.
    #[error("HTTP error {status}: {raw_response}")]
    HttpError {
        /// The HTTP status code
        status: StatusCode,
        /// The raw response body
        raw_response: String,
    },

    /// The response body is not valid JSON.
    #[error("Failed to decode response (status {status}): {serde_error}")]
    Decode {
        /// The raw response body that failed to decode
        raw_response: String,
        /// The serde error message
        serde_error: String,
        /// The HTTP status code
        status: StatusCode,
    },

    /// The response decoded to `null`, an empty array or an empty object,
    /// or a suggestion response carried no suggestions.
    #[error("Empty result")]
    EmptyResult,

    /// A suggestion request was about to be sent without a non-empty `query`.
    #[error("Empty request: the `query` field is required")]
    EmptyQuery,

    /// A structural key is absent from a geolocation response.
    ///
    /// A key that is present but `null` is a legitimate "no match" and is not
    /// reported through this variant.
    #[error("Required key \"{0}\" is missing")]
    MissingKey(&'static str),

    /// 400: the provider rejected the request as malformed.
    #[error("Incorrect request: {raw_response}")]
    BadRequest {
        /// The raw response body
        raw_response: String,
    },

    /// 401: the request carried no API key.
    #[error("Missing API key")]
    MissingApiKey {
        /// The raw response body
        raw_response: String,
    },

    /// 403: the API key does not exist.
    #[error("Incorrect API key")]
    InvalidApiKey {
        /// The raw response body
        raw_response: String,
    },

    /// 405: the endpoint only accepts another HTTP method.
    #[error("Request method not allowed")]
    MethodNotAllowed {
        /// The raw response body
        raw_response: String,
    },

    /// 413: request limits were exceeded.
    #[error("Suggestion limits exceeded")]
    LimitExceeded {
        /// The raw response body
        raw_response: String,
    },

    /// 500: the provider failed while processing the request.
    #[error("Server internal error")]
    ServerError {
        /// The raw response body
        raw_response: String,
    },

    /// Any other non-200 status from a suggestion-family endpoint.
    #[error("Unexpected status {status}: {raw_response}")]
    UnexpectedStatus {
        /// The HTTP status code
        status: StatusCode,
        /// The raw response body
        raw_response: String,
    },

    /// A decoded value could not be mapped onto the expected schema because
    /// it is not a JSON object.
    #[error("Cannot populate {expected} from a JSON {found}")]
    SchemaMismatch {
        /// Name of the schema that was requested
        expected: &'static str,
        /// Kind of JSON value that was found instead
        found: &'static str,
    },

    /// Invalid configuration was provided (missing credential, bad header value, ...).
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// An invalid URL was provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Failed to serialize the request body.
    #[error("Failed to serialize request: {0}")]
    SerializationFailed(String),
}

impl Error {
    /// Wraps any transport failure.
    pub fn transport(err: impl Into<BoxError>) -> Self {
        Error::Transport(err.into())
    }

    /// Returns the HTTP status code if this error came from a response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::HttpError { status, .. }
            | Error::Decode { status, .. }
            | Error::UnexpectedStatus { status, .. } => Some(*status),
            Error::BadRequest { .. } => Some(StatusCode::BAD_REQUEST),
            Error::MissingApiKey { .. } => Some(StatusCode::UNAUTHORIZED),
            Error::InvalidApiKey { .. } => Some(StatusCode::FORBIDDEN),
            Error::MethodNotAllowed { .. } => Some(StatusCode::METHOD_NOT_ALLOWED),
            Error::LimitExceeded { .. } => Some(StatusCode::PAYLOAD_TOO_LARGE),
            Error::ServerError { .. } => Some(StatusCode::INTERNAL_SERVER_ERROR),
            _ => None,
        }
    }

    /// Returns the raw response body if this error has one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::HttpError { raw_response, .. }
            | Error::Decode { raw_response, .. }
            | Error::BadRequest { raw_response }
            | Error::MissingApiKey { raw_response }
            | Error::InvalidApiKey { raw_response }
            | Error::MethodNotAllowed { raw_response }
            | Error::LimitExceeded { raw_response }
            | Error::ServerError { raw_response }
            | Error::UnexpectedStatus { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(Box::new(err))
    }
}

/// A specialized `Result` type for DaData API calls.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_errors_report_their_status() {
        let err = Error::InvalidApiKey {
            raw_response: "{}".to_string(),
        };
        assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
        assert_eq!(err.raw_response(), Some("{}"));

        let err = Error::LimitExceeded {
            raw_response: String::new(),
        };
        assert_eq!(err.status().map(|s| s.as_u16()), Some(413));
    }

    #[test]
    fn structural_errors_have_no_status() {
        assert_eq!(Error::EmptyResult.status(), None);
        assert_eq!(Error::MissingKey("location").raw_response(), None);
        assert_eq!(
            Error::MissingKey("location").to_string(),
            "Required key \"location\" is missing"
        );
    }

    #[test]
    fn transport_wraps_any_error() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = Error::transport(io);
        assert!(matches!(err, Error::Transport(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
