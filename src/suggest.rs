//! The suggestion API: ranked candidates for partial input and lookups by id.

use crate::catalog::{self, SuggestionType};
use crate::client::{ClientBuilder, ClientInner};
use crate::config::Config;
use crate::envelope;
use crate::populate::populate;
use crate::response::Cdek;
use crate::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Body of a suggestion request.
///
/// # Examples
///
/// ```
/// use dadata::SuggestRequest;
/// use serde_json::json;
///
/// let request = SuggestRequest::new("сбербанк")
///     .count(5)
///     .with("status", json!(["ACTIVE"]));
///
/// assert_eq!(
///     serde_json::to_value(&request).unwrap(),
///     json!({"query": "сбербанк", "count": 5, "status": ["ACTIVE"]})
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SuggestRequest {
    /// The partial input to complete.
    pub query: String,

    /// Maximum number of suggestions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,

    /// Filters and other directory-specific parameters.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SuggestRequest {
    /// Creates a request for `query`.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Limits the number of suggestions.
    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Adds a directory-specific parameter.
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// A client for the suggestion API.
///
/// Results are returned as JSON: the single suggestion when exactly one
/// matched, otherwise the array of suggestions.
///
/// # Examples
///
/// ```no_run
/// use dadata::{SuggestClient, SuggestRequest, SuggestionType};
///
/// # async fn example() -> Result<(), dadata::Error> {
/// let client = SuggestClient::builder().token("api-token").build_suggest()?;
///
/// let banks = client
///     .suggest(SuggestionType::Bank, &SuggestRequest::new("сбер").count(3))
///     .await?;
/// println!("{}", banks);
///
/// let party = client.party_by_id("7707083893", Default::default()).await?;
/// println!("{}", party["value"]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SuggestClient {
    inner: Arc<ClientInner>,
}

impl SuggestClient {
    /// Creates a new [`ClientBuilder`].
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Builds a client from a [`Config`] with the default transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration lacks a token.
    pub fn new(config: Config) -> Result<Self> {
        ClientBuilder::from_config(config).build_suggest()
    }

    pub(crate) fn from_inner(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Suggestions of `kind` for the given fields.
    ///
    /// `fields` must serialize to an object with a non-empty `query`.
    pub async fn suggest<F>(&self, kind: SuggestionType, fields: &F) -> Result<Value>
    where
        F: Serialize + ?Sized,
    {
        let operation = &catalog::SUGGEST;
        let url = operation.url(&self.inner.endpoints.suggest, kind.as_str());
        self.post(operation, url, fields).await
    }

    /// Suggestions of `kind` from a caller-supplied base URL, requested as
    /// `<url>/<kind>`.
    pub async fn suggest_by_url<F>(&self, url: &str, kind: SuggestionType, fields: &F) -> Result<Value>
    where
        F: Serialize + ?Sized,
    {
        let url = format!("{}/{}", url.trim_end_matches('/'), kind);
        self.post(&catalog::SUGGEST_BY_URL, url, fields).await
    }

    /// Organization by INN, OGRN or HID. `params` may carry extra filters
    /// (`branch_type`, `type`, `kpp`, ...); `query` is set from `id`.
    pub async fn party_by_id(&self, id: &str, mut params: Map<String, Value>) -> Result<Value> {
        params.insert("query".to_string(), Value::from(id));
        let operation = &catalog::FIND_PARTY_BY_ID;
        let url = operation.url(&self.inner.endpoints.suggest, "");
        self.post(operation, url, &params).await
    }

    /// Delivery service city ids for a KLADR code.
    ///
    /// When several suggestions come back the first one is used.
    pub async fn delivery_by_id(&self, kladr_id: &str) -> Result<Cdek> {
        let operation = &catalog::FIND_DELIVERY_BY_ID;
        let url = operation.url(&self.inner.endpoints.suggest, "");
        let value = self
            .post(operation, url, &SuggestRequest::new(kladr_id))
            .await?;

        let suggestion = match value {
            Value::Array(mut items) if !items.is_empty() => items.swap_remove(0),
            other => other,
        };
        match suggestion.get("data") {
            Some(data) if !data.is_null() => populate(data),
            _ => Err(Error::MissingKey("data")),
        }
    }

    async fn post<F>(&self, operation: &catalog::Operation, url: String, fields: &F) -> Result<Value>
    where
        F: Serialize + ?Sized,
    {
        let body =
            serde_json::to_value(fields).map_err(|e| Error::SerializationFailed(e.to_string()))?;
        if !has_query(&body) {
            return Err(Error::EmptyQuery);
        }
        self.inner.dispatcher.call(operation, url, Some(&body)).await
    }
}

/// `true` when `body` is an object whose `query` is present and non-empty.
fn has_query(body: &Value) -> bool {
    match body.get("query") {
        None => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty() && s != "0",
        Some(Value::Number(n)) => n.as_f64().map_or(false, |f| f != 0.0),
        Some(other) => !envelope::is_empty(other),
    }
}
