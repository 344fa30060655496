//! The cleaning API: standardization, balance, usage statistics and IP
//! geolocation.

use crate::catalog::{self, CleanTarget, Operation};
use crate::client::{ClientBuilder, ClientInner};
use crate::config::Config;
use crate::populate::{coerce_float, populate};
use crate::response::{
    Address, Birthdate, Cleanable, Email, Name, Passport, Phone, Statistics, Vehicle,
};
use crate::{Error, Result};
use chrono::NaiveDate;
use serde_json::Value;
use std::net::IpAddr;
use std::sync::Arc;

/// A client for the cleaning API.
///
/// Cheap to clone; clones share the transport. Every call is one independent
/// request with no retries and no cached state.
///
/// # Examples
///
/// ```no_run
/// use dadata::CleanClient;
///
/// # async fn example() -> Result<(), dadata::Error> {
/// let client = CleanClient::builder()
///     .token("api-token")
///     .secret("secret-key")
///     .build_clean()?;
///
/// let address = client.clean_address("мск сухонская 11 89").await?;
/// println!("{:?} ({:?})", address.result, address.quality());
///
/// let balance = client.balance().await?;
/// println!("Balance: {}", balance);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CleanClient {
    inner: Arc<ClientInner>,
}

impl CleanClient {
    /// Creates a new [`ClientBuilder`].
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Builds a client from a [`Config`] with the default transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration lacks a token or secret.
    pub fn new(config: Config) -> Result<Self> {
        ClientBuilder::from_config(config).build_clean()
    }

    pub(crate) fn from_inner(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Standardizes a postal address.
    pub async fn clean_address(&self, address: &str) -> Result<Address> {
        self.clean_one(address).await
    }

    /// Standardizes a phone number.
    pub async fn clean_phone(&self, phone: &str) -> Result<Phone> {
        self.clean_one(phone).await
    }

    /// Validates a passport series and number.
    pub async fn clean_passport(&self, passport: &str) -> Result<Passport> {
        self.clean_one(passport).await
    }

    /// Splits and declines a full name.
    pub async fn clean_name(&self, name: &str) -> Result<Name> {
        self.clean_one(name).await
    }

    /// Validates an email address.
    pub async fn clean_email(&self, email: &str) -> Result<Email> {
        self.clean_one(email).await
    }

    /// Parses a date of birth.
    pub async fn clean_birthdate(&self, date: &str) -> Result<Birthdate> {
        self.clean_one(date).await
    }

    /// Standardizes a vehicle make and model.
    pub async fn clean_vehicle(&self, vehicle: &str) -> Result<Vehicle> {
        self.clean_one(vehicle).await
    }

    /// Standardizes several values of the same kind in one request.
    ///
    /// Returns one record per value, in order.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dadata::{CleanClient, response::Phone};
    ///
    /// # async fn example(client: CleanClient) -> Result<(), dadata::Error> {
    /// let phones = client
    ///     .clean::<Phone>(&["+7 495 123-45-67", "8 (916) 000-00-00"])
    ///     .await?;
    /// assert_eq!(phones.len(), 2);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn clean<S: Cleanable>(&self, values: &[&str]) -> Result<Vec<S>> {
        let value = self.clean_raw(S::TARGET, values).await?;
        match value {
            Value::Array(items) => items.iter().map(populate::<S>).collect(),
            other => Ok(vec![populate::<S>(&other)?]),
        }
    }

    /// Sends `values` to the `target` endpoint and returns the unwrapped body.
    pub async fn clean_raw(&self, target: CleanTarget, values: &[&str]) -> Result<Value> {
        let operation = target.operation();
        let body = Value::from(values.to_vec());
        self.inner
            .dispatcher
            .call(operation, self.url(operation, ""), Some(&body))
            .await
    }

    async fn clean_one<S: Cleanable>(&self, value: &str) -> Result<S> {
        let decoded = self.clean_raw(S::TARGET, &[value]).await?;
        populate(&decoded)
    }

    /// Current account balance in rubles.
    pub async fn balance(&self) -> Result<f64> {
        let operation = &catalog::GET_BALANCE;
        let value = self
            .inner
            .dispatcher
            .call(operation, self.url(operation, ""), None)
            .await?;
        Ok(coerce_float(&value))
    }

    /// Usage for `date`, or for today when `None`.
    pub async fn daily_statistics(&self, date: Option<NaiveDate>) -> Result<Statistics> {
        let operation = &catalog::GET_DAILY_STATISTICS;
        let query = date
            .map(|d| format!("?date={}", d.format("%Y-%m-%d")))
            .unwrap_or_default();
        let value = self
            .inner
            .dispatcher
            .call(operation, self.url(operation, &query), None)
            .await?;
        populate(&value)
    }

    /// Finds the city of an IP address.
    ///
    /// Returns `Ok(None)` when the service answers with a `null` location or
    /// `null` location data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingKey`] if `location`, or `data` inside it, is
    /// absent from the response.
    pub async fn detect_address_by_ip(&self, ip: IpAddr) -> Result<Option<Address>> {
        let operation = &catalog::DETECT_ADDRESS_BY_IP;
        let url = operation.url(&self.inner.endpoints.geolocation, &format!("?ip={}", ip));
        let value = self.inner.dispatcher.call(operation, url, None).await?;

        let location = match value.get("location") {
            None => return Err(Error::MissingKey("location")),
            Some(Value::Null) => return Ok(None),
            Some(location) => location,
        };
        match location.get("data") {
            None => Err(Error::MissingKey("data")),
            Some(Value::Null) => Ok(None),
            Some(data) => populate(data).map(Some),
        }
    }

    fn url(&self, operation: &Operation, suffix: &str) -> String {
        operation.url(&self.inner.endpoints.clean, suffix)
    }
}
