//! # dadata - typed client for the DaData APIs
//!
//! Two clients cover the provider's two API families:
//!
//! - [`CleanClient`] standardizes single values (address, phone, passport,
//!   name, email, birth date, vehicle), reports the account balance and daily
//!   usage, and geolocates IP addresses.
//! - [`SuggestClient`] returns ranked suggestions for partial input and looks
//!   organizations and delivery points up by id.
//!
//! Each call is one stateless request: build the request, send it through a
//! [`Transport`](transport::Transport), decode the JSON body, strip the
//! response envelope and map the result onto a typed record.
//!
//! ## Quick Start
//!
//! ```no_run
//! use dadata::{CleanClient, SuggestClient, SuggestRequest, SuggestionType};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), dadata::Error> {
//!     let clean = CleanClient::builder()
//!         .token("api-token")
//!         .secret("secret-key")
//!         .timeout(Duration::from_secs(10))
//!         .build_clean()?;
//!
//!     let phone = clean.clean_phone("8 (495) 123-45-67").await?;
//!     println!("{:?} from {:?}", phone.phone, phone.provider);
//!
//!     let suggest = SuggestClient::builder().token("api-token").build_suggest()?;
//!     let found = suggest
//!         .suggest(SuggestionType::Address, &SuggestRequest::new("москва хабар"))
//!         .await?;
//!     println!("{}", found);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Response mapping
//!
//! Records are filled by [`populate`](populate::populate) from a static field
//! table. Integer and float fields are coerced from numbers or numeric strings
//! and default to zero, dates are parsed as `YYYY-MM-DD` in Moscow time and
//! become `None` when malformed, and unknown keys are ignored.
//!
//! ## Error Handling
//!
//! ```no_run
//! use dadata::{Error, SuggestClient, SuggestRequest, SuggestionType};
//!
//! # async fn example(client: SuggestClient) {
//! match client.suggest(SuggestionType::Party, &SuggestRequest::new("сбер")).await {
//!     Ok(found) => println!("{}", found),
//!     Err(Error::InvalidApiKey { .. }) => eprintln!("Check the token"),
//!     Err(Error::LimitExceeded { .. }) => eprintln!("Daily limit reached"),
//!     Err(Error::EmptyResult) => eprintln!("Nothing found"),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! # }
//! ```

mod clean;
mod client;
mod dispatch;
mod error;
mod suggest;

pub mod catalog;
pub mod config;
pub mod envelope;
pub mod populate;
pub mod response;
pub mod transport;

pub use catalog::{CleanTarget, SuggestionType};
pub use clean::CleanClient;
pub use client::ClientBuilder;
pub use config::Config;
pub use error::{Error, Result};
pub use suggest::{SuggestClient, SuggestRequest};
