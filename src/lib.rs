//! # serppro-client
//!
//! Typed async client for the SerpPro API: Yandex Wordstat statistics, region
//! lookup for Yandex and Google, and account usage figures.
//!
//! Every call follows the same path: the request is validated locally, sent
//! once over HTTPS with the `X-Api-Key` header, the response is classified by
//! status and the payload is mapped into a typed result that echoes the request.
//! Nothing is retried or cached.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use serppro_client::{FrequencyRequest, SerpProClient};
//!
//! #[tokio::main]
//! async fn main() -> serppro_client::Result<()> {
//!     let client = SerpProClient::new("your-api-key")?;
//!
//!     let result = client
//!         .wordstat_frequency(FrequencyRequest::new("Король и Шут").region("225"))
//!         .await?;
//!     println!("{}: {}", result.request.query, result.frequency);
//!     Ok(())
//! }
//! ```
//!
//! ## Failures
//!
//! [`Error`] separates what went wrong: [`Error::Validation`] (nothing was
//! sent), [`Error::Transport`] (no response), [`Error::Api`] (the service said
//! no) and [`Error::Mapping`] (the service answered something unexpected).
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client, builder, configuration and the request pipeline |
//! | [`types`] | Option sets, requests and results |
//! | [`transport`] | The [`Transport`](transport::Transport) seam and its reqwest implementation |
//! | [`error`] | Error taxonomy |
//! | [`error_code`] | Classes of API errors by HTTP status |

pub mod client;
pub mod error;
pub mod error_code;
pub mod transport;
pub mod types;

pub use client::{ApiKey, ClientConfig, SerpProClient, SerpProClientBuilder};
pub use error::{ApiError, Error, ErrorContext, ErrorKind};
pub use error_code::ApiErrorClass;
pub use types::*;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;
