//! The SerpPro client and its request pipeline.
//!
//! validate → dispatch → classify → map. Each stage lives in its own module
//! under `src/client/`.

pub mod builder;
pub mod config;
pub mod core;
mod endpoint;
mod error_classification;
mod execution;
pub mod mapping;
pub mod validation;

pub use builder::SerpProClientBuilder;
pub use config::{ApiKey, ClientConfig};
pub use core::SerpProClient;
pub use endpoint::{resolve_endpoint, Endpoint};
