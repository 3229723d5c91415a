//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration handling
//! - The wttr.in data source with strict response validation
//! - A TTL-based on-disk cache with atomic persistence
//! - The orchestrator that decides between cache and network
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod cache;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod service;
pub mod snapshot;

pub use cache::{CacheStore, LocationKey};
pub use config::Config;
pub use error::WeatherError;
pub use model::{WeatherRecord, WeatherReport, WeatherSnapshot};
pub use provider::WeatherProvider;
pub use service::WeatherService;
