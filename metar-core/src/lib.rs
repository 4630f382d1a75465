//! Core library for the `metar` CLI.
//!
//! This crate defines:
//! - The decoded METAR observation and its code tables
//! - A pluggable HTTP transport and the fetcher built on it
//! - Unit conversions for presenting observations
//! - Configuration handling
//!
//! It is used by `metar-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod convert;
pub mod error;
pub mod fetch;
pub mod http;
pub mod model;

pub use config::Config;
pub use error::{MetarError, Result, TransportError};
pub use fetch::{DEFAULT_ENDPOINT, MetarFetcher, decode_response, fetch_current_station_weather};
pub use http::{HttpClient, HttpRequest, HttpResponse, ReqwestClient};
pub use model::{FlightCategory, MetarType, Observation, QualityControlFlags, SkyCondition, SkyCover};
