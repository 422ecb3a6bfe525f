//! Core library for the `cityweather` CLI.
//!
//! This crate defines:
//! - Configuration & credential handling
//! - The OpenWeather client and the classification of its failures
//! - Presentation of a lookup (temperature, condition emoji, description)
//!
//! Nothing here touches a terminal, so any front end can reuse it.

pub mod api_key;
pub mod condition;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;

pub use api_key::ApiKey;
pub use condition::{ConditionGroup, emoji_for};
pub use config::Config;
pub use error::{ErrorKind, InvalidQuery};
pub use model::{CurrentWeather, Presentation, WeatherQuery, WeatherResult, kelvin_to_celsius};
pub use provider::{WeatherProvider, openweather::OpenWeatherClient, provider_from_config};
