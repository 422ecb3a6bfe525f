use crate::{
    Config, Presentation, WeatherQuery, WeatherResult, provider::openweather::OpenWeatherClient,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_weather(&self, query: &WeatherQuery) -> WeatherResult;

    /// Fetch and turn the outcome into display fields in one step.
    async fn present(&self, query: &WeatherQuery) -> (WeatherResult, Presentation) {
        let result = self.get_weather(query).await;
        let presentation = Presentation::from_result(&result);
        (result, presentation)
    }
}

/// Construct the OpenWeather provider from config and the process environment.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key_from_env()?;
    let client = OpenWeatherClient::from_config(api_key, config)?;
    Ok(Box::new(client))
}
