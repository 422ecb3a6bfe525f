use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{condition::emoji_for, error::ErrorKind, error::InvalidQuery};

/// Offset between the Kelvin and Celsius scales.
pub const KELVIN_OFFSET: f64 = 273.15;

pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}

/// Round to whole degrees, folding `-0` into `0`.
fn whole_degrees(celsius: f64) -> f64 {
    let rounded = celsius.round();
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// A city to look up. Always non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    city: String,
}

impl WeatherQuery {
    pub fn new(city: &str) -> Result<Self, InvalidQuery> {
        let city = city.trim();
        if city.is_empty() {
            return Err(InvalidQuery::EmptyCity);
        }

        Ok(Self { city: city.to_string() })
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

impl TryFrom<&str> for WeatherQuery {
    type Error = InvalidQuery;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Current conditions for a successfully fetched city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature_celsius: f64,
    pub condition_code: i64,
    pub description: String,
    pub location_name: Option<String>,
    pub observed_at: Option<DateTime<Utc>>,
}

impl CurrentWeather {
    pub fn emoji(&self) -> &'static str {
        emoji_for(self.condition_code)
    }
}

/// Outcome of a single lookup.
pub type WeatherResult = Result<CurrentWeather, ErrorKind>;

/// What a front end puts on screen for one lookup.
///
/// On failure the error message takes the temperature slot, the other
/// two fields are blank and `ok` is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Presentation {
    pub ok: bool,
    pub temperature: String,
    pub emoji: String,
    pub description: String,
}

impl Presentation {
    pub fn from_result(result: &WeatherResult) -> Self {
        match result {
            Ok(weather) => Self {
                ok: true,
                temperature: format!("{:.0}°C", whole_degrees(weather.temperature_celsius)),
                emoji: weather.emoji().to_string(),
                description: weather.description.clone(),
            },
            Err(reason) => Self {
                ok: false,
                temperature: reason.to_string(),
                emoji: String::new(),
                description: String::new(),
            },
        }
    }
}

impl From<&WeatherResult> for Presentation {
    fn from(result: &WeatherResult) -> Self {
        Self::from_result(result)
    }
}
