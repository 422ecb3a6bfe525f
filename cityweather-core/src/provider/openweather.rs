use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::{
    Config, ErrorKind,
    api_key::ApiKey,
    model::{CurrentWeather, WeatherQuery, WeatherResult, kelvin_to_celsius},
};

use super::WeatherProvider;

pub const OPENWEATHER_CURRENT_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: ApiKey,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: OPENWEATHER_CURRENT_URL.to_string(),
            http: Client::new(),
        }
    }

    /// Build a client honouring the endpoint and timeout overrides in `config`.
    pub fn from_config(api_key: ApiKey, config: &Config) -> Result<Self> {
        let client = Self::with_timeout(api_key, config.timeout())?;

        Ok(match &config.base_url {
            Some(url) => client.with_base_url(url.clone()),
            None => client,
        })
    }

    pub fn with_timeout(api_key: ApiKey, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { http, ..Self::new(api_key) })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub async fn fetch(&self, query: &WeatherQuery) -> WeatherResult {
        debug!("Requesting current weather for '{}'", query.city());

        let res = self
            .http
            .get(&self.base_url)
            .query(&[("q", query.city()), ("appid", self.api_key.expose())])
            .send()
            .await
            .map_err(ErrorKind::from_transport)?;

        let status = res.status();
        if !status.is_success() {
            info!("OpenWeather answered {status} for '{}'", query.city());
            return Err(ErrorKind::from_status(status.as_u16()));
        }

        let body = res.text().await.map_err(ErrorKind::from_transport)?;
        let weather = parse_current(&body)?;

        debug!(
            "'{}': code {} at {:.2}°C",
            query.city(),
            weather.condition_code,
            weather.temperature_celsius
        );

        Ok(weather)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn get_weather(&self, query: &WeatherQuery) -> WeatherResult {
        self.fetch(query).await
    }
}

/// `cod` arrives as a number on success but as a string in some error bodies.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OwCode {
    Number(i64),
    Text(String),
}

impl OwCode {
    fn is_ok(&self) -> bool {
        match self {
            OwCode::Number(n) => *n == 200,
            OwCode::Text(s) => s.trim() == "200",
        }
    }
}

impl std::fmt::Display for OwCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OwCode::Number(n) => write!(f, "{n}"),
            OwCode::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: i64,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    cod: OwCode,
    main: OwMain,
    weather: Vec<OwWeather>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    dt: Option<i64>,
}

fn parse_current(body: &str) -> WeatherResult {
    let parsed: OwCurrentResponse = serde_json::from_str(body).map_err(|e| {
        ErrorKind::OtherRequestError(format!("Unreadable weather response: {e}"))
    })?;

    if !parsed.cod.is_ok() {
        return Err(ErrorKind::OtherRequestError(format!(
            "Unexpected response code {}",
            parsed.cod
        )));
    }

    let condition = parsed.weather.into_iter().next().ok_or_else(|| {
        ErrorKind::OtherRequestError("Weather response had no conditions".to_string())
    })?;

    Ok(CurrentWeather {
        temperature_celsius: kelvin_to_celsius(parsed.main.temp),
        condition_code: condition.id,
        description: condition.description,
        location_name: parsed.name.filter(|n| !n.is_empty()),
        observed_at: parsed.dt.and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const KEY: &str = "TEST_KEY_5290c6a4";

    fn body(code: i64, kelvin: f64) -> serde_json::Value {
        json!({
            "cod": 200,
            "name": "Bartin",
            "dt": 1_700_000_000,
            "main": { "temp": kelvin, "humidity": 80 },
            "weather": [{ "id": code, "main": "Clear", "description": "clear sky" }]
        })
    }

    fn client_for(server: &MockServer) -> OpenWeatherClient {
        OpenWeatherClient::new(ApiKey::new(KEY)).with_base_url(format!("{}/weather", server.uri()))
    }

    fn bartin() -> WeatherQuery {
        WeatherQuery::new("Bartin").expect("valid city")
    }

    #[tokio::test]
    async fn success_converts_kelvin_and_picks_emoji() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "Bartin"))
            .and(query_param("appid", KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(body(800, 300.0)))
            .expect(1)
            .mount(&server)
            .await;

        let weather = client_for(&server).fetch(&bartin()).await.expect("success");

        assert!((weather.temperature_celsius - 26.85).abs() < 1e-9);
        assert_eq!(weather.condition_code, 800);
        assert_eq!(weather.emoji(), "☀");
        assert_eq!(weather.description, "clear sky");
        assert_eq!(weather.location_name.as_deref(), Some("Bartin"));
        assert_eq!(weather.observed_at.map(|t| t.timestamp()), Some(1_700_000_000));
    }

    #[tokio::test]
    async fn city_with_spaces_is_encoded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("q", "New York"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body(801, 290.0)))
            .mount(&server)
            .await;

        let query = WeatherQuery::new("New York").expect("valid city");
        let weather = client_for(&server).fetch(&query).await.expect("success");
        assert_eq!(weather.emoji(), "☁");
    }

    #[tokio::test]
    async fn not_found_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({ "cod": "404", "message": "city not found" })),
            )
            .mount(&server)
            .await;

        let result = client_for(&server).fetch(&bartin()).await;
        assert_eq!(result, Err(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn every_listed_status_is_classified() {
        for (status, expected) in [
            (400, ErrorKind::BadRequest),
            (401, ErrorKind::Unauthorized),
            (429, ErrorKind::TooManyRequests),
            (503, ErrorKind::ServiceUnavailable),
        ] {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(status))
                .mount(&server)
                .await;

            let result = client_for(&server).fetch(&bartin()).await;
            assert_eq!(result, Err(expected), "status {status}");
        }
    }

    #[tokio::test]
    async fn unlisted_status_is_a_request_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(418))
            .mount(&server)
            .await;

        match client_for(&server).fetch(&bartin()).await {
            Err(ErrorKind::OtherRequestError(detail)) => assert!(detail.contains("418")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn connection_refused() {
        // Bind then drop a listener so the port is known to be closed.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
            listener.local_addr().expect("addr").port()
        };
        let client = OpenWeatherClient::new(ApiKey::new(KEY))
            .with_base_url(format!("http://127.0.0.1:{port}/weather"));

        let result = client.fetch(&bartin()).await;
        assert_eq!(result, Err(ErrorKind::ConnectionError));
    }

    #[tokio::test]
    async fn slow_server_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(body(800, 300.0))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = OpenWeatherClient::with_timeout(
            ApiKey::new(KEY),
            Some(Duration::from_millis(200)),
        )
        .expect("client")
        .with_base_url(format!("{}/weather", server.uri()));

        let result = client.fetch(&bartin()).await;
        assert_eq!(result, Err(ErrorKind::Timeout));
    }

    #[tokio::test]
    async fn redirect_loop() {
        let server = MockServer::start().await;
        let target = format!("{}/weather", server.uri());
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(302).insert_header("Location", target.as_str()))
            .mount(&server)
            .await;

        let result = client_for(&server).fetch(&bartin()).await;
        assert_eq!(result, Err(ErrorKind::TooManyRedirects));
    }

    #[tokio::test]
    async fn malformed_body_is_a_request_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        match client_for(&server).fetch(&bartin()).await {
            Err(ErrorKind::OtherRequestError(detail)) => assert!(detail.contains("Unreadable")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn transport_error_detail_omits_the_key() {
        // An unsupported scheme fails inside the client with the full URL attached.
        let client =
            OpenWeatherClient::new(ApiKey::new(KEY)).with_base_url("ftp://127.0.0.1/weather");

        match client.fetch(&bartin()).await {
            Err(ErrorKind::OtherRequestError(detail)) => {
                assert!(!detail.is_empty());
                assert!(!detail.contains(KEY));
                assert!(!detail.contains("appid"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn cod_must_be_200() {
        let raw = json!({
            "cod": 301,
            "main": { "temp": 280.0 },
            "weather": [{ "id": 500, "description": "light rain" }]
        })
        .to_string();

        match parse_current(&raw) {
            Err(ErrorKind::OtherRequestError(detail)) => assert!(detail.contains("301")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn cod_as_string_is_accepted() {
        let raw = json!({
            "cod": "200",
            "main": { "temp": 273.15 },
            "weather": [{ "id": 601, "description": "snow" }]
        })
        .to_string();

        let weather = parse_current(&raw).expect("success");
        assert!(weather.temperature_celsius.abs() < 1e-9);
        assert_eq!(weather.emoji(), "❄");
        assert_eq!(weather.location_name, None);
        assert_eq!(weather.observed_at, None);
    }

    #[test]
    fn empty_weather_list() {
        let raw = json!({ "cod": 200, "main": { "temp": 280.0 }, "weather": [] }).to_string();
        assert!(matches!(parse_current(&raw), Err(ErrorKind::OtherRequestError(_))));
    }

    #[test]
    fn from_config_applies_overrides() {
        let cfg = Config {
            api_key: None,
            base_url: Some("http://localhost:1234/w".into()),
            timeout_secs: Some(3),
        };
        let client = OpenWeatherClient::from_config(ApiKey::new(KEY), &cfg).expect("client");

        assert_eq!(client.base_url, "http://localhost:1234/w");
        assert!(!format!("{client:?}").contains(KEY));
    }
}
