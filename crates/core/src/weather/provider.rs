use crate::config::Settings;
use crate::weather::error::{LookupErrorKind, WeatherLookupError};
use crate::weather::types::{CurrentWeatherResponse, WeatherSnapshot};
use anyhow::{Context, Result};
use reqwest::StatusCode;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[async_trait::async_trait]
pub trait WeatherProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;

    /// One current-conditions reading for a named location. Any failure
    /// aborts the evaluation: there is no retry and no fallback reading.
    /// The error downcasts to [`WeatherLookupError`].
    async fn fetch_current(&self, city: &str) -> Result<WeatherSnapshot>;
}

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.require_openweather_api_key()?.to_string();
        let base_url = settings
            .openweather_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = std::env::var("OPENWEATHER_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build weather http client")?;

        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    fn url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            CURRENT_WEATHER_PATH
        )
    }
}

#[async_trait::async_trait]
impl WeatherProvider for OpenWeatherClient {
    fn provider_name(&self) -> &'static str {
        "openweathermap"
    }

    async fn fetch_current(&self, city: &str) -> Result<WeatherSnapshot> {
        let res = self
            .http
            .get(self.url())
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|err| {
                WeatherLookupError::new(city, LookupErrorKind::Upstream, None, err.to_string())
            })?;

        let status = res.status();
        let text = res.text().await.map_err(|err| {
            WeatherLookupError::new(
                city,
                LookupErrorKind::Upstream,
                Some(status),
                err.to_string(),
            )
        })?;

        if status == StatusCode::NOT_FOUND {
            return Err(WeatherLookupError::new(
                city,
                LookupErrorKind::NotFound,
                Some(status),
                text,
            )
            .into());
        }
        if !status.is_success() {
            return Err(WeatherLookupError::new(
                city,
                LookupErrorKind::Upstream,
                Some(status),
                format!("HTTP {status}: {text}"),
            )
            .into());
        }

        let parsed = serde_json::from_str::<CurrentWeatherResponse>(&text).map_err(|err| {
            WeatherLookupError::new(
                city,
                LookupErrorKind::Upstream,
                Some(status),
                format!("payload did not match the expected shape: {err}"),
            )
        })?;

        let snapshot = parsed.into_snapshot().map_err(|err| {
            WeatherLookupError::new(
                city,
                LookupErrorKind::Upstream,
                Some(status),
                format!("{err:#}"),
            )
        })?;

        tracing::debug!(%city, condition = %snapshot.condition, "weather reading fetched");
        Ok(snapshot)
    }
}
