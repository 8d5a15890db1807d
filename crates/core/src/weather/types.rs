use anyhow::Context;
use serde::{Deserialize, Serialize};

/// The five weather fields the risk scorer consumes, already extracted from
/// the provider payload. Constructed once per evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub wind_speed_mps: f64,
    pub visibility_m: u32,
    pub condition: String,
}

/// Wire format of the OpenWeatherMap current-weather endpoint, reduced to
/// the fields we read.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeatherResponse {
    pub main: MainReading,
    pub wind: WindReading,
    /// Meters; the provider omits the field under some conditions.
    #[serde(default = "default_visibility_m")]
    pub visibility: u32,
    pub weather: Vec<ConditionEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainReading {
    pub temp: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WindReading {
    pub speed: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConditionEntry {
    pub main: String,
}

fn default_visibility_m() -> u32 {
    1000
}

impl CurrentWeatherResponse {
    pub fn into_snapshot(self) -> anyhow::Result<WeatherSnapshot> {
        let condition = self
            .weather
            .into_iter()
            .next()
            .map(|entry| entry.main)
            .context("provider payload has no weather condition entries")?;

        Ok(WeatherSnapshot {
            temperature_c: self.main.temp,
            humidity_pct: self.main.humidity,
            wind_speed_mps: self.wind.speed,
            visibility_m: self.visibility,
            condition,
        })
    }
}
