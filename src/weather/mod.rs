// src/weather/mod.rs — Open-Meteo hourly forecast client

use serde::Deserialize;

use crate::infra::errors::TabijiError;

pub struct WeatherClient {
    client: reqwest::Client,
    base_url: String,
}

/// Hourly series for the current day: parallel arrays of timestamp,
/// temperature and WMO weather code.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HourlyForecast {
    pub time: Vec<String>,
    pub temperature_2m: Vec<f64>,
    pub weathercode: Vec<u16>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    hourly: HourlyForecast,
}

impl WeatherClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: "https://api.open-meteo.com/v1".into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// One day of hourly forecast for a coordinate pair. Callers with no
    /// coordinates skip the call entirely.
    pub async fn hourly_forecast(&self, lat: f64, lng: f64) -> Result<HourlyForecast, TabijiError> {
        let url = format!(
            "{}/forecast?latitude={}&longitude={}&hourly=temperature_2m,weathercode&timezone=auto&forecast_days=1",
            self.base_url, lat, lng,
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TabijiError::Weather {
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(TabijiError::Weather {
                message: format!("HTTP {}", response.status()),
            });
        }

        let parsed: ForecastResponse =
            response.json().await.map_err(|e| TabijiError::Weather {
                message: format!("Failed to parse forecast: {}", e),
            })?;

        Ok(parsed.hourly)
    }
}

impl Default for WeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Coarse condition bucket for a WMO weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherKind {
    Clear,
    Cloudy,
    Rain,
    Snow,
    Thunder,
}

impl WeatherKind {
    pub fn from_code(code: u16) -> Self {
        match code {
            0..=1 => Self::Clear,
            2..=3 => Self::Cloudy,
            4..=67 => Self::Rain,
            68..=77 => Self::Snow,
            _ => Self::Thunder,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Clear => "☀",
            Self::Cloudy => "☁",
            Self::Rain => "🌧",
            Self::Snow => "🌨",
            Self::Thunder => "⛈",
        }
    }
}
