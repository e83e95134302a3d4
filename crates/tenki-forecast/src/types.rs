use serde::{Deserialize, Serialize};

/// A temperature reading in degrees Celsius, or the service's "no data" marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Temperature {
    Measured(f64),
    Unavailable,
}

impl Temperature {
    /// The reading in Celsius, if one was reported.
    pub fn celsius(&self) -> Option<f64> {
        match self {
            Self::Measured(c) => Some(*c),
            Self::Unavailable => None,
        }
    }
}

/// Coarse weather category derived from the icon the service links to.
///
/// Icon files are named after JMA weather codes (`100.svg`, `313.png`, ...);
/// the hundreds digit gives the dominant condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeatherIcon {
    Sunny,
    Cloudy,
    Rain,
    Snow,
    #[default]
    Unknown,
}

impl WeatherIcon {
    /// Classify an icon URL by the numeric code in its file name.
    pub fn from_url(url: &str) -> Self {
        let file = url
            .split(['?', '#'])
            .next()
            .unwrap_or(url)
            .rsplit('/')
            .next()
            .unwrap_or_default();
        let stem = file.split('.').next().unwrap_or_default();

        match stem.parse::<u16>().map(|code| code / 100) {
            Ok(1) => Self::Sunny,
            Ok(2) => Self::Cloudy,
            Ok(3) => Self::Rain,
            Ok(4) => Self::Snow,
            _ => Self::Unknown,
        }
    }

    /// Single-glyph stand-in for the icon image in a terminal.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Sunny => "☀",
            Self::Cloudy => "☁",
            Self::Rain => "☂",
            Self::Snow => "❄",
            Self::Unknown => "?",
        }
    }
}

/// One day of a normalized forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayForecast {
    pub date: String,
    pub icon_url: String,
    pub condition: String,
    pub high: Temperature,
    pub low: Temperature,
    pub precipitation_percent: f64,
}

impl DayForecast {
    pub fn icon(&self) -> WeatherIcon {
        WeatherIcon::from_url(&self.icon_url)
    }
}

/// Today's and tomorrow's forecast for one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPair {
    pub today: DayForecast,
    pub tomorrow: DayForecast,
}

/// Which half of the pair a day belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Day {
    Today,
    Tomorrow,
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Day::Today => f.write_str("today"),
            Day::Tomorrow => f.write_str("tomorrow"),
        }
    }
}

/// Forecast provider errors
#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Forecast API returned status {0}")]
    Status(u16),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),
}
