//! Wire format of the `areainfo` endpoint and its normalization into
//! [`ForecastPair`].
//!
//! Numeric fields arrive either as JSON numbers or as numeric strings.
//! Missing temperatures are reported with a text marker instead of a number.

use serde::Deserialize;

use crate::types::{Day, DayForecast, ForecastError, ForecastPair, Temperature};

/// Markers the backend uses in place of a temperature.
const NO_DATA_MARKERS: [&str; 2] = ["N/A", "データなし"];

/// Top-level `areainfo` response.
#[derive(Debug, Clone, Deserialize)]
pub struct AreaInfoResponse {
    pub weatherinfotoday: RawDay,
    pub weatherinfotomorrow: RawDay,
}

/// One day as sent by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDay {
    pub date: String,
    pub image_url: String,
    #[serde(rename = "天気")]
    pub condition: String,
    #[serde(rename = "最高気温", default)]
    pub high: Option<RawValue>,
    #[serde(rename = "最低気温", default)]
    pub low: Option<RawValue>,
    #[serde(rename = "降水確率", default)]
    pub precipitation: Option<RawValue>,
}

/// A scalar that may be encoded as a number or a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl AreaInfoResponse {
    /// Parse a response body.
    pub fn from_json(body: &str) -> Result<Self, ForecastError> {
        serde_json::from_str(body).map_err(|e| ForecastError::Parse(e.to_string()))
    }

    pub fn normalize(self) -> ForecastPair {
        ForecastPair {
            today: self.weatherinfotoday.normalize(Day::Today),
            tomorrow: self.weatherinfotomorrow.normalize(Day::Tomorrow),
        }
    }
}

impl RawDay {
    /// Map one day onto [`DayForecast`]. Only a JSON parse failure rejects a
    /// body; unreadable scalars degrade instead of failing the forecast.
    pub fn normalize(self, day: Day) -> DayForecast {
        DayForecast {
            high: parse_temperature(self.high.as_ref(), day, "最高気温"),
            low: parse_temperature(self.low.as_ref(), day, "最低気温"),
            precipitation_percent: parse_precipitation(self.precipitation.as_ref(), day),
            date: self.date,
            icon_url: self.image_url,
            condition: self.condition,
        }
    }
}

/// Numbers and numeric strings are readings; markers, blanks and anything
/// else unreadable are [`Temperature::Unavailable`].
fn parse_temperature(value: Option<&RawValue>, day: Day, field: &'static str) -> Temperature {
    let text = match value {
        None => return Temperature::Unavailable,
        Some(RawValue::Number(n)) => {
            return finite(*n).map_or(Temperature::Unavailable, Temperature::Measured)
        }
        Some(RawValue::Text(text)) => text.trim(),
    };
    if text.is_empty() || NO_DATA_MARKERS.contains(&text) {
        return Temperature::Unavailable;
    }
    match parse_number(text) {
        Some(n) => Temperature::Measured(n),
        None => {
            tracing::debug!(%day, field, value = text, "Unreadable temperature, treating as no data");
            Temperature::Unavailable
        }
    }
}

/// Missing or unreadable values count as 0%, the same rule the backend uses
/// when averaging its time slots. Out-of-range numbers are kept as sent.
fn parse_precipitation(value: Option<&RawValue>, day: Day) -> f64 {
    let percent = match value {
        Some(RawValue::Number(n)) => finite(*n),
        Some(RawValue::Text(text)) => parse_number(text.trim().trim_end_matches('%').trim_end()),
        None => None,
    };
    percent.unwrap_or_else(|| {
        tracing::debug!(%day, value = ?value, "Unreadable 降水確率, treating as 0");
        0.0
    })
}

fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().and_then(finite)
}

fn finite(n: f64) -> Option<f64> {
    n.is_finite().then_some(n)
}
