//! Forecast data for tenki
//!
//! Holds the fixed region table, the normalized two-day forecast types, and
//! the HTTP provider that talks to the `areainfo` backend.

pub mod provider;
pub mod regions;
pub mod types;
pub mod wire;

pub use provider::{ForecastProvider, ForecastSource};
pub use regions::{Region, REGIONS};
pub use types::*;
