//! Async services that run network work off the input loop and report back
//! over channels.

pub mod forecast_service;

pub use forecast_service::{request_fetch, ForecastServiceMessage};
