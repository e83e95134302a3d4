//! Terminal-facing layer of tenki: the forecast request controller, the
//! background fetch service that feeds it, and plain-text rendering.

pub mod error_mapping;
pub mod input;
pub mod models;
pub mod render;
pub mod services;

pub use input::Command;
pub use models::forecast_model::{ForecastModel, RequestTicket, Selection, ViewState};
pub use services::forecast_service::{request_fetch, ForecastServiceMessage};
