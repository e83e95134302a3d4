use tenki_core::{AppError, ConfigError, ForecastServiceError, ReqwestErrorExt};
use tenki_forecast::ForecastError;

pub fn into_app_error(e: ForecastError) -> AppError {
    match e {
        ForecastError::Network(e) => AppError::Network(e.into_network_error()),
        ForecastError::Status(status) => {
            AppError::Forecast(ForecastServiceError::ApiError { status })
        }
        ForecastError::Parse(msg) => AppError::Forecast(ForecastServiceError::MalformedPayload(msg)),
        ForecastError::InvalidUrl(url) => AppError::Config(ConfigError::Invalid(url)),
    }
}
