//! Maps service errors to tenki_core::AppError for consistent user-facing messages.

mod forecast;

pub use forecast::into_app_error;
