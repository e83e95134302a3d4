pub mod forecast_model;
