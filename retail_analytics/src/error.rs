//! Error types for the retail_analytics crate

use demand_forecast::ForecastError;
use inventory_math::MathError;
use thiserror::Error;

/// Errors raised while configuring or running the analytics pipeline
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Configuration sources could not be read or merged
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Configuration values are out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Data generation or forecasting failed
    #[error(transparent)]
    Forecast(#[from] ForecastError),

    /// Risk scoring failed
    #[error("Risk scoring error: {0}")]
    Risk(#[from] MathError),

    /// Report serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for analytics operations
pub type Result<T> = std::result::Result<T, AnalyticsError>;
