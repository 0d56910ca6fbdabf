//! # Demand Forecast
//!
//! Daily retail demand series and the models that project them forward.
//!
//! ## Features
//!
//! - Daily sales series with strict date ordering and polars `DataFrame` views
//! - Synthetic sales generation (base level + yearly sine + Gaussian noise)
//!   with an injectable random source
//! - Forecasting models behind [`ForecastModel`] / [`TrainedForecastModel`]:
//!   an additive trend + Fourier seasonality model and a moving average
//! - Forecast accuracy metrics
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use demand_forecast::generator::{GeneratorConfig, SalesGenerator};
//! use demand_forecast::models::additive::{AdditiveConfig, AdditiveModel};
//! use demand_forecast::{ForecastModel, TrainedForecastModel};
//! use rand::SeedableRng;
//!
//! # fn main() -> demand_forecast::error::Result<()> {
//! // Three years of daily sales
//! let generator = SalesGenerator::new(GeneratorConfig::default())?;
//! let sales = generator.generate(&mut rand::rngs::StdRng::seed_from_u64(7))?;
//!
//! // Fit and project 30 days past the last observation
//! let model = AdditiveModel::new(AdditiveConfig::default())?;
//! let trained = model.train(&sales.to_time_series())?;
//! let forecast = trained.forecast(30)?;
//!
//! println!("Next 30 days: {:.0} units", forecast.future_demand());
//! # Ok(())
//! # }
//! ```

pub mod data;
pub mod error;
pub mod generator;
pub mod models;
pub mod utils;

// Re-export commonly used types
pub use crate::data::{Observation, SalesSeries, TimeSeriesData};
pub use crate::error::ForecastError;
pub use crate::generator::{GeneratorConfig, SalesGenerator};
pub use crate::models::{ForecastModel, ForecastPoint, ForecastResult, TrainedForecastModel};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
