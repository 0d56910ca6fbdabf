//! # Retail Analytics
//!
//! `retail_analytics` runs a single dead stock analysis: it generates a
//! synthetic daily sales history, projects demand over a short horizon and
//! scores the capital locked in stock that the projection does not cover.
//!
//! ## Example
//!
//! ```no_run
//! use retail_analytics::{AppConfig, RetailPipeline};
//!
//! # fn main() -> retail_analytics::Result<()> {
//! let mut config = AppConfig::default();
//! config.generator.seed = Some(42);
//!
//! let outcome = RetailPipeline::new(config)?.run()?;
//! println!("{}", outcome.report);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod telemetry;

pub use crate::config::{AppConfig, ForecastConfig, InventoryConfig, LoggingConfig, ModelKind};
pub use crate::error::{AnalyticsError, Result};
pub use crate::pipeline::{score_inventory, PipelineOutcome, RetailPipeline};
pub use crate::report::AnalyticsReport;
