//! Layered application configuration
//!
//! Sources are merged in this order, later ones winning:
//! 1. Built-in defaults (the reference run)
//! 2. An optional TOML file
//! 3. Environment variables (`RETAIL__<SECTION>__<KEY>`)
//! 4. Command line overrides, applied by the caller

use crate::error::{AnalyticsError, Result};
use clap::ValueEnum;
use config::{Config, Environment, File};
use demand_forecast::generator::GeneratorConfig;
use demand_forecast::models::additive::AdditiveConfig;
use inventory_math::{RiskPolicy, DEFAULT_LIQUIDATION_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Prefix of environment variables read into the configuration
pub const ENV_PREFIX: &str = "RETAIL";
const ENV_SEPARATOR: &str = "__";

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_HORIZON_DAYS: usize = 30;
const DEFAULT_MOVING_AVERAGE_WINDOW: usize = 28;
const DEFAULT_STOCK_LEVEL: u64 = 1200;
const DEFAULT_UNIT_PRICE: f64 = 45.0;

/// Forecasting model used by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ModelKind {
    /// Linear trend plus Fourier seasonality
    Additive,
    /// Trailing mean, flat into the future
    MovingAverage,
}

/// Forecasting configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForecastConfig {
    /// Days to project beyond the history
    pub horizon_days: usize,
    pub model: ModelKind,
    /// Window of the moving average model
    pub moving_average_window: usize,
    pub additive: AdditiveConfig,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
            model: ModelKind::Additive,
            moving_average_window: DEFAULT_MOVING_AVERAGE_WINDOW,
            additive: AdditiveConfig::default(),
        }
    }
}

/// Inventory position and the business threshold applied to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InventoryConfig {
    /// Units currently held
    pub stock_level: u64,
    /// Capital value of one unit
    pub unit_price: f64,
    /// Risk score above which liquidation is recommended
    pub liquidation_threshold: f64,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            stock_level: DEFAULT_STOCK_LEVEL,
            unit_price: DEFAULT_UNIT_PRICE,
            liquidation_threshold: DEFAULT_LIQUIDATION_THRESHOLD,
        }
    }
}

impl InventoryConfig {
    pub fn risk_policy(&self) -> Result<RiskPolicy> {
        Ok(RiskPolicy::new(self.liquidation_threshold)?)
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter level when `RUST_LOG` is unset
    pub level: String,
    /// Emit logs as JSON lines
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json: false,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub generator: GeneratorConfig,
    pub forecast: ForecastConfig,
    pub inventory: InventoryConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Check values that the individual components do not validate themselves
    pub fn validate(&self) -> Result<()> {
        if self.forecast.horizon_days == 0 {
            return Err(AnalyticsError::InvalidConfig(
                "forecast.horizon_days must be positive".to_string(),
            ));
        }

        if self.forecast.moving_average_window == 0 {
            return Err(AnalyticsError::InvalidConfig(
                "forecast.moving_average_window must be positive".to_string(),
            ));
        }

        if !self.inventory.unit_price.is_finite() || self.inventory.unit_price < 0.0 {
            return Err(AnalyticsError::InvalidConfig(format!(
                "inventory.unit_price must be a non-negative number, got {}",
                self.inventory.unit_price
            )));
        }

        self.inventory.risk_policy()?;
        Ok(())
    }
}

/// Load configuration from defaults, an optional file and the process environment
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    load_config_with_env(path, None)
}

/// Load configuration, reading environment variables from `env` instead of the
/// process environment when given
pub fn load_config_with_env(
    path: Option<&Path>,
    env: Option<HashMap<String, String>>,
) -> Result<AppConfig> {
    let mut builder = Config::builder().add_source(Config::try_from(&AppConfig::default())?);

    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .try_parsing(true)
            .source(env),
    );

    let config: AppConfig = builder.build()?.try_deserialize()?;
    Ok(config)
}
