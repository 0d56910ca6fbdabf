//! Command line interface

use crate::config::{load_config, AppConfig, ModelKind};
use crate::error::Result;
use crate::telemetry::init_tracing;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracing::{debug, info};

/// Forecast retail demand and score dead stock risk
#[derive(Debug, Parser)]
#[command(name = "retail-analytics", version, about)]
pub struct Cli {
    #[arg(long, help = "TOML configuration file layered over the defaults")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Seed for the synthetic sales noise")]
    pub seed: Option<u64>,

    #[arg(long, help = "Days of sales history to generate")]
    pub days: Option<usize>,

    #[arg(long, help = "Days to forecast beyond the history")]
    pub horizon: Option<usize>,

    #[arg(long, help = "Units currently in stock")]
    pub stock_level: Option<u64>,

    #[arg(long, help = "Capital value of one unit")]
    pub unit_price: Option<f64>,

    #[arg(long, value_enum, help = "Forecasting model")]
    pub model: Option<ModelKind>,

    #[arg(long, help = "Default log filter when RUST_LOG is unset")]
    pub log_level: Option<String>,

    #[arg(long, action = ArgAction::SetTrue, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[arg(
        long,
        action = ArgAction::SetTrue,
        help = "Print the summary as pretty JSON"
    )]
    pub json: bool,

    #[arg(long, help = "Write the full forecast table to this CSV file")]
    pub export_forecast: Option<PathBuf>,
}

impl Cli {
    /// Load layered configuration, apply command line overrides and start logging
    pub fn bootstrap(&self) -> Result<AppConfig> {
        let mut config = load_config(self.config.as_deref())?;
        self.apply_to(&mut config);
        init_tracing(&config.logging.level, config.logging.json);

        match &self.config {
            Some(path) => info!(path = %path.display(), "Loaded configuration file"),
            None => debug!("Using built-in configuration defaults"),
        }
        Ok(config)
    }

    /// Apply command line values on top of loaded configuration
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(seed) = self.seed {
            config.generator.seed = Some(seed);
        }
        if let Some(days) = self.days {
            config.generator.days = days;
        }
        if let Some(horizon) = self.horizon {
            config.forecast.horizon_days = horizon;
        }
        if let Some(stock_level) = self.stock_level {
            config.inventory.stock_level = stock_level;
        }
        if let Some(unit_price) = self.unit_price {
            config.inventory.unit_price = unit_price;
        }
        if let Some(model) = self.model {
            config.forecast.model = model;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if self.log_json {
            config.logging.json = true;
        }
    }
}
