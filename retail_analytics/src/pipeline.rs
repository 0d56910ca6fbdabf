//! The three-stage analytics run: generate, forecast, score

use crate::config::{AppConfig, InventoryConfig, ModelKind};
use crate::error::Result;
use crate::report::AnalyticsReport;
use demand_forecast::models::additive::AdditiveModel;
use demand_forecast::models::moving_average::MovingAverage;
use demand_forecast::utils::forecast_accuracy;
use demand_forecast::{ForecastModel, ForecastResult, SalesGenerator, SalesSeries, TrainedForecastModel};
use inventory_math::{Recommendation, RiskInput};
use rand::Rng;
use tracing::{debug, info};

/// Everything produced by one run
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub sales: SalesSeries,
    pub forecast: ForecastResult,
    pub report: AnalyticsReport,
}

/// Score an inventory position against predicted demand
pub fn score_inventory(
    inventory: &InventoryConfig,
    predicted_demand: f64,
) -> Result<(f64, Recommendation)> {
    let input = RiskInput::new(inventory.stock_level, inventory.unit_price, predicted_demand)?;
    let score = input.score()?;
    let recommendation = inventory.risk_policy()?.assess(score);

    debug!(
        excess_stock = input.excess_stock(),
        score,
        ?recommendation,
        "Scored inventory position"
    );
    Ok((score, recommendation))
}

/// Runs data generation, forecasting and risk scoring in sequence
#[derive(Debug, Clone)]
pub struct RetailPipeline {
    config: AppConfig,
}

impl RetailPipeline {
    /// Create a pipeline, validating the configuration
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run with the configured model and seed
    pub fn run(&self) -> Result<PipelineOutcome> {
        let mut rng = self.config.generator.rng();

        match self.config.forecast.model {
            ModelKind::Additive => {
                let model = AdditiveModel::new(self.config.forecast.additive.clone())?;
                self.run_with(&model, &mut rng)
            }
            ModelKind::MovingAverage => {
                let model = MovingAverage::new(self.config.forecast.moving_average_window)?;
                self.run_with(&model, &mut rng)
            }
        }
    }

    /// Run with an explicit model and random source
    pub fn run_with<M, R>(&self, model: &M, rng: &mut R) -> Result<PipelineOutcome>
    where
        M: ForecastModel,
        R: Rng + ?Sized,
    {
        let generator = SalesGenerator::new(self.config.generator.clone())?;
        let sales = generator.generate(rng)?;
        let history = sales.to_time_series();
        debug!(
            mean_units = history.mean()?,
            std_dev_units = history.std_dev()?,
            "History statistics"
        );

        info!(model = model.name(), "Initializing model for demand forecasting");
        let trained = model.train(&history)?;

        let horizon = self.config.forecast.horizon_days;
        let forecast = trained.forecast(horizon)?;
        info!(horizon, "Forecasting complete");

        let fitted: Vec<f64> = forecast.history().iter().map(|p| p.yhat).collect();
        let accuracy = forecast_accuracy(&fitted, history.values())?;
        debug!(mae = accuracy.mae, rmse = accuracy.rmse, "In-sample fit");

        let projected_demand = forecast.future_demand();
        let (risk_score, recommendation) =
            score_inventory(&self.config.inventory, projected_demand)?;

        info!(
            projected_demand,
            risk_score,
            action_required = recommendation.requires_action(),
            "Risk scoring complete"
        );

        let inventory = &self.config.inventory;
        let report = AnalyticsReport {
            model: trained.name().to_string(),
            history_days: sales.len(),
            horizon_days: horizon,
            projected_demand,
            current_stock: inventory.stock_level,
            unit_price: inventory.unit_price,
            risk_score,
            liquidation_threshold: inventory.liquidation_threshold,
            recommendation,
        };

        Ok(PipelineOutcome {
            sales,
            forecast,
            report,
        })
    }
}
