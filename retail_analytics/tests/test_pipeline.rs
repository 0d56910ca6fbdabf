use chrono::NaiveDate;
use demand_forecast::error::Result as ForecastResultT;
use demand_forecast::{
    ForecastModel, ForecastPoint, SalesGenerator, TimeSeriesData, TrainedForecastModel,
};
use inventory_math::Recommendation;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use retail_analytics::{score_inventory, AppConfig, InventoryConfig, ModelKind, RetailPipeline};
use rstest::rstest;

/// Predicts the same number of units every day
#[derive(Debug, Clone)]
struct ConstantDemand(f64);

#[derive(Debug)]
struct TrainedConstantDemand {
    daily: f64,
    history: Vec<NaiveDate>,
}

impl ForecastModel for ConstantDemand {
    type Trained = TrainedConstantDemand;

    fn train(&self, data: &TimeSeriesData) -> ForecastResultT<Self::Trained> {
        Ok(TrainedConstantDemand {
            daily: self.0,
            history: data.dates().to_vec(),
        })
    }

    fn name(&self) -> &str {
        "constant"
    }
}

impl TrainedForecastModel for TrainedConstantDemand {
    fn predict(&self, dates: &[NaiveDate]) -> ForecastResultT<Vec<ForecastPoint>> {
        Ok(dates
            .iter()
            .map(|&date| ForecastPoint {
                date,
                yhat: self.daily,
                yhat_lower: self.daily,
                yhat_upper: self.daily,
                trend: self.daily,
            })
            .collect())
    }

    fn history_dates(&self) -> &[NaiveDate] {
        &self.history
    }

    fn name(&self) -> &str {
        "constant"
    }
}

fn small_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.generator.days = 90;
    config
}

#[rstest]
#[case(30.0, 900.0, 15.0, Recommendation::Healthy)]
#[case(0.0, 0.0, 54000.0, Recommendation::Liquidate)]
#[case(50.0, 1500.0, 0.0, Recommendation::Healthy)]
fn test_stubbed_forecast_drives_scoring(
    #[case] daily: f64,
    #[case] demand: f64,
    #[case] score: f64,
    #[case] recommendation: Recommendation,
) {
    let pipeline = RetailPipeline::new(small_config()).unwrap();
    let outcome = pipeline
        .run_with(&ConstantDemand(daily), &mut StdRng::seed_from_u64(1))
        .unwrap();

    assert_eq!(outcome.sales.len(), 90);
    assert_eq!(outcome.forecast.len(), 120);
    assert_eq!(outcome.report.projected_demand, demand);
    assert_eq!(outcome.report.risk_score, score);
    assert_eq!(outcome.report.recommendation, recommendation);
    assert_eq!(outcome.report.model, "constant");
    assert_eq!(outcome.report.history_days, 90);
}

#[test]
fn test_score_inventory_uses_configured_position() {
    let inventory = InventoryConfig {
        stock_level: 100,
        unit_price: 10.0,
        liquidation_threshold: 5.0,
    };

    assert_eq!(
        score_inventory(&inventory, 150.0).unwrap(),
        (0.0, Recommendation::Healthy)
    );
    assert_eq!(
        score_inventory(&inventory, 50.0).unwrap(),
        (10.0, Recommendation::Liquidate)
    );
    assert!(score_inventory(&inventory, f64::NAN).is_err());
}

#[test]
fn test_seeded_reference_run() {
    let mut config = AppConfig::default();
    config.generator.seed = Some(42);

    let pipeline = RetailPipeline::new(config).unwrap();
    let first = pipeline.run().unwrap();
    let second = pipeline.run().unwrap();

    assert_eq!(first.sales, second.sales);
    assert_eq!(first.report, second.report);

    let report = &first.report;
    assert_eq!(report.history_days, 1095);
    assert_eq!(report.horizon_days, 30);
    assert_eq!(first.forecast.len(), 1125);
    assert!(report.projected_demand > 1200.0 && report.projected_demand < 1800.0);
    // Demand above 1200 units leaves no excess stock
    assert!(report.risk_score < 50.0);
    assert_eq!(report.recommendation, Recommendation::Healthy);
}

#[test]
fn test_pipeline_and_generator_share_seeding() {
    let mut config = small_config();
    config.generator.seed = Some(42);

    let expected = SalesGenerator::new(config.generator.clone())
        .unwrap()
        .generate_default()
        .unwrap();
    let outcome = RetailPipeline::new(config).unwrap().run().unwrap();

    assert_eq!(outcome.sales, expected);
}

#[test]
fn test_moving_average_run() {
    let mut config = small_config();
    config.generator.seed = Some(8);
    config.forecast.model = ModelKind::MovingAverage;
    config.forecast.moving_average_window = 7;

    let outcome = RetailPipeline::new(config).unwrap().run().unwrap();
    assert!(outcome.report.model.starts_with("Moving Average"));
    assert_eq!(outcome.forecast.future().len(), 30);
}

#[test]
fn test_invalid_configuration_is_rejected() {
    let mut config = AppConfig::default();
    config.generator.days = 0;
    let pipeline = RetailPipeline::new(config).unwrap();
    assert!(pipeline.run().is_err());

    let mut config = AppConfig::default();
    config.forecast.horizon_days = 0;
    assert!(RetailPipeline::new(config).is_err());
}

#[test]
fn test_single_day_history_fails_forecasting() {
    let mut config = AppConfig::default();
    config.generator.days = 1;
    config.generator.seed = Some(1);

    let result = RetailPipeline::new(config).unwrap().run();
    assert!(result.is_err());
}
