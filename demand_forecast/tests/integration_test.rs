use demand_forecast::generator::{GeneratorConfig, SalesGenerator};
use demand_forecast::models::additive::{AdditiveConfig, AdditiveModel};
use demand_forecast::models::moving_average::MovingAverage;
use demand_forecast::utils::forecast_accuracy;
use demand_forecast::{ForecastModel, TrainedForecastModel};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_full_forecast_workflow() {
    // 1. Generate three years of sales
    let generator = SalesGenerator::new(GeneratorConfig::default()).unwrap();
    let sales = generator.generate(&mut StdRng::seed_from_u64(2023)).unwrap();
    let data = sales.to_time_series();

    // 2. Fit the additive model with yearly seasonality
    let model = AdditiveModel::new(AdditiveConfig::default()).unwrap();
    let trained = model.train(&data).unwrap();

    // 3. Project 30 days
    let forecast = trained.forecast(30).unwrap();
    assert_eq!(forecast.len(), sales.len() + 30);

    // 4. The in-sample fit is within the noise level
    let history: Vec<f64> = forecast.history().iter().map(|p| p.yhat).collect();
    let accuracy = forecast_accuracy(&history, data.values()).unwrap();
    assert!(accuracy.rmse < 6.5, "{}", accuracy);

    // 5. Early January sits on the rising edge of the season, around 50 units a day
    let demand = forecast.future_demand();
    assert!(demand > 1200.0 && demand < 1800.0, "demand was {}", demand);
}

#[test]
fn test_moving_average_is_a_drop_in_model() {
    let generator = SalesGenerator::new(GeneratorConfig {
        days: 60,
        ..Default::default()
    })
    .unwrap();
    let sales = generator.generate(&mut StdRng::seed_from_u64(5)).unwrap();

    let trained = MovingAverage::new(7)
        .unwrap()
        .train(&sales.to_time_series())
        .unwrap();
    let forecast = trained.forecast(30).unwrap();

    assert_eq!(forecast.len(), 90);
    assert!((forecast.future_demand() - 30.0 * trained.last_average()).abs() < 1e-9);
}
