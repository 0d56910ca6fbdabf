use demand_forecast::generator::{GeneratorConfig, SalesGenerator};
use demand_forecast::models::additive::{AdditiveConfig, AdditiveModel};
use demand_forecast::models::moving_average::MovingAverage;
use demand_forecast::utils::forecast_accuracy;
use demand_forecast::{ForecastModel, TrainedForecastModel};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Demand Forecast: Basic Forecasting Example");
    println!("==========================================\n");

    let generator = SalesGenerator::new(GeneratorConfig {
        seed: Some(42),
        ..Default::default()
    })?;
    let sales = generator.generate_default()?;
    let data = sales.to_time_series();
    println!(
        "Generated {} days of sales ({} to {})\n",
        sales.len(),
        sales.first_date().unwrap_or_default(),
        sales.last_date().unwrap_or_default()
    );

    let additive = AdditiveModel::new(AdditiveConfig::default())?.train(&data)?;
    let additive_forecast = additive.forecast(30)?;

    let moving = MovingAverage::new(28)?.train(&data)?;
    let moving_forecast = moving.forecast(30)?;

    for forecast in [&additive_forecast, &moving_forecast] {
        let history: Vec<f64> = forecast.history().iter().map(|p| p.yhat).collect();
        println!("{}", forecast.model());
        println!("  Next 30 days: {:.0} units", forecast.future_demand());
        print!("{}", forecast_accuracy(&history, data.values())?);
        println!();
    }

    println!("First week of the additive forecast:");
    for point in additive_forecast.future().iter().take(7) {
        println!(
            "  {}: {:.1} ({:.1} - {:.1})",
            point.date, point.yhat, point.yhat_lower, point.yhat_upper
        );
    }

    Ok(())
}
