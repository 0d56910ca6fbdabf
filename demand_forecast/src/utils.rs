//! Utility functions for the demand_forecast crate

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;

/// Extend historical dates with `horizon` consecutive days after the last one
///
/// The returned vector starts with the history itself.
pub fn make_future_dates(history: &[NaiveDate], horizon: usize) -> Result<Vec<NaiveDate>> {
    let mut dates = Vec::with_capacity(history.len() + horizon);
    dates.extend_from_slice(history);

    let mut current = match history.last() {
        Some(last) => *last,
        None if horizon == 0 => return Ok(dates),
        None => {
            return Err(ForecastError::DataError(
                "Cannot extend an empty history".to_string(),
            ))
        }
    };

    for _ in 0..horizon {
        current = current.succ_opt().ok_or_else(|| {
            ForecastError::DataError(format!("No calendar day follows {}", current))
        })?;
        dates.push(current);
    }

    Ok(dates)
}

/// Calculate accuracy metrics for a forecast vs actual values
pub fn forecast_accuracy(forecast: &[f64], actual: &[f64]) -> Result<ForecastAccuracy> {
    if forecast.len() != actual.len() || forecast.is_empty() {
        return Err(ForecastError::DataError(
            "Forecast and actual values must have the same non-zero length".to_string(),
        ));
    }

    let n = forecast.len() as f64;

    let errors: Vec<f64> = forecast
        .iter()
        .zip(actual.iter())
        .map(|(&f, &a)| a - f)
        .collect();

    let mae = errors.iter().map(|e| e.abs()).sum::<f64>() / n;
    let mse = errors.iter().map(|e| e.powi(2)).sum::<f64>() / n;
    let rmse = mse.sqrt();

    // Averaged over days with non-zero actual sales only
    let (pct_sum, pct_count) = actual
        .iter()
        .zip(errors.iter())
        .filter(|(&a, _)| a != 0.0)
        .fold((0.0, 0usize), |(sum, count), (&a, &e)| {
            (sum + (e.abs() / a.abs()) * 100.0, count + 1)
        });
    let mape = if pct_count == 0 {
        0.0
    } else {
        pct_sum / pct_count as f64
    };

    let smape = actual
        .iter()
        .zip(forecast.iter())
        .map(|(&a, &f)| {
            let abs_a = a.abs();
            let abs_f = f.abs();
            if abs_a + abs_f == 0.0 {
                0.0
            } else {
                200.0 * (a - f).abs() / (abs_a + abs_f)
            }
        })
        .sum::<f64>()
        / n;

    Ok(ForecastAccuracy {
        mae,
        mse,
        rmse,
        mape,
        smape,
    })
}

/// Forecast accuracy metrics
#[derive(Debug, Clone)]
pub struct ForecastAccuracy {
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error
    pub mape: f64,
    /// Symmetric Mean Absolute Percentage Error
    pub smape: f64,
}

impl std::fmt::Display for ForecastAccuracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Forecast Accuracy Metrics:")?;
        writeln!(f, "  MAE:   {:.4}", self.mae)?;
        writeln!(f, "  MSE:   {:.4}", self.mse)?;
        writeln!(f, "  RMSE:  {:.4}", self.rmse)?;
        writeln!(f, "  MAPE:  {:.4}%", self.mape)?;
        writeln!(f, "  SMAPE: {:.4}%", self.smape)?;
        Ok(())
    }
}
