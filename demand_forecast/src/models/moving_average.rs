//! Moving average model for daily demand

use crate::data::TimeSeriesData;
use crate::error::{ForecastError, Result};
use crate::models::{
    interval_half_width, validate_interval_width, validate_training_data, ForecastModel,
    ForecastPoint, TrainedForecastModel,
};
use chrono::NaiveDate;

/// Simple moving average model
///
/// In-sample points are the trailing mean of up to `window` values ending on
/// that day. Every future day is the mean of the last `window` values.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    /// Name of the model
    name: String,
    /// Window size
    window: usize,
    interval_width: f64,
}

/// Trained moving average model
#[derive(Debug, Clone)]
pub struct TrainedMovingAverage {
    name: String,
    window: usize,
    history_dates: Vec<NaiveDate>,
    historical_data: Vec<f64>,
    /// Mean of the last `window` values
    last_average: f64,
    half_width: f64,
}

impl MovingAverage {
    /// Create a new moving average model
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(ForecastError::InvalidParameter(
                "Window size must be positive".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Moving Average (window={})", window),
            window,
            interval_width: 0.8,
        })
    }

    /// Set the probability mass covered by the uncertainty interval
    pub fn with_interval_width(mut self, interval_width: f64) -> Result<Self> {
        validate_interval_width(interval_width)?;
        self.interval_width = interval_width;
        Ok(self)
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

fn trailing_mean(values: &[f64], end: usize, window: usize) -> f64 {
    let start = (end + 1).saturating_sub(window);
    let slice = &values[start..=end];
    slice.iter().sum::<f64>() / slice.len() as f64
}

impl ForecastModel for MovingAverage {
    type Trained = TrainedMovingAverage;

    fn train(&self, data: &TimeSeriesData) -> Result<Self::Trained> {
        validate_training_data(data)?;

        let values = data.values();
        if values.len() < self.window {
            return Err(ForecastError::DataError(format!(
                "Insufficient data for moving average. Need at least {} observations.",
                self.window
            )));
        }

        let last_average = data.slice(values.len() - self.window, None)?.mean()?;

        // One-step-ahead errors, skipping the first day which has no prior mean
        let residuals: Vec<f64> = (1..values.len())
            .map(|i| values[i] - trailing_mean(values, i - 1, self.window))
            .collect();
        let half_width = interval_half_width(&residuals, self.interval_width)?;

        Ok(TrainedMovingAverage {
            name: self.name.clone(),
            window: self.window,
            history_dates: data.dates().to_vec(),
            historical_data: values.to_vec(),
            last_average,
            half_width,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedMovingAverage {
    pub fn last_average(&self) -> f64 {
        self.last_average
    }

    fn point(&self, date: NaiveDate, yhat: f64) -> ForecastPoint {
        ForecastPoint {
            date,
            yhat,
            yhat_lower: yhat - self.half_width,
            yhat_upper: yhat + self.half_width,
            trend: yhat,
        }
    }
}

impl TrainedForecastModel for TrainedMovingAverage {
    fn predict(&self, dates: &[NaiveDate]) -> Result<Vec<ForecastPoint>> {
        let last_date = self.history_dates.last().copied().ok_or_else(|| {
            ForecastError::ForecastingError("Model has not been fitted to data".to_string())
        })?;

        dates
            .iter()
            .map(|&date| {
                if date > last_date {
                    return Ok(self.point(date, self.last_average));
                }

                match self.history_dates.binary_search(&date) {
                    Ok(i) => Ok(self.point(
                        date,
                        trailing_mean(&self.historical_data, i, self.window),
                    )),
                    Err(_) => Err(ForecastError::ForecastingError(format!(
                        "{} is not part of the training history",
                        date
                    ))),
                }
            })
            .collect()
    }

    fn history_dates(&self) -> &[NaiveDate] {
        &self.history_dates
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_mean_short_prefix() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(trailing_mean(&values, 0, 3), 1.0);
        assert_eq!(trailing_mean(&values, 1, 3), 1.5);
        assert_eq!(trailing_mean(&values, 3, 3), 3.0);
    }

    #[test]
    fn test_invalid_window() {
        assert!(MovingAverage::new(0).is_err());
        assert!(MovingAverage::new(3).unwrap().with_interval_width(1.0).is_err());
    }
}
