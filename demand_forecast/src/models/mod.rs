//! Forecasting models for daily time series
//!
//! A model is configured and then trained on [`TimeSeriesData`], producing a
//! trained model that can predict arbitrary dates. [`TrainedForecastModel::forecast`]
//! predicts the full training history plus a number of days beyond it.

use crate::data::{date_series, TimeSeriesData};
use crate::error::{ForecastError, Result};
use crate::utils::make_future_dates;
use chrono::NaiveDate;
use polars::prelude::*;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use std::fmt::Debug;
use std::fs::File;
use std::path::Path;

/// Predicted value for a single day
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    /// Point prediction
    pub yhat: f64,
    /// Lower bound of the uncertainty interval
    pub yhat_lower: f64,
    /// Upper bound of the uncertainty interval
    pub yhat_upper: f64,
    /// Trend component of the prediction
    pub trend: f64,
}

/// Forecast result covering the training history and the future horizon
#[derive(Debug, Clone, Serialize)]
pub struct ForecastResult {
    /// Name of the model that produced the forecast
    model: String,
    points: Vec<ForecastPoint>,
    history_len: usize,
    horizon: usize,
}

impl ForecastResult {
    /// Create a new forecast result
    pub fn new(
        model: impl Into<String>,
        points: Vec<ForecastPoint>,
        history_len: usize,
        horizon: usize,
    ) -> Result<Self> {
        if points.len() != history_len + horizon {
            return Err(ForecastError::ForecastingError(format!(
                "Points length ({}) doesn't match history ({}) plus horizon ({})",
                points.len(),
                history_len,
                horizon
            )));
        }

        Ok(Self {
            model: model.into(),
            points,
            history_len,
            horizon,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get the number of days forecast beyond the history
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    pub fn history_len(&self) -> usize {
        self.history_len
    }

    /// Points aligned with the training history
    pub fn history(&self) -> &[ForecastPoint] {
        &self.points[..self.history_len]
    }

    /// Points beyond the last training date
    pub fn future(&self) -> &[ForecastPoint] {
        &self.points[self.history_len..]
    }

    /// Get the point predictions
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.yhat).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// Total predicted units over the future horizon
    pub fn future_demand(&self) -> f64 {
        self.future().iter().map(|p| p.yhat).sum()
    }

    /// Calculate mean absolute error of the in-sample fit against actual values
    pub fn mean_absolute_error(&self, actual: &TimeSeriesData) -> Result<f64> {
        if actual.len() != self.history_len || actual.is_empty() {
            return Err(ForecastError::DataError(format!(
                "History length ({}) doesn't match actual length ({})",
                self.history_len,
                actual.len()
            )));
        }

        let sum: f64 = self
            .history()
            .iter()
            .zip(actual.values())
            .map(|(p, a)| (p.yhat - a).abs())
            .sum();

        Ok(sum / actual.len() as f64)
    }

    /// Tabular view with `ds`, `yhat`, `yhat_lower`, `yhat_upper` and `trend` columns
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let column = |name: &str, f: fn(&ForecastPoint) -> f64| {
            Series::new(name, self.points.iter().map(f).collect::<Vec<f64>>())
        };

        let df = DataFrame::new(vec![
            date_series("ds", &self.dates())?,
            column("yhat", |p| p.yhat),
            column("yhat_lower", |p| p.yhat_lower),
            column("yhat_upper", |p| p.yhat_upper),
            column("trend", |p| p.trend),
        ])?;

        Ok(df)
    }

    /// Write the forecast table to a CSV file
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut df = self.to_dataframe()?;
        let mut file = File::create(path)?;
        CsvWriter::new(&mut file).has_header(true).finish(&mut df)?;
        Ok(())
    }

    /// Serialize the forecast as JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Trained forecast model
pub trait TrainedForecastModel: Debug {
    /// Predict values for the given dates
    fn predict(&self, dates: &[NaiveDate]) -> Result<Vec<ForecastPoint>>;

    /// Dates the model was trained on
    fn history_dates(&self) -> &[NaiveDate];

    /// Name of the model
    fn name(&self) -> &str;

    /// Predict the training history plus `horizon` consecutive days after it
    fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        let history = self.history_dates();
        let dates = make_future_dates(history, horizon)?;
        let points = self.predict(&dates)?;

        ForecastResult::new(self.name(), points, history.len(), horizon)
    }
}

/// Forecast model that can be trained on time series data
pub trait ForecastModel: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedForecastModel;

    /// Train the model on time series data
    fn train(&self, data: &TimeSeriesData) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

/// Reject series no model can be fitted to
///
/// Dates in [`TimeSeriesData`] are strictly ascending, so two points means two distinct dates.
pub(crate) fn validate_training_data(data: &TimeSeriesData) -> Result<()> {
    if data.is_empty() {
        return Err(ForecastError::DataError(
            "Empty time series data".to_string(),
        ));
    }

    if data.len() < 2 {
        return Err(ForecastError::DataError(
            "At least two distinct dates are required to fit a model".to_string(),
        ));
    }

    if let Some((date, value)) = data
        .dates()
        .iter()
        .zip(data.values())
        .find(|(_, v)| !v.is_finite())
    {
        return Err(ForecastError::DataError(format!(
            "Non-finite value {} on {}",
            value, date
        )));
    }

    Ok(())
}

/// Half-width of a symmetric normal interval covering `interval_width` of the mass
pub(crate) fn interval_half_width(residuals: &[f64], interval_width: f64) -> Result<f64> {
    if residuals.is_empty() {
        return Ok(0.0);
    }

    let sigma = (residuals.iter().map(|r| r * r).sum::<f64>() / residuals.len() as f64).sqrt();
    let standard = Normal::new(0.0, 1.0).map_err(|e| ForecastError::MathError(e.to_string()))?;
    let z = standard.inverse_cdf(0.5 + interval_width / 2.0);

    Ok(z * sigma)
}

/// Reject interval widths outside (0, 1)
pub(crate) fn validate_interval_width(interval_width: f64) -> Result<()> {
    if !(interval_width > 0.0 && interval_width < 1.0) {
        return Err(ForecastError::InvalidParameter(format!(
            "Interval width must be between 0 and 1, got {}",
            interval_width
        )));
    }
    Ok(())
}

pub mod additive;
pub mod moving_average;
