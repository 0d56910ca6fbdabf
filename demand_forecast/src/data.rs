//! Daily sales series and model input data

use crate::error::{ForecastError, Result};
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Days between 0001-01-01 and 1970-01-01, the offset polars uses for `Date`
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Build a polars `Date` series from calendar days
pub(crate) fn date_series(name: &str, dates: &[NaiveDate]) -> Result<Series> {
    let days: Vec<i32> = dates
        .iter()
        .map(|d| d.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
        .collect();

    Ok(Series::new(name, days).cast(&DataType::Date)?)
}

/// Check that dates are strictly ascending
fn ensure_ascending<'a, I>(dates: I) -> Result<()>
where
    I: IntoIterator<Item = &'a NaiveDate>,
{
    let mut previous: Option<&NaiveDate> = None;
    for date in dates {
        if let Some(prev) = previous {
            if date <= prev {
                return Err(ForecastError::DataError(format!(
                    "Dates must be strictly ascending: {} follows {}",
                    date, prev
                )));
            }
        }
        previous = Some(date);
    }
    Ok(())
}

/// A single day of sales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Calendar day
    pub date: NaiveDate,
    /// Units sold on that day
    pub units: u32,
}

impl Observation {
    pub fn new(date: NaiveDate, units: u32) -> Self {
        Self { date, units }
    }
}

/// Daily sales observations ordered by date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesSeries {
    observations: Vec<Observation>,
}

impl SalesSeries {
    /// Create a series, rejecting unordered or duplicate dates
    pub fn new(observations: Vec<Observation>) -> Result<Self> {
        ensure_ascending(observations.iter().map(|o| &o.date))?;
        Ok(Self { observations })
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.observations.iter().map(|o| o.date).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.observations.first().map(|o| o.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.date)
    }

    /// Whether every pair of neighbouring observations is one day apart
    pub fn is_contiguous(&self) -> bool {
        self.observations
            .windows(2)
            .all(|w| w[0].date.succ_opt() == Some(w[1].date))
    }

    /// Sum of all units sold
    pub fn total_units(&self) -> u64 {
        self.observations.iter().map(|o| o.units as u64).sum()
    }

    /// Average daily units, if the series is not empty
    pub fn mean_units(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some(self.total_units() as f64 / self.len() as f64)
    }

    /// Convert to model input
    pub fn to_time_series(&self) -> TimeSeriesData {
        TimeSeriesData {
            dates: self.dates(),
            values: self.observations.iter().map(|o| o.units as f64).collect(),
        }
    }

    /// Tabular view with `ds` (date) and `y` (units) columns
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let ds = date_series("ds", &self.dates())?;
        let y = Series::new(
            "y",
            self.observations.iter().map(|o| o.units).collect::<Vec<u32>>(),
        );

        Ok(DataFrame::new(vec![ds, y])?)
    }
}

/// Time series data structure for forecasting
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesData {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl TimeSeriesData {
    /// Create a new TimeSeriesData from dates and values
    ///
    /// Values are not checked for finiteness here; models reject them at training time.
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(ForecastError::DataError(format!(
                "Dates length ({}) doesn't match values length ({})",
                dates.len(),
                values.len()
            )));
        }
        ensure_ascending(&dates)?;

        Ok(Self { dates, values })
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Check if the time series is empty
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Get the length of the time series
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Get a slice of the data from start to end index
    pub fn slice(&self, start: usize, end: Option<usize>) -> Result<Self> {
        let end = end.unwrap_or(self.len());
        if start > end || end > self.len() {
            return Err(ForecastError::DataError(format!(
                "Slice {}..{} out of bounds for series of length {}",
                start,
                end,
                self.len()
            )));
        }

        Ok(Self {
            dates: self.dates[start..end].to_vec(),
            values: self.values[start..end].to_vec(),
        })
    }

    /// Calculate the mean of the values
    pub fn mean(&self) -> Result<f64> {
        if self.values.is_empty() {
            return Err(ForecastError::DataError("No values available".to_string()));
        }

        Ok(self.values.iter().sum::<f64>() / self.values.len() as f64)
    }

    /// Calculate the population standard deviation of the values
    pub fn std_dev(&self) -> Result<f64> {
        let mean = self.mean()?;
        let variance = self
            .values
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>()
            / self.values.len() as f64;

        Ok(variance.sqrt())
    }

    /// Tabular view with `ds` and `y` columns
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let ds = date_series("ds", &self.dates)?;
        let y = Series::new("y", self.values.clone());

        Ok(DataFrame::new(vec![ds, y])?)
    }
}
