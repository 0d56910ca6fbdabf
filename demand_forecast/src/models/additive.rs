//! Additive trend + seasonality model
//!
//! The prediction for a day `d` is
//!
//! ```text
//! y(d) = trend(d) + Σ seasonality_s(d)
//! trend(d)         = m + k * t(d)                       t scaled to [0, 1] over the history
//! seasonality_s(d) = Σ_{n=1..N_s} a_n sin(2πn d / P_s) + b_n cos(2πn d / P_s)
//! ```
//!
//! Coefficients are fitted jointly by ridge-regularised least squares on the
//! max-scaled series. The slope and every Fourier coefficient carry a Gaussian
//! prior, which becomes a `1 / scale²` penalty in the normal equations; the
//! intercept is unpenalised. Uncertainty intervals use the residual standard
//! deviation of the in-sample fit.

use crate::data::TimeSeriesData;
use crate::error::{ForecastError, Result};
use crate::models::{
    interval_half_width, validate_interval_width, validate_training_data, ForecastModel,
    ForecastPoint, TrainedForecastModel,
};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::debug;

/// Days in a year, averaged over leap years
const YEARLY_PERIOD: f64 = 365.25;
const WEEKLY_PERIOD: f64 = 7.0;

/// Pivots smaller than this are treated as a singular system
const PIVOT_EPSILON: f64 = 1e-12;

/// Configuration of an additive model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdditiveConfig {
    pub yearly_seasonality: bool,
    pub weekly_seasonality: bool,
    /// Sub-daily cycle; cannot be estimated from one observation per day
    pub daily_seasonality: bool,
    pub yearly_fourier_order: usize,
    pub weekly_fourier_order: usize,
    /// Probability mass covered by `yhat_lower..yhat_upper`
    pub interval_width: f64,
    pub seasonality_prior_scale: f64,
    pub trend_prior_scale: f64,
}

impl Default for AdditiveConfig {
    fn default() -> Self {
        Self {
            yearly_seasonality: true,
            weekly_seasonality: true,
            daily_seasonality: false,
            yearly_fourier_order: 10,
            weekly_fourier_order: 3,
            interval_width: 0.8,
            seasonality_prior_scale: 10.0,
            trend_prior_scale: 5.0,
        }
    }
}

/// A periodic component expanded into Fourier terms
#[derive(Debug, Clone, Copy, PartialEq)]
struct Seasonality {
    name: &'static str,
    period: f64,
    order: usize,
}

impl Seasonality {
    fn columns(&self) -> usize {
        2 * self.order
    }

    fn push_features(&self, day: f64, row: &mut Vec<f64>) {
        for n in 1..=self.order {
            let angle = 2.0 * PI * n as f64 * day / self.period;
            row.push(angle.sin());
            row.push(angle.cos());
        }
    }
}

/// Additive forecasting model with a linear trend and Fourier seasonalities
#[derive(Debug, Clone)]
pub struct AdditiveModel {
    name: String,
    config: AdditiveConfig,
    seasonalities: Vec<Seasonality>,
}

/// Trained additive model
#[derive(Debug, Clone)]
pub struct TrainedAdditiveModel {
    name: String,
    history_dates: Vec<NaiveDate>,
    seasonalities: Vec<Seasonality>,
    /// Day number of the first history date
    t_start: f64,
    /// Days between the first and last history dates
    t_span: f64,
    /// Factor the series was divided by before fitting
    y_scale: f64,
    /// Intercept, slope, then Fourier coefficients in seasonality order
    coefficients: Vec<f64>,
    /// Interval half-width in original units
    half_width: f64,
}

impl AdditiveModel {
    /// Create a new additive model
    pub fn new(config: AdditiveConfig) -> Result<Self> {
        if config.daily_seasonality {
            return Err(ForecastError::InvalidParameter(
                "Daily seasonality requires sub-daily observations".to_string(),
            ));
        }

        validate_interval_width(config.interval_width)?;

        for (label, scale) in [
            ("Seasonality", config.seasonality_prior_scale),
            ("Trend", config.trend_prior_scale),
        ] {
            if !scale.is_finite() || scale <= 0.0 {
                return Err(ForecastError::InvalidParameter(format!(
                    "{} prior scale must be positive, got {}",
                    label, scale
                )));
            }
        }

        let mut seasonalities = Vec::new();
        if config.yearly_seasonality {
            seasonalities.push(Seasonality {
                name: "yearly",
                period: YEARLY_PERIOD,
                order: config.yearly_fourier_order,
            });
        }
        if config.weekly_seasonality {
            seasonalities.push(Seasonality {
                name: "weekly",
                period: WEEKLY_PERIOD,
                order: config.weekly_fourier_order,
            });
        }

        if let Some(s) = seasonalities.iter().find(|s| s.order == 0) {
            return Err(ForecastError::InvalidParameter(format!(
                "Fourier order for {} seasonality must be positive",
                s.name
            )));
        }

        let components: Vec<&str> = seasonalities.iter().map(|s| s.name).collect();
        let name = if components.is_empty() {
            "Additive(trend)".to_string()
        } else {
            format!("Additive(trend+{})", components.join("+"))
        };

        Ok(Self {
            name,
            config,
            seasonalities,
        })
    }

    pub fn config(&self) -> &AdditiveConfig {
        &self.config
    }

    fn parameter_count(&self) -> usize {
        2 + self.seasonalities.iter().map(Seasonality::columns).sum::<usize>()
    }

    /// Per-column ridge penalty derived from the priors
    fn penalties(&self) -> Vec<f64> {
        let mut penalties = Vec::with_capacity(self.parameter_count());
        penalties.push(0.0);
        penalties.push(1.0 / self.config.trend_prior_scale.powi(2));
        let seasonal = 1.0 / self.config.seasonality_prior_scale.powi(2);
        penalties.resize(self.parameter_count(), seasonal);
        penalties
    }
}

fn day_number(date: &NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

fn design_row(
    day: f64,
    t_start: f64,
    t_span: f64,
    seasonalities: &[Seasonality],
    row: &mut Vec<f64>,
) {
    row.clear();
    row.push(1.0);
    row.push((day - t_start) / t_span);
    for seasonality in seasonalities {
        seasonality.push_features(day, row);
    }
}

/// Solve `a x = b` by Gaussian elimination with partial pivoting
fn solve_linear_system(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>> {
    let n = b.len();

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);

        if a[pivot_row][col].abs() < PIVOT_EPSILON {
            return Err(ForecastError::MathError(format!(
                "Normal equations are singular at column {}",
                col
            )));
        }

        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        let pivot = a[col].clone();
        let pivot_b = b[col];
        for row in col + 1..n {
            let factor = a[row][col] / pivot[col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[row][k] -= factor * pivot[k];
            }
            b[row] -= factor * pivot_b;
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }

    Ok(x)
}

impl ForecastModel for AdditiveModel {
    type Trained = TrainedAdditiveModel;

    fn train(&self, data: &TimeSeriesData) -> Result<TrainedAdditiveModel> {
        validate_training_data(data)?;

        let days: Vec<f64> = data.dates().iter().map(day_number).collect();
        let t_start = days[0];
        let t_span = days[days.len() - 1] - t_start;

        let y_scale = data
            .values()
            .iter()
            .fold(0.0_f64, |acc, v| acc.max(v.abs()));
        let y_scale = if y_scale > 0.0 { y_scale } else { 1.0 };

        let p = self.parameter_count();
        let mut xtx = vec![vec![0.0; p]; p];
        let mut xty = vec![0.0; p];
        let mut row = Vec::with_capacity(p);

        for (&day, &value) in days.iter().zip(data.values()) {
            design_row(day, t_start, t_span, &self.seasonalities, &mut row);
            let y = value / y_scale;
            for i in 0..p {
                xty[i] += row[i] * y;
                for j in i..p {
                    xtx[i][j] += row[i] * row[j];
                }
            }
        }

        for i in 0..p {
            for j in 0..i {
                xtx[i][j] = xtx[j][i];
            }
        }
        for (i, penalty) in self.penalties().into_iter().enumerate() {
            xtx[i][i] += penalty;
        }

        let coefficients = solve_linear_system(xtx, xty)?;

        let residuals: Vec<f64> = days
            .iter()
            .zip(data.values())
            .map(|(&day, &value)| {
                design_row(day, t_start, t_span, &self.seasonalities, &mut row);
                let fitted: f64 = row.iter().zip(&coefficients).map(|(x, c)| x * c).sum();
                value - fitted * y_scale
            })
            .collect();

        let half_width = interval_half_width(&residuals, self.config.interval_width)?;

        debug!(
            model = %self.name,
            observations = data.len(),
            parameters = p,
            slope = coefficients[1] * y_scale,
            half_width,
            "Fitted additive model"
        );

        Ok(TrainedAdditiveModel {
            name: self.name.clone(),
            history_dates: data.dates().to_vec(),
            seasonalities: self.seasonalities.clone(),
            t_start,
            t_span,
            y_scale,
            coefficients,
            half_width,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedAdditiveModel {
    /// Fitted trend slope in units per day
    pub fn slope_per_day(&self) -> f64 {
        self.coefficients[1] * self.y_scale / self.t_span
    }
}

impl TrainedForecastModel for TrainedAdditiveModel {
    fn predict(&self, dates: &[NaiveDate]) -> Result<Vec<ForecastPoint>> {
        let mut row = Vec::with_capacity(self.coefficients.len());

        let points = dates
            .iter()
            .map(|date| {
                design_row(
                    day_number(date),
                    self.t_start,
                    self.t_span,
                    &self.seasonalities,
                    &mut row,
                );
                let trend = (self.coefficients[0] + self.coefficients[1] * row[1]) * self.y_scale;
                let yhat = row
                    .iter()
                    .zip(&self.coefficients)
                    .map(|(x, c)| x * c)
                    .sum::<f64>()
                    * self.y_scale;

                ForecastPoint {
                    date: *date,
                    yhat,
                    yhat_lower: yhat - self.half_width,
                    yhat_upper: yhat + self.half_width,
                    trend,
                }
            })
            .collect();

        Ok(points)
    }

    fn history_dates(&self) -> &[NaiveDate] {
        &self.history_dates
    }

    fn name(&self) -> &str {
        &self.name
    }
}
