//! Synthetic daily sales generation
//!
//! Each day's units are a base level plus a sinusoidal seasonal swing plus
//! Gaussian noise, clamped at zero and truncated toward zero:
//!
//! ```text
//! units_i = trunc(max(0, base + amplitude * sin(2π i / period) + noise_i))
//! noise_i ~ Normal(0, noise_std_dev)
//! ```

use crate::data::{Observation, SalesSeries};
use crate::error::{ForecastError, Result};
use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::{debug, info};

/// Largest level that still truncates into a `u32` unit count
const MAX_DAILY_UNITS: f64 = u32::MAX as f64;

/// Parameters of the synthetic sales process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// First day of the series
    pub start_date: NaiveDate,
    /// Number of consecutive days to generate
    pub days: usize,
    /// Mean daily units before seasonality
    pub base_level: f64,
    /// Peak deviation of the seasonal swing
    pub amplitude: f64,
    /// Length of one seasonal cycle in days
    pub period_days: f64,
    /// Standard deviation of the daily noise
    pub noise_std_dev: f64,
    /// Fixed seed for reproducible runs; fresh entropy when unset
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default(),
            days: 1095,
            base_level: 50.0,
            amplitude: 20.0,
            period_days: 365.0,
            noise_std_dev: 5.0,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Random source for the configured seed, or fresh entropy when none is set
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Generator for synthetic retail sales series
#[derive(Debug, Clone)]
pub struct SalesGenerator {
    config: GeneratorConfig,
    noise: Normal<f64>,
}

impl SalesGenerator {
    /// Create a generator, validating its parameters
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        if config.days == 0 {
            return Err(ForecastError::InvalidParameter(
                "Number of days must be positive".to_string(),
            ));
        }

        if !config.period_days.is_finite() || config.period_days <= 0.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "Seasonal period must be a positive number of days, got {}",
                config.period_days
            )));
        }

        if !config.base_level.is_finite() || !config.amplitude.is_finite() {
            return Err(ForecastError::InvalidParameter(
                "Base level and amplitude must be finite".to_string(),
            ));
        }

        let peak = config.base_level + config.amplitude.abs();
        if peak > MAX_DAILY_UNITS {
            return Err(ForecastError::InvalidParameter(format!(
                "Peak daily level {} exceeds the largest representable unit count {}",
                peak, MAX_DAILY_UNITS
            )));
        }

        if !config.noise_std_dev.is_finite() || config.noise_std_dev < 0.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "Noise standard deviation must be non-negative, got {}",
                config.noise_std_dev
            )));
        }

        let noise = Normal::new(0.0, config.noise_std_dev)
            .map_err(|e| ForecastError::InvalidParameter(e.to_string()))?;

        Ok(Self { config, noise })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Noise-free level for day index `i`
    pub fn expected_level(&self, i: usize) -> f64 {
        let phase = 2.0 * PI * i as f64 / self.config.period_days;
        self.config.base_level + self.config.amplitude * phase.sin()
    }

    /// Generate a series drawing noise from the given random source
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SalesSeries> {
        info!(
            days = self.config.days,
            start = %self.config.start_date,
            "Generating historical retail sales data"
        );

        let mut observations = Vec::with_capacity(self.config.days);
        for i in 0..self.config.days {
            let date = self
                .config
                .start_date
                .checked_add_days(Days::new(i as u64))
                .ok_or_else(|| {
                    ForecastError::DataError(format!(
                        "Day {} after {} is out of the supported date range",
                        i, self.config.start_date
                    ))
                })?;

            let level = self.expected_level(i) + self.noise.sample(rng);
            if level > MAX_DAILY_UNITS {
                return Err(ForecastError::DataError(format!(
                    "Sales level {} on {} does not fit in a daily unit count",
                    level, date
                )));
            }
            // Clamp, then truncate toward zero
            let units = level.max(0.0).trunc() as u32;

            observations.push(Observation::new(date, units));
        }

        let series = SalesSeries::new(observations)?;
        debug!(
            total_units = series.total_units(),
            "Generated sales series"
        );
        Ok(series)
    }

    /// Generate a series using the configured seed, or fresh entropy if none is set
    pub fn generate_default(&self) -> Result<SalesSeries> {
        self.generate(&mut self.config.rng())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters() {
        let config = GeneratorConfig::default();
        assert_eq!(config.days, 1095);
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_invalid_parameters() {
        let zero_days = GeneratorConfig {
            days: 0,
            ..Default::default()
        };
        assert!(SalesGenerator::new(zero_days).is_err());

        let bad_period = GeneratorConfig {
            period_days: 0.0,
            ..Default::default()
        };
        assert!(SalesGenerator::new(bad_period).is_err());

        let bad_noise = GeneratorConfig {
            noise_std_dev: -1.0,
            ..Default::default()
        };
        assert!(SalesGenerator::new(bad_noise).is_err());

        let oversized = GeneratorConfig {
            base_level: u32::MAX as f64,
            amplitude: 20.0,
            ..Default::default()
        };
        assert!(matches!(
            SalesGenerator::new(oversized),
            Err(ForecastError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_noise_beyond_unit_range_is_an_error() {
        let config = GeneratorConfig {
            days: 30,
            base_level: u32::MAX as f64 - 10.0,
            amplitude: 0.0,
            noise_std_dev: 1.0e6,
            ..Default::default()
        };
        let result = SalesGenerator::new(config)
            .unwrap()
            .generate(&mut StdRng::seed_from_u64(4));

        assert!(matches!(result, Err(ForecastError::DataError(_))));
    }

    #[test]
    fn test_configured_seed_drives_rng() {
        let config = GeneratorConfig {
            seed: Some(17),
            ..Default::default()
        };
        let a: u64 = config.rng().gen();
        let b: u64 = config.rng().gen();
        assert_eq!(a, b);
    }

    #[test]
    fn test_noise_free_truncation() {
        let config = GeneratorConfig {
            days: 4,
            base_level: 10.9,
            amplitude: 0.0,
            noise_std_dev: 0.0,
            ..Default::default()
        };
        let series = SalesGenerator::new(config)
            .unwrap()
            .generate(&mut StdRng::seed_from_u64(1))
            .unwrap();

        assert!(series.observations().iter().all(|o| o.units == 10));
    }

    #[test]
    fn test_negative_levels_clamp_to_zero() {
        let config = GeneratorConfig {
            days: 30,
            base_level: -100.0,
            ..Default::default()
        };
        let series = SalesGenerator::new(config)
            .unwrap()
            .generate(&mut StdRng::seed_from_u64(9))
            .unwrap();

        assert_eq!(series.total_units(), 0);
    }
}
