//! Dead stock risk scoring
//!
//! The score is the capital value of stock held beyond projected demand,
//! normalized by the magnitude of that demand:
//!
//! ```text
//! excess_stock = max(0, current_stock - predicted_demand)
//! risk_score   = (excess_stock * unit_value) / max(1, predicted_demand)
//! ```
//!
//! The result is always rounded to two decimal places.

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// Number of decimal places kept in a risk score
const SCORE_DECIMALS: u32 = 2;

/// Calculate the dead stock risk score
///
/// # Arguments
/// * `current_stock` - Units currently held
/// * `unit_value` - Capital value of a single unit
/// * `predicted_demand` - Units expected to sell over the planning horizon
///
/// # Examples
///
/// ```
/// use inventory_math::calculate_financial_risk;
///
/// // Demand covers the stock, nothing is locked up
/// assert_eq!(calculate_financial_risk(100, 10.0, 150.0), 0.0);
///
/// // 300 excess units at 45.0 against 900 units of demand
/// assert_eq!(calculate_financial_risk(1200, 45.0, 900.0), 15.0);
/// ```
pub fn calculate_financial_risk(current_stock: u64, unit_value: f64, predicted_demand: f64) -> f64 {
    let excess_stock = (current_stock as f64 - predicted_demand).max(0.0);
    let risk_score = (excess_stock * unit_value) / predicted_demand.max(1.0);
    round_to(risk_score, SCORE_DECIMALS)
}

/// Round a value to a fixed number of decimal places
///
/// Exact ties go to the even neighbour, so `0.125` becomes `0.12`.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    scaled.round_ties_even() / factor
}

/// Validated inputs for a risk calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskInput {
    current_stock: u64,
    unit_value: f64,
    predicted_demand: f64,
}

impl RiskInput {
    /// Create a new set of risk inputs
    ///
    /// `unit_value` must be finite and non-negative. `predicted_demand` must be
    /// finite; values below one are floored in the denominator when scoring.
    pub fn new(current_stock: u64, unit_value: f64, predicted_demand: f64) -> Result<Self> {
        if !unit_value.is_finite() || unit_value < 0.0 {
            return Err(MathError::InvalidInput(format!(
                "Unit value must be a non-negative finite number, got {}",
                unit_value
            )));
        }

        if !predicted_demand.is_finite() {
            return Err(MathError::InvalidInput(format!(
                "Predicted demand must be finite, got {}",
                predicted_demand
            )));
        }

        Ok(Self {
            current_stock,
            unit_value,
            predicted_demand,
        })
    }

    /// Units currently held
    pub fn current_stock(&self) -> u64 {
        self.current_stock
    }

    /// Capital value of a single unit
    pub fn unit_value(&self) -> f64 {
        self.unit_value
    }

    /// Units expected to sell over the planning horizon
    pub fn predicted_demand(&self) -> f64 {
        self.predicted_demand
    }

    /// Units held beyond the predicted demand
    pub fn excess_stock(&self) -> f64 {
        (self.current_stock as f64 - self.predicted_demand).max(0.0)
    }

    /// Compute the rounded risk score for these inputs
    pub fn score(&self) -> Result<f64> {
        let score =
            calculate_financial_risk(self.current_stock, self.unit_value, self.predicted_demand);

        if !score.is_finite() {
            return Err(MathError::CalculationError(format!(
                "Risk score overflowed for stock {} at unit value {}",
                self.current_stock, self.unit_value
            )));
        }

        Ok(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_excess_stock_scores_zero() {
        assert_eq!(calculate_financial_risk(100, 10.0, 150.0), 0.0);
        assert_eq!(calculate_financial_risk(100, 10.0, 100.0), 0.0);
    }

    #[test]
    fn test_zero_demand_floors_denominator() {
        assert_eq!(calculate_financial_risk(1200, 45.0, 0.0), 54000.0);
        assert_eq!(calculate_financial_risk(1200, 45.0, 0.5), 53977.5);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(1.235001, 2), 1.24);
        assert_eq!(round_to(-0.004, 2), -0.0);
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(3.5, 0), 4.0);
    }

    #[test]
    fn test_risk_input_validation() {
        assert!(RiskInput::new(10, -1.0, 5.0).is_err());
        assert!(RiskInput::new(10, f64::NAN, 5.0).is_err());
        assert!(RiskInput::new(10, 1.0, f64::INFINITY).is_err());

        let input = RiskInput::new(1200, 45.0, 900.0).unwrap();
        assert_eq!(input.excess_stock(), 300.0);
        assert_eq!(input.score().unwrap(), 15.0);
    }

    #[test]
    fn test_overflow_is_reported() {
        let input = RiskInput::new(u64::MAX, f64::MAX, 0.0).unwrap();
        assert!(matches!(
            input.score(),
            Err(MathError::CalculationError(_))
        ));
    }
}
