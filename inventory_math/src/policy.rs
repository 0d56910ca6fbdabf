//! Decision rule applied to a dead stock risk score

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk score above which liquidation is recommended
pub const DEFAULT_LIQUIDATION_THRESHOLD: f64 = 50.0;

/// Action recommended for a scored inventory position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    /// Capital is locked in dead stock; move it
    Liquidate,
    /// Stock is in line with projected demand
    Healthy,
}

impl Recommendation {
    /// Whether the recommendation calls for action
    pub fn requires_action(&self) -> bool {
        matches!(self, Recommendation::Liquidate)
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Liquidate => {
                write!(f, "ACTION REQUIRED: Liquidation strategy recommended for dead stock.")
            }
            Recommendation::Healthy => {
                write!(f, "STATUS: Inventory levels healthy. Liquidity maintained.")
            }
        }
    }
}

/// Threshold policy mapping a risk score to a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskPolicy {
    liquidation_threshold: f64,
}

impl RiskPolicy {
    /// Create a policy with a custom liquidation threshold
    pub fn new(liquidation_threshold: f64) -> Result<Self> {
        if !liquidation_threshold.is_finite() || liquidation_threshold < 0.0 {
            return Err(MathError::InvalidInput(format!(
                "Liquidation threshold must be a non-negative finite number, got {}",
                liquidation_threshold
            )));
        }

        Ok(Self {
            liquidation_threshold,
        })
    }

    /// The score above which liquidation is recommended
    pub fn liquidation_threshold(&self) -> f64 {
        self.liquidation_threshold
    }

    /// Map a risk score to a recommendation
    ///
    /// A score equal to the threshold is still healthy.
    pub fn assess(&self, risk_score: f64) -> Recommendation {
        if risk_score > self.liquidation_threshold {
            Recommendation::Liquidate
        } else {
            Recommendation::Healthy
        }
    }
}

impl Default for RiskPolicy {
    fn default() -> Self {
        Self {
            liquidation_threshold: DEFAULT_LIQUIDATION_THRESHOLD,
        }
    }
}
