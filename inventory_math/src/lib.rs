//! # Inventory Math
//!
//! Financial calculations for inventory decisions.
//! This crate scores "dead stock" risk: capital tied up in stock that
//! exceeds projected demand, and the decision rule applied to that score.

use thiserror::Error;

pub mod policy;
pub mod risk;

pub use policy::{Recommendation, RiskPolicy, DEFAULT_LIQUIDATION_THRESHOLD};
pub use risk::{calculate_financial_risk, round_to, RiskInput};

/// Errors that can occur in inventory calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for inventory math operations
pub type Result<T> = std::result::Result<T, MathError>;
