//! # Retail Analytics Workspace
//!
//! Umbrella crate over the workspace members:
//!
//! - [`inventory_math`]: dead stock risk formula and liquidation rule
//! - [`demand_forecast`]: sales series, synthetic generation and forecasting models
//! - [`retail_analytics`]: configuration, pipeline, report and the `retail-analytics` binary
//!
//! ## Example
//!
//! ```
//! use retail_analytics_workspace::inventory_math::calculate_financial_risk;
//!
//! assert_eq!(calculate_financial_risk(1200, 45.0, 0.0), 54000.0);
//! ```

pub use demand_forecast;
pub use inventory_math;
pub use retail_analytics;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_members_are_reachable() {
        let config = retail_analytics::AppConfig::default();
        assert_eq!(config.inventory.stock_level, 1200);
        assert_eq!(demand_forecast::NAME, "demand_forecast");
    }
}
