//! Summary of one analytics run

use crate::error::Result;
use inventory_math::Recommendation;
use serde::Serialize;
use std::fmt;

const RULE_WIDTH: usize = 50;

/// Outcome of forecasting and risk scoring
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    /// Model that produced the demand projection
    pub model: String,
    /// Days of sales history the model was fitted on
    pub history_days: usize,
    /// Days covered by the demand projection
    pub horizon_days: usize,
    /// Total predicted units over the horizon
    pub projected_demand: f64,
    pub current_stock: u64,
    pub unit_price: f64,
    /// Dead stock risk score, rounded to two decimals
    pub risk_score: f64,
    pub liquidation_threshold: f64,
    pub recommendation: Recommendation,
}

impl AnalyticsReport {
    /// Projected demand in whole units, truncated toward zero
    pub fn projected_units(&self) -> i64 {
        self.projected_demand.trunc() as i64
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for AnalyticsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(f, "{}", rule)?;
        writeln!(f, "RETAIL ANALYTICS SUMMARY")?;
        writeln!(f, "{}", rule)?;
        writeln!(
            f,
            "Projected Demand (Next {} Days): {} units",
            self.horizon_days,
            self.projected_units()
        )?;
        writeln!(f, "Current Stock Level: {} units", self.current_stock)?;
        writeln!(f, "Financial Risk Score: {:.2}", self.risk_score)?;
        writeln!(f, "{}", self.recommendation)?;
        write!(f, "{}", rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(risk_score: f64, recommendation: Recommendation) -> AnalyticsReport {
        AnalyticsReport {
            model: "stub".to_string(),
            history_days: 1095,
            horizon_days: 30,
            projected_demand: 899.97,
            current_stock: 1200,
            unit_price: 45.0,
            risk_score,
            liquidation_threshold: 50.0,
            recommendation,
        }
    }

    #[test]
    fn test_summary_block() {
        let text = report(15.0, Recommendation::Healthy).to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "=".repeat(50));
        assert_eq!(lines[1], "RETAIL ANALYTICS SUMMARY");
        assert_eq!(lines[3], "Projected Demand (Next 30 Days): 899 units");
        assert_eq!(lines[4], "Current Stock Level: 1200 units");
        assert_eq!(lines[5], "Financial Risk Score: 15.00");
        assert!(lines[6].starts_with("STATUS"));
    }

    #[test]
    fn test_json_report() {
        let json = report(54000.0, Recommendation::Liquidate)
            .to_json_pretty()
            .unwrap();
        assert!(json.contains("\"recommendation\": \"liquidate\""));
        assert!(json.contains("\"risk_score\": 54000.0"));
    }
}
