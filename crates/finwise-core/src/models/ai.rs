//! Response shapes of the AI categorization and prediction endpoints.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct CategorizeRequest {
    pub description: String,
}

#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorizeResult {
    pub category: Option<String>,
    #[serde(default)]
    pub confidence: f64,
    /// (category, confidence) pairs
    #[serde(default)]
    pub candidates: Vec<(String, f64)>,
}

impl CategorizeResult {
    pub fn confidence_display(&self) -> String {
        format!("{:.0}%", self.confidence * 100.0)
    }
}

#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendingPrediction {
    pub category: String,
    pub predicted: f64,
    pub model_type: String,
    #[serde(default)]
    pub model_score: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictSpendingResponse {
    #[serde(default)]
    pub predictions: Vec<SpendingPrediction>,
    #[serde(default)]
    pub last_month: Option<String>,
    #[serde(default)]
    pub last_totals: HashMap<String, f64>,
}

impl PredictSpendingResponse {
    /// Largest predictions first, at most `n`
    pub fn top(&self, n: usize) -> Vec<&SpendingPrediction> {
        let mut sorted: Vec<_> = self.predictions.iter().collect();
        sorted.sort_by(|a, b| b.predicted.total_cmp(&a.predicted));
        sorted.truncate(n);
        sorted
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendKind {
    Actual,
    Predicted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint {
    pub month: String,
    pub category: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TrendKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightStatus {
    Overspend,
    Saving,
    Stable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendingInsight {
    pub category: String,
    pub predicted: f64,
    pub avg_recent: f64,
    pub change_percent: f64,
    pub status: InsightStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpendingTrendResponse {
    #[serde(default)]
    pub trends: Vec<TrendPoint>,
    #[serde(default)]
    pub insights: Vec<SpendingInsight>,
}

/// Next-month income/expense forecast from the insights endpoint.
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyPrediction {
    pub predicted_expense: f64,
    pub predicted_income: f64,
    pub predicted_savings: f64,
    #[serde(default)]
    pub model_score: Option<f64>,
    #[serde(default)]
    pub model_type: Option<String>,
}
