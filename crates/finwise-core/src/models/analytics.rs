//! Aggregates served by the analytics endpoints.
//!
//! All money values arrive as decimal strings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::parse_amount;

/// Income vs expense totals for the summary cards.
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SavingsSummary {
    pub total_income: String,
    pub total_expense: String,
    pub savings: String,
}

impl SavingsSummary {
    pub fn income(&self) -> f64 {
        parse_amount(&self.total_income)
    }

    pub fn expense(&self) -> f64 {
        parse_amount(&self.total_expense)
    }

    pub fn net(&self) -> f64 {
        parse_amount(&self.savings)
    }

    /// Share of income kept, as a percentage. None when there is no income.
    pub fn savings_rate(&self) -> Option<f64> {
        let income = self.income();
        if income <= 0.0 {
            None
        } else {
            Some(self.net() / income * 100.0)
        }
    }
}

#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyPoint {
    pub month: NaiveDate,
    pub income: String,
    pub expense: String,
}

impl MonthlyPoint {
    pub fn income_value(&self) -> f64 {
        parse_amount(&self.income)
    }

    pub fn expense_value(&self) -> f64 {
        parse_amount(&self.expense)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonthlySpendingResponse {
    #[serde(default)]
    pub months: Vec<MonthlyPoint>,
}

#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: String,
}

impl CategoryTotal {
    pub fn total_value(&self) -> f64 {
        parse_amount(&self.total)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategorySpendingResponse {
    #[serde(default)]
    pub categories: Vec<CategoryTotal>,
}

/// Optional date window for category spending.
#[derive(Debug, Clone, Default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(start) = self.start {
            query.push(("start".to_string(), start.to_string()));
        }
        if let Some(end) = self.end {
            query.push(("end".to_string(), end.to_string()));
        }
        query
    }
}
