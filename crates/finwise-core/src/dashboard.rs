//! Dashboard data, loaded with all endpoint calls in flight at once.
//!
//! Each call goes through `ApiClient::send` on its own, so if several of them
//! hit an expired token at the same time each performs its own refresh.

use futures::try_join;
use tracing::debug;

use crate::api::endpoints::DEFAULT_TREND_MONTHS;
use crate::api::{ApiClient, ApiError};
use crate::models::{CategoryTotal, DateRange, Goal, MonthlyPoint, MonthlyPrediction, SavingsSummary};

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub summary: SavingsSummary,
    pub trend: Vec<MonthlyPoint>,
    pub categories: Vec<CategoryTotal>,
    pub goals: Vec<Goal>,
    pub prediction: MonthlyPrediction,
}

impl Dashboard {
    /// Largest expense categories first, at most `n`
    pub fn top_categories(&self, n: usize) -> Vec<&CategoryTotal> {
        let mut sorted: Vec<_> = self.categories.iter().collect();
        sorted.sort_by(|a, b| b.total_value().total_cmp(&a.total_value()));
        sorted.truncate(n);
        sorted
    }

    pub fn completed_goals(&self) -> usize {
        self.goals.iter().filter(|g| g.completed).count()
    }

    /// Month with the highest expense in the trend window
    pub fn peak_expense_month(&self) -> Option<&MonthlyPoint> {
        self.trend
            .iter()
            .max_by(|a, b| a.expense_value().total_cmp(&b.expense_value()))
    }
}

/// Fetch everything the dashboard shows. Fails if any one call fails.
pub async fn fetch_dashboard(client: &ApiClient) -> Result<Dashboard, ApiError> {
    let range = DateRange::default();
    let (summary, trend, categories, goals, prediction) = try_join!(
        client.fetch_savings_vs_expense(),
        client.fetch_monthly_spending(DEFAULT_TREND_MONTHS),
        client.fetch_category_spending(&range),
        client.list_goals(),
        client.predict_monthly(),
    )?;

    debug!(
        months = trend.len(),
        categories = categories.len(),
        goals = goals.len(),
        "Dashboard loaded"
    );

    Ok(Dashboard {
        summary,
        trend,
        categories,
        goals,
        prediction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dashboard() -> Dashboard {
        Dashboard {
            summary: SavingsSummary::default(),
            trend: serde_json::from_str(
                r#"[{"month": "2024-04-01", "income": "100", "expense": "80"},
                    {"month": "2024-05-01", "income": "100", "expense": "120.5"}]"#,
            )
            .unwrap(),
            categories: serde_json::from_str(
                r#"[{"category": "Food", "total": "90.00"},
                    {"category": "Rent", "total": "900.00"},
                    {"category": "Fun", "total": "45.10"}]"#,
            )
            .unwrap(),
            goals: Vec::new(),
            prediction: MonthlyPrediction {
                predicted_expense: 0.0,
                predicted_income: 0.0,
                predicted_savings: 0.0,
                model_score: None,
                model_type: None,
            },
        }
    }

    #[test]
    fn test_top_categories() {
        let d = dashboard();
        let top: Vec<_> = d.top_categories(2).into_iter().map(|c| c.category.as_str()).collect();
        assert_eq!(top, vec!["Rent", "Food"]);
    }

    #[test]
    fn test_peak_expense_month() {
        let d = dashboard();
        assert_eq!(d.peak_expense_month().unwrap().expense, "120.5");
        assert_eq!(d.completed_goals(), 0);
    }
}
