//! Typed access to the resource endpoints.
//!
//! Everything here goes through `ApiClient::send`, so every call carries the
//! bearer token and gets the same refresh handling.

use tracing::debug;

use crate::models::{
    Budget, CategorizeRequest, CategorizeResult, CategorySpendingResponse, CategoryTotal, DateRange,
    Goal, MonthlyPoint, MonthlyPrediction, MonthlySpendingResponse, NewBudget, NewGoal, NewTransaction,
    NewUser, PredictSpendingResponse, SavingsSummary, SpendingTrendResponse, Transaction, UserProfile,
};

use super::{ApiClient, ApiError, RequestDescriptor};

const TRANSACTIONS_PATH: &str = "transactions/";
const BUDGETS_PATH: &str = "budgets/";
const GOALS_PATH: &str = "goals/";
const REGISTER_PATH: &str = "register/";

/// Number of months shown in the trend chart when not specified
pub const DEFAULT_TREND_MONTHS: u32 = 6;

fn item_path(collection: &str, id: i64) -> String {
    format!("{}{}/", collection, id)
}

impl ApiClient {
    // ===== Transactions =====

    pub async fn list_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        let transactions: Vec<Transaction> = self.get_json(TRANSACTIONS_PATH).await?;
        debug!(count = transactions.len(), "Fetched transactions");
        Ok(transactions)
    }

    pub async fn create_transaction(&self, tx: &NewTransaction) -> Result<Transaction, ApiError> {
        tx.validate()?;
        self.post_json(TRANSACTIONS_PATH, tx).await
    }

    pub async fn update_transaction(&self, id: i64, tx: &NewTransaction) -> Result<Transaction, ApiError> {
        tx.validate()?;
        self.put_json(&item_path(TRANSACTIONS_PATH, id), tx).await
    }

    pub async fn delete_transaction(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&item_path(TRANSACTIONS_PATH, id)).await
    }

    // ===== Budgets =====

    pub async fn list_budgets(&self) -> Result<Vec<Budget>, ApiError> {
        self.get_json(BUDGETS_PATH).await
    }

    pub async fn create_budget(&self, budget: &NewBudget) -> Result<Budget, ApiError> {
        budget.validate()?;
        self.post_json(BUDGETS_PATH, budget).await
    }

    pub async fn update_budget(&self, id: i64, budget: &NewBudget) -> Result<Budget, ApiError> {
        budget.validate()?;
        self.put_json(&item_path(BUDGETS_PATH, id), budget).await
    }

    pub async fn delete_budget(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&item_path(BUDGETS_PATH, id)).await
    }

    // ===== Goals =====

    pub async fn list_goals(&self) -> Result<Vec<Goal>, ApiError> {
        self.get_json(GOALS_PATH).await
    }

    pub async fn create_goal(&self, goal: &NewGoal) -> Result<Goal, ApiError> {
        goal.validate()?;
        self.post_json(GOALS_PATH, goal).await
    }

    pub async fn update_goal(&self, id: i64, goal: &NewGoal) -> Result<Goal, ApiError> {
        goal.validate()?;
        self.put_json(&item_path(GOALS_PATH, id), goal).await
    }

    pub async fn delete_goal(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&item_path(GOALS_PATH, id)).await
    }

    // ===== Analytics =====

    pub async fn fetch_savings_vs_expense(&self) -> Result<SavingsSummary, ApiError> {
        self.get_json("analytics/savings-vs-expense/").await
    }

    pub async fn fetch_monthly_spending(&self, months: u32) -> Result<Vec<MonthlyPoint>, ApiError> {
        let request = RequestDescriptor::get("analytics/monthly-spending/").with_query("months", months.max(1));
        let response: MonthlySpendingResponse = self.request_json(request).await?;
        Ok(response.months)
    }

    pub async fn fetch_category_spending(&self, range: &DateRange) -> Result<Vec<CategoryTotal>, ApiError> {
        let mut request = RequestDescriptor::get("analytics/category-spending/");
        for (key, value) in range.to_query() {
            request = request.with_query(key, value);
        }
        let response: CategorySpendingResponse = self.request_json(request).await?;
        Ok(response.categories)
    }

    // ===== AI & insights =====

    pub async fn categorize_transaction(&self, description: &str) -> Result<CategorizeResult, ApiError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ApiError::Validation("description: This field may not be blank.".into()));
        }
        self.post_json(
            "ai/categorize-transaction/",
            &CategorizeRequest {
                description: description.to_string(),
            },
        )
        .await
    }

    pub async fn predict_spending(&self) -> Result<PredictSpendingResponse, ApiError> {
        self.get_json("ai/predict-spending/").await
    }

    pub async fn spending_trend(&self) -> Result<SpendingTrendResponse, ApiError> {
        self.get_json("ai/spending-trend/").await
    }

    pub async fn predict_monthly(&self) -> Result<MonthlyPrediction, ApiError> {
        self.get_json("insights/predict-monthly/").await
    }

    // ===== Accounts =====

    pub async fn register(&self, user: &NewUser) -> Result<UserProfile, ApiError> {
        self.post_json(REGISTER_PATH, user).await
    }
}
