//! Data models for FinWise entities.
//!
//! This module contains the data structures exchanged with the backend:
//!
//! - `Transaction`, `Budget`, `Goal` and their write payloads
//! - Analytics aggregates: `SavingsSummary`, `MonthlyPoint`, `CategoryTotal`
//! - AI results: `CategorizeResult`, `SpendingPrediction`, `MonthlyPrediction`
//! - Account types: `TokenPair`, `NewUser`

pub mod account;
pub mod ai;
pub mod analytics;
pub mod budget;
pub mod goal;
pub mod transaction;

pub use account::{AccessToken, LoginRequest, NewUser, RefreshRequest, TokenPair, UserProfile};
pub use ai::{
    CategorizeRequest, CategorizeResult, InsightStatus, MonthlyPrediction, PredictSpendingResponse,
    SpendingInsight, SpendingPrediction, SpendingTrendResponse, TrendKind, TrendPoint,
};
pub use analytics::{
    CategorySpendingResponse, CategoryTotal, DateRange, MonthlyPoint, MonthlySpendingResponse,
    SavingsSummary,
};
pub use budget::{Budget, NewBudget};
pub use goal::{Goal, NewGoal};
pub use transaction::{NewTransaction, Transaction, TransactionType};
