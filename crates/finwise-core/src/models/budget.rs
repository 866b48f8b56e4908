use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::api::ApiError;
use crate::utils::parse_amount;

#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    #[serde(default)]
    pub user: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    pub category: String,
    pub limit: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Budget {
    pub fn limit_value(&self) -> f64 {
        parse_amount(&self.limit)
    }

    /// Whether the budget period covers the given day (inclusive on both ends)
    pub fn is_active_on(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }

    pub fn period_display(&self) -> String {
        format!("{} to {}", self.start_date, self.end_date)
    }
}

/// Payload for creating or replacing a budget.
#[derive(Debug, Clone, Serialize)]
pub struct NewBudget {
    pub category: String,
    pub limit: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl NewBudget {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.category.trim().is_empty() {
            return Err(ApiError::Validation("category: This field may not be blank.".into()));
        }
        if self.start_date > self.end_date {
            return Err(ApiError::Validation(
                "Start date must be before or the same as end date.".into(),
            ));
        }
        match self.limit.trim().parse::<f64>() {
            Ok(v) if v > 0.0 => Ok(()),
            _ => Err(ApiError::Validation("Budget limit must be positive.".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_budget() {
        let json = r#"{"id": 3, "user": 1, "username": "ana", "category": "Food", "limit": "400.00", "start_date": "2024-05-01", "end_date": "2024-05-31", "created_at": "2024-05-01T09:30:00.123456Z"}"#;
        let budget: Budget = serde_json::from_str(json).expect("Failed to parse budget JSON");
        assert_eq!(budget.limit_value(), 400.0);
        assert!(budget.is_active_on(day(2024, 5, 1)));
        assert!(budget.is_active_on(day(2024, 5, 31)));
        assert!(!budget.is_active_on(day(2024, 6, 1)));
        assert!(budget.created_at.is_some());
        assert_eq!(budget.period_display(), "2024-05-01 to 2024-05-31");
    }

    #[test]
    fn test_new_budget_validate() {
        let mut b = NewBudget {
            category: "Food".into(),
            limit: "250".into(),
            start_date: day(2024, 5, 1),
            end_date: day(2024, 5, 1),
        };
        assert!(b.validate().is_ok());

        b.end_date = day(2024, 4, 30);
        assert!(matches!(b.validate(), Err(ApiError::Validation(_))));

        b.end_date = day(2024, 5, 31);
        b.limit = "-5".into();
        assert!(matches!(b.validate(), Err(ApiError::Validation(_))));
    }
}
