use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::api::ApiError;
use crate::utils::parse_amount;

#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    #[serde(default)]
    pub user: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    pub name: String,
    pub target_amount: String,
    pub saved_amount: String,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub completed: bool,
    /// Server-computed completion percentage, 0-100
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Goal {
    pub fn target_value(&self) -> f64 {
        parse_amount(&self.target_amount)
    }

    pub fn saved_value(&self) -> f64 {
        parse_amount(&self.saved_amount)
    }

    pub fn remaining(&self) -> f64 {
        (self.target_value() - self.saved_value()).max(0.0)
    }

    /// Progress computed locally from the amounts, clamped to 0-100 and
    /// rounded to two decimals. Useful for goals edited but not yet re-fetched.
    pub fn computed_progress(&self) -> f64 {
        let target = self.target_value();
        if target == 0.0 {
            return 0.0;
        }
        let pct = (self.saved_value() / target * 100.0).clamp(0.0, 100.0);
        (pct * 100.0).round() / 100.0
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && today > self.deadline
    }
}

/// Payload for creating or replacing a goal.
#[derive(Debug, Clone, Serialize)]
pub struct NewGoal {
    pub name: String,
    pub target_amount: String,
    pub saved_amount: String,
    pub deadline: NaiveDate,
    pub completed: bool,
}

impl NewGoal {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::Validation("name: This field may not be blank.".into()));
        }
        match self.target_amount.trim().parse::<f64>() {
            Ok(v) if v > 0.0 => {}
            _ => return Err(ApiError::Validation("Target amount must be positive.".into())),
        }
        match self.saved_amount.trim().parse::<f64>() {
            Ok(v) if v >= 0.0 => Ok(()),
            _ => Err(ApiError::Validation("Saved amount cannot be negative.".into())),
        }
    }
}
