use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::ApiError;
use crate::utils::parse_amount;

/// Maximum title length accepted by the backend
const MAX_TITLE_LENGTH: usize = 100;

/// Maximum category length accepted by the backend
const MAX_CATEGORY_LENGTH: usize = 50;

#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "income" => Some(TransactionType::Income),
            "expense" => Some(TransactionType::Expense),
            _ => None,
        }
    }
}

#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(default)]
    pub user: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    pub title: String,
    pub amount: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl Transaction {
    pub fn amount_value(&self) -> f64 {
        parse_amount(&self.amount)
    }

    /// Amount with sign applied: expenses are negative
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionType::Income => self.amount_value(),
            TransactionType::Expense => -self.amount_value(),
        }
    }
}

/// Payload for creating or replacing a transaction.
#[derive(Debug, Clone, Serialize)]
pub struct NewTransaction {
    pub title: String,
    pub amount: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.title.trim().is_empty() {
            return Err(ApiError::Validation("title: This field may not be blank.".into()));
        }
        if self.title.chars().count() > MAX_TITLE_LENGTH {
            return Err(ApiError::Validation(format!(
                "title: Ensure this field has no more than {} characters.",
                MAX_TITLE_LENGTH
            )));
        }
        if self.category.trim().is_empty() {
            return Err(ApiError::Validation("category: This field may not be blank.".into()));
        }
        if self.category.chars().count() > MAX_CATEGORY_LENGTH {
            return Err(ApiError::Validation(format!(
                "category: Ensure this field has no more than {} characters.",
                MAX_CATEGORY_LENGTH
            )));
        }
        match self.amount.trim().parse::<f64>() {
            Ok(v) if v > 0.0 => Ok(()),
            Ok(_) => Err(ApiError::Validation("amount: Amount must be positive.".into())),
            Err(_) => Err(ApiError::Validation("amount: Invalid amount value.".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_transaction() {
        let json = r#"{"id": 7, "user": 2, "username": "ana", "title": "Coffee", "amount": "4.50", "type": "expense", "category": "Food", "date": "2024-05-03"}"#;
        let tx: Transaction = serde_json::from_str(json).expect("Failed to parse transaction JSON");
        assert_eq!(tx.id, 7);
        assert_eq!(tx.kind, TransactionType::Expense);
        assert_eq!(tx.amount_value(), 4.5);
        assert_eq!(tx.signed_amount(), -4.5);
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2024, 5, 3));
    }

    #[test]
    fn test_transaction_type_parse() {
        assert_eq!(TransactionType::parse("Income"), Some(TransactionType::Income));
        assert_eq!(TransactionType::parse("expense"), Some(TransactionType::Expense));
        assert_eq!(TransactionType::parse("transfer"), None);
    }

    #[test]
    fn test_new_transaction_serializes_type_field() {
        let tx = NewTransaction {
            title: "Salary".into(),
            amount: "2500.00".into(),
            kind: TransactionType::Income,
            category: "Work".into(),
        };
        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value["type"], "income");
        assert_eq!(value["amount"], "2500.00");
    }

    #[test]
    fn test_new_transaction_validate() {
        let mut tx = NewTransaction {
            title: "Rent".into(),
            amount: "900".into(),
            kind: TransactionType::Expense,
            category: "Housing".into(),
        };
        assert!(tx.validate().is_ok());

        tx.amount = "0".into();
        assert!(matches!(tx.validate(), Err(ApiError::Validation(_))));

        tx.amount = "ten".into();
        assert!(matches!(tx.validate(), Err(ApiError::Validation(_))));

        tx.amount = "10".into();
        tx.title = "  ".into();
        assert!(matches!(tx.validate(), Err(ApiError::Validation(_))));
    }
}
