mod common;

use chrono::NaiveDate;
use serde_json::json;

use finwise_core::api::Method;
use finwise_core::models::{DateRange, NewBudget, NewTransaction, TransactionType};
use finwise_core::ApiError;

use common::app;

#[tokio::test]
async fn create_transaction_posts_payload() {
    let app = app(Some("A1"), Some("R1"));
    app.backend.reply(
        "transactions/",
        201,
        json!({"id": 10, "user": 1, "username": "ana", "title": "Salary", "amount": "2500.00", "type": "income", "category": "Work", "date": "2024-05-31"}),
    );

    let created = app
        .client
        .create_transaction(&NewTransaction {
            title: "Salary".into(),
            amount: "2500.00".into(),
            kind: TransactionType::Income,
            category: "Work".into(),
        })
        .await
        .unwrap();
    assert_eq!(created.id, 10);
    assert_eq!(created.kind, TransactionType::Income);

    let sent = app.backend.sent();
    assert_eq!(sent[0].method, Method::Post);
    assert_eq!(sent[0].body.as_ref().unwrap()["type"], "income");
    assert_eq!(sent[0].bearer_token(), Some("A1"));
}

#[tokio::test]
async fn invalid_payload_is_rejected_before_sending() {
    let app = app(Some("A1"), Some("R1"));
    let err = app
        .client
        .create_budget(&NewBudget {
            category: "Food".into(),
            limit: "100".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
    assert!(app.backend.sent().is_empty());
}

#[tokio::test]
async fn server_validation_errors_surface_to_caller() {
    let app = app(Some("A1"), Some("R1"));
    app.backend
        .reply("goals/3/", 400, json!({"non_field_errors": ["Validation Error: Target amount must be positive."]}));

    let err = app
        .client
        .update_goal(
            3,
            &finwise_core::models::NewGoal {
                name: "Car".into(),
                target_amount: "5000".into(),
                saved_amount: "0".into(),
                deadline: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                completed: false,
            },
        )
        .await
        .unwrap_err();
    match err {
        ApiError::Validation(msg) => assert_eq!(msg, "Validation Error: Target amount must be positive."),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(app.terminator.calls(), 0);
}

#[tokio::test]
async fn delete_accepts_no_content() {
    let app = app(Some("A1"), Some("R1"));
    app.backend.reply("transactions/5/", 204, json!(null));

    app.client.delete_transaction(5).await.unwrap();
    let sent = app.backend.sent();
    assert_eq!(sent[0].method, Method::Delete);
    assert_eq!(sent[0].path, "transactions/5/");
}

#[tokio::test]
async fn analytics_queries_are_attached() {
    let app = app(Some("A1"), Some("R1"));
    app.backend
        .reply("analytics/monthly-spending/", 200, json!({"months": [{"month": "2024-05-01", "income": "10", "expense": "5"}]}))
        .reply("analytics/category-spending/", 200, json!({"categories": [{"category": "Food", "total": "5.00"}]}));

    let months = app.client.fetch_monthly_spending(3).await.unwrap();
    assert_eq!(months.len(), 1);

    let range = DateRange {
        start: NaiveDate::from_ymd_opt(2024, 1, 1),
        end: NaiveDate::from_ymd_opt(2024, 3, 31),
    };
    let categories = app.client.fetch_category_spending(&range).await.unwrap();
    assert_eq!(categories[0].total_value(), 5.0);

    let sent = app.backend.sent();
    assert_eq!(sent[0].query, vec![("months".to_string(), "3".to_string())]);
    assert_eq!(
        sent[1].query,
        vec![
            ("start".to_string(), "2024-01-01".to_string()),
            ("end".to_string(), "2024-03-31".to_string()),
        ]
    );
}

#[tokio::test]
async fn categorize_rejects_blank_description() {
    let app = app(Some("A1"), Some("R1"));
    assert!(matches!(
        app.client.categorize_transaction("   ").await,
        Err(ApiError::Validation(_))
    ));

    app.backend.reply(
        "ai/categorize-transaction/",
        200,
        json!({"category": "Transport", "confidence": 0.95, "candidates": [["Transport", 0.95]]}),
    );
    let result = app.client.categorize_transaction(" Uber ride ").await.unwrap();
    assert_eq!(result.category.as_deref(), Some("Transport"));
    assert_eq!(app.backend.sent()[0].body, Some(json!({"description": "Uber ride"})));
}
