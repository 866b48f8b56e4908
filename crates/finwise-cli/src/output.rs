//! Plain-text rendering of resources for the terminal.

use chrono::Local;

use finwise_core::dashboard::Dashboard;
use finwise_core::models::{
    Budget, CategorizeResult, Goal, InsightStatus, PredictSpendingResponse, SpendingTrendResponse, Transaction,
};
use finwise_core::utils::{format_currency, format_month, truncate_string};

/// Width of title/name columns
const NAME_WIDTH: usize = 28;

/// Number of categories shown on the dashboard
const TOP_CATEGORIES: usize = 5;

/// Width of the goal progress bar in characters
const PROGRESS_BAR_WIDTH: usize = 20;

fn progress_bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * PROGRESS_BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(PROGRESS_BAR_WIDTH - filled))
}

fn transaction_row(tx: &Transaction) -> String {
    format!(
        "{:>5}  {:<10}  {:<width$}  {:<14}  {:>12}",
        tx.id,
        tx.date.map(|d| d.to_string()).unwrap_or_default(),
        truncate_string(&tx.title, NAME_WIDTH),
        truncate_string(&tx.category, 14),
        format_currency(tx.signed_amount()),
        width = NAME_WIDTH,
    )
}

pub fn print_transactions(transactions: &[Transaction]) {
    if transactions.is_empty() {
        println!("No transactions yet");
        return;
    }
    println!(
        "{:>5}  {:<10}  {:<width$}  {:<14}  {:>12}",
        "ID", "Date", "Title", "Category", "Amount",
        width = NAME_WIDTH,
    );
    for tx in transactions {
        println!("{}", transaction_row(tx));
    }
    let net: f64 = transactions.iter().map(Transaction::signed_amount).sum();
    println!("\nNet: {}", format_currency(net));
}

pub fn print_budgets(budgets: &[Budget]) {
    if budgets.is_empty() {
        println!("No budgets yet");
        return;
    }
    let today = Local::now().date_naive();
    for b in budgets {
        let marker = if b.is_active_on(today) { "*" } else { " " };
        println!(
            "{}{:>4}  {:<20}  {:>12}  {}",
            marker,
            b.id,
            truncate_string(&b.category, 20),
            format_currency(b.limit_value()),
            b.period_display()
        );
    }
    println!("\n* active today");
}

pub fn print_goals(goals: &[Goal]) {
    if goals.is_empty() {
        println!("No goals yet");
        return;
    }
    let today = Local::now().date_naive();
    for g in goals {
        let status = if g.completed {
            "done"
        } else if g.is_overdue(today) {
            "overdue"
        } else {
            ""
        };
        println!(
            "{:>4}  {:<width$}  {} {:>6.2}%  {} / {}  due {} {}",
            g.id,
            truncate_string(&g.name, NAME_WIDTH),
            progress_bar(g.progress),
            g.progress,
            format_currency(g.saved_value()),
            format_currency(g.target_value()),
            g.deadline,
            status,
            width = NAME_WIDTH,
        );
    }
}

pub fn print_dashboard(dashboard: &Dashboard) {
    let s = &dashboard.summary;
    println!("Income:   {:>14}", format_currency(s.income()));
    println!("Expenses: {:>14}", format_currency(s.expense()));
    println!("Savings:  {:>14}", format_currency(s.net()));
    if let Some(rate) = s.savings_rate() {
        println!("Savings rate: {:.1}%", rate);
    }

    println!("\nMonthly trend");
    for point in &dashboard.trend {
        println!(
            "  {:<9} in {:>12}  out {:>12}",
            format_month(&point.month),
            format_currency(point.income_value()),
            format_currency(point.expense_value())
        );
    }

    println!("\nTop spending categories");
    for c in dashboard.top_categories(TOP_CATEGORIES) {
        println!("  {:<20} {:>12}", truncate_string(&c.category, 20), format_currency(c.total_value()));
    }

    println!(
        "\nGoals: {} of {} completed",
        dashboard.completed_goals(),
        dashboard.goals.len()
    );

    let p = &dashboard.prediction;
    println!("\nNext month forecast");
    println!("  Income:   {:>12}", format_currency(p.predicted_income));
    println!("  Expenses: {:>12}", format_currency(p.predicted_expense));
    println!("  Savings:  {:>12}", format_currency(p.predicted_savings));
}

pub fn print_categorization(result: &CategorizeResult) {
    match result.category {
        Some(ref category) => println!("{} ({} confidence)", category, result.confidence_display()),
        None => println!("No category suggestion"),
    }
    for (category, score) in result.candidates.iter().skip(1) {
        println!("  also: {} ({:.0}%)", category, score * 100.0);
    }
}

pub fn print_predictions(predictions: &PredictSpendingResponse) {
    println!("Predicted spending next month");
    for p in predictions.top(TOP_CATEGORIES) {
        println!(
            "  {:<20} {:>12}  ({})",
            truncate_string(&p.category, 20),
            format_currency(p.predicted),
            p.model_type
        );
    }
}

pub fn print_trend(trend: &SpendingTrendResponse) {
    if trend.insights.is_empty() {
        return;
    }
    println!("\nInsights");
    for i in &trend.insights {
        let label = match i.status {
            InsightStatus::Overspend => "likely overspend",
            InsightStatus::Saving => "likely saving",
            InsightStatus::Stable => "stable",
        };
        println!(
            "  {:<20} {:>+6.1}%  {}",
            truncate_string(&i.category, 20),
            i.change_percent,
            label
        );
    }
}
