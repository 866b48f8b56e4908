//! Command parsing and dispatch.

use std::io::{self, Write};

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;

use finwise_core::dashboard::fetch_dashboard;
use finwise_core::models::{
    NewBudget, NewGoal, NewTransaction, NewUser, PredictSpendingResponse, SpendingTrendResponse, TransactionType,
};
use finwise_core::{ApiClient, Config};

use crate::output;

const USAGE: &str = "\
Usage: finwise <command> [args]

Session:
  login [username]                 Sign in (password is prompted)
  logout                           Forget stored tokens
  register <username> <email>      Create an account (password is prompted)
  status                           Show whether a session is stored

Data:
  transactions                     List transactions
  add-transaction <title> <amount> <income|expense> <category>
  delete-transaction <id>
  budgets                          List budgets
  add-budget <category> <limit> <start YYYY-MM-DD> <end YYYY-MM-DD>
  delete-budget <id>
  goals                            List goals
  add-goal <name> <target> <deadline YYYY-MM-DD> [saved]
  delete-goal <id>

Insights:
  dashboard                        Summary, trend, categories, goals, forecast
  categorize <description...>      Suggest a category for a description
  predict                          Next-month spending per category and trends
";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Login { username: Option<String> },
    Logout,
    Register { username: String, email: String },
    Status,
    Transactions,
    AddTransaction { title: String, amount: String, kind: TransactionType, category: String },
    DeleteTransaction { id: i64 },
    Budgets,
    AddBudget { category: String, limit: String, start: NaiveDate, end: NaiveDate },
    DeleteBudget { id: i64 },
    Goals,
    AddGoal { name: String, target: String, deadline: NaiveDate, saved: String },
    DeleteGoal { id: i64 },
    Dashboard,
    Categorize { description: String },
    Predict,
}

fn arg<'a>(args: &'a [String], index: usize, name: &str) -> Result<&'a str> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("Missing argument: {}", name))
}

fn parse_id(args: &[String]) -> Result<i64> {
    let raw = arg(args, 1, "id")?;
    raw.parse().with_context(|| format!("Invalid id: {}", raw))
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").with_context(|| format!("Invalid date (expected YYYY-MM-DD): {}", raw))
}

impl Command {
    pub fn parse(args: &[String]) -> Result<Self> {
        let Some(name) = args.first() else {
            return Ok(Command::Help);
        };

        let command = match name.as_str() {
            "help" | "--help" | "-h" => Command::Help,
            "login" => Command::Login {
                username: args.get(1).cloned(),
            },
            "logout" => Command::Logout,
            "register" => Command::Register {
                username: arg(args, 1, "username")?.to_string(),
                email: arg(args, 2, "email")?.to_string(),
            },
            "status" => Command::Status,
            "transactions" => Command::Transactions,
            "add-transaction" => {
                let kind_raw = arg(args, 3, "type")?;
                Command::AddTransaction {
                    title: arg(args, 1, "title")?.to_string(),
                    amount: arg(args, 2, "amount")?.to_string(),
                    kind: TransactionType::parse(kind_raw)
                        .ok_or_else(|| anyhow!("Type must be income or expense, got {}", kind_raw))?,
                    category: arg(args, 4, "category")?.to_string(),
                }
            }
            "delete-transaction" => Command::DeleteTransaction { id: parse_id(args)? },
            "budgets" => Command::Budgets,
            "add-budget" => Command::AddBudget {
                category: arg(args, 1, "category")?.to_string(),
                limit: arg(args, 2, "limit")?.to_string(),
                start: parse_date(arg(args, 3, "start")?)?,
                end: parse_date(arg(args, 4, "end")?)?,
            },
            "delete-budget" => Command::DeleteBudget { id: parse_id(args)? },
            "goals" => Command::Goals,
            "add-goal" => Command::AddGoal {
                name: arg(args, 1, "name")?.to_string(),
                target: arg(args, 2, "target")?.to_string(),
                deadline: parse_date(arg(args, 3, "deadline")?)?,
                saved: args.get(4).cloned().unwrap_or_else(|| "0".to_string()),
            },
            "delete-goal" => Command::DeleteGoal { id: parse_id(args)? },
            "dashboard" => Command::Dashboard,
            "categorize" => {
                let description = args[1..].join(" ");
                if description.trim().is_empty() {
                    bail!("Missing argument: description");
                }
                Command::Categorize { description }
            }
            "predict" => Command::Predict,
            other => bail!("Unknown command: {}\n\n{}", other, USAGE),
        };
        Ok(command)
    }
}

fn prompt_line(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

pub async fn run(client: &ApiClient, config: &mut Config, command: Command) -> Result<()> {
    match command {
        Command::Help => print!("{}", USAGE),

        Command::Login { username } => {
            let username = match username.or_else(|| config.last_username.clone()) {
                Some(u) => u,
                None => prompt_line("Username: ")?,
            };
            let password = rpassword::prompt_password(format!("Password for {}: ", username))?;
            client.login(&username, &password).await?;
            config.last_username = Some(username.clone());
            config.save().context("Failed to save configuration")?;
            println!("Logged in as {}", username);
        }

        Command::Logout => {
            client.logout()?;
            println!("Logged out");
        }

        Command::Register { username, email } => {
            let password = rpassword::prompt_password("Password: ")?;
            let confirm = rpassword::prompt_password("Confirm password: ")?;
            if password != confirm {
                bail!("Passwords do not match");
            }
            let profile = client
                .register(&NewUser {
                    username,
                    email,
                    password,
                    phone: None,
                    income: None,
                })
                .await?;
            println!("Registered {}. Run `finwise login {}` to sign in.", profile.username, profile.username);
        }

        Command::Status => {
            if client.is_logged_in() {
                let who = config.last_username.as_deref().unwrap_or("unknown user");
                println!("Session stored for {} ({})", who, config.api_base_url);
            } else {
                println!("Not logged in");
            }
        }

        Command::Transactions => output::print_transactions(&client.list_transactions().await?),

        Command::AddTransaction { title, amount, kind, category } => {
            let tx = client
                .create_transaction(&NewTransaction { title, amount, kind, category })
                .await?;
            println!("Created transaction #{}", tx.id);
        }

        Command::DeleteTransaction { id } => {
            client.delete_transaction(id).await?;
            println!("Deleted transaction #{}", id);
        }

        Command::Budgets => output::print_budgets(&client.list_budgets().await?),

        Command::AddBudget { category, limit, start, end } => {
            let budget = client
                .create_budget(&NewBudget {
                    category,
                    limit,
                    start_date: start,
                    end_date: end,
                })
                .await?;
            println!("Created budget #{}", budget.id);
        }

        Command::DeleteBudget { id } => {
            client.delete_budget(id).await?;
            println!("Deleted budget #{}", id);
        }

        Command::Goals => output::print_goals(&client.list_goals().await?),

        Command::AddGoal { name, target, deadline, saved } => {
            let goal = client
                .create_goal(&NewGoal {
                    name,
                    target_amount: target,
                    saved_amount: saved,
                    deadline,
                    completed: false,
                })
                .await?;
            println!("Created goal #{}", goal.id);
        }

        Command::DeleteGoal { id } => {
            client.delete_goal(id).await?;
            println!("Deleted goal #{}", id);
        }

        Command::Dashboard => output::print_dashboard(&fetch_dashboard(client).await?),

        Command::Categorize { description } => {
            output::print_categorization(&client.categorize_transaction(&description).await?)
        }

        Command::Predict => {
            let (predictions, trend) = fetch_predictions(client).await?;
            output::print_predictions(&predictions);
            output::print_trend(&trend);
        }
    }
    Ok(())
}

/// Both prediction calls run concurrently, each with its own auth handling
async fn fetch_predictions(client: &ApiClient) -> Result<(PredictSpendingResponse, SpendingTrendResponse)> {
    let (predictions, trend) = tokio::try_join!(client.predict_spending(), client.spending_trend())?;
    Ok((predictions, trend))
}
