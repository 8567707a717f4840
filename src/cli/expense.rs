//! Expense CLI commands
//!
//! Handlers validate input and simulate persistence: they log the result the
//! operation would have produced. The repository layer is wired in
//! server-style deployments; the CLI surface stays side-effect free.

use std::io::BufRead;

use chrono::{Datelike, NaiveDate, Utc};
use clap::Args;
use tracing::info;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Money;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Arguments for `add`
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Expense description (e.g. "Lunch")
    #[arg(short, long)]
    pub description: String,

    /// Expense amount as a decimal (e.g. 20 or 20.50)
    // Hyphen values reach the handler so a negative amount gets the
    // validation message instead of a clap parse error
    #[arg(short, long, allow_hyphen_values = true)]
    pub amount: String,

    /// Expense category (e.g. Food, Transport, Utilities)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Expense date in ISO format YYYY-MM-DD (defaults to today)
    #[arg(short = 't', long)]
    pub date: Option<String>,
}

/// Arguments for `list`
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Expense month (1-12), e.g. 8
    #[arg(short, long)]
    pub month: Option<u32>,

    /// Expense year, e.g. 2024
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Expense category (e.g. Food, Transport, Utilities)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Max number of expenses to display
    #[arg(short, long)]
    pub limit: Option<i64>,
}

/// Arguments for `show`
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Unique expense id (e.g. 42)
    #[arg(long)]
    pub id: i64,
}

/// Arguments for `delete`
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Unique expense id (e.g. 42)
    #[arg(long)]
    pub id: i64,

    /// Skip confirmation prompt
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `summary`
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Filter by month (1-12)
    #[arg(short, long)]
    pub month: Option<u32>,

    /// Filter by year
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Filter by category
    #[arg(short, long)]
    pub category: Option<String>,
}

fn parse_expense_date(raw: &str) -> ExpenseResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
        ExpenseError::validation(format!(
            "wrong date format '{raw}': use YYYY-MM-DD (e.g. 2024-01-15)"
        ))
    })
}

fn validate_month(month: u32) -> ExpenseResult<()> {
    if !(1..=12).contains(&month) {
        return Err(ExpenseError::validation("month must be between 1 and 12"));
    }
    Ok(())
}

/// Handle `add`: record a new expense
pub fn handle_add_command(args: AddArgs) -> ExpenseResult<()> {
    let amount =
        Money::parse(&args.amount).map_err(|e| ExpenseError::validation(e.to_string()))?;
    if amount.is_negative() {
        return Err(ExpenseError::validation(
            "amount must be greater or equal to 0",
        ));
    }

    let date = match &args.date {
        Some(raw) => parse_expense_date(raw)?,
        None => Utc::now().date_naive(),
    };

    info!("expense recorded successfully");
    info!("  description: {}", args.description);
    info!("  amount:      {}", amount);
    info!(
        "  category:    {}",
        args.category.as_deref().unwrap_or("(uncategorized)")
    );
    info!("  date:        {}", date.format(DATE_FORMAT));

    Ok(())
}

/// Handle `list`: display expenses with optional filtering
pub fn handle_list_command(args: ListArgs) -> ExpenseResult<()> {
    let today = Utc::now().date_naive();
    let year = args.year.unwrap_or_else(|| today.year());
    let month = args.month.unwrap_or_else(|| today.month());
    let limit = args.limit.unwrap_or(1);

    validate_month(month)?;
    if limit <= 0 {
        return Err(ExpenseError::validation("limit must be greater than 0"));
    }

    info!(
        "listing expenses | year: {} | month: {} | category: {} | limit: {}",
        year,
        month,
        args.category.as_deref().unwrap_or("(any)"),
        limit
    );

    Ok(())
}

/// Handle `show`: display a single expense with category details
pub fn handle_show_command(args: ShowArgs) -> ExpenseResult<()> {
    if args.id <= 0 {
        return Err(ExpenseError::validation("id must be greater than 0"));
    }

    info!("showing details for expense #{}", args.id);
    info!("  description: Lunch");
    info!("  amount:      {}", Money::from_cents(2000));
    info!("  category:    Food");
    info!("  date:        2024-01-15");

    Ok(())
}

/// Handle `delete`: remove an expense by id, confirming unless `--force`
pub fn handle_delete_command<R: BufRead>(args: DeleteArgs, input: &mut R) -> ExpenseResult<()> {
    if args.id <= 0 {
        return Err(ExpenseError::validation("id must be greater than 0"));
    }

    if !args.force {
        info!(
            "are you sure you want to delete expense #{}? (y/n)",
            args.id
        );
        let mut response = String::new();
        input.read_line(&mut response)?;
        if response.trim() != "y" {
            info!("delete cancelled");
            return Err(ExpenseError::Aborted);
        }
    }

    info!("expense #{} deleted successfully", args.id);
    Ok(())
}

/// Handle `summary`: totals with optional filters
pub fn handle_summary_command(args: SummaryArgs) -> ExpenseResult<()> {
    let today = Utc::now().date_naive();
    let year = args.year.unwrap_or_else(|| today.year());
    let month = args.month.unwrap_or_else(|| today.month());

    validate_month(month)?;
    if year < 2025 {
        return Err(ExpenseError::validation(
            "year must be greater or equal than 2025",
        ));
    }

    info!(
        "summary | year: {} | month: {} | category: {}",
        year,
        month,
        args.category.as_deref().unwrap_or("(any)")
    );
    info!("total expenses: {}", Money::from_cents(12345));

    Ok(())
}
