//! Command handlers bridging argument parsing and the expense service.
//!
//! # Responsibility
//! - Convert raw string flags into typed core inputs.
//! - Render operation results in the stable plain-text output format.

use crate::cli::{Command, GroupBy};
use crate::error::CliError;
use spendlog_core::{
    AddExpenseRequest, CanonicalDate, Expense, ExpenseListQuery, ExpensePatch, ExpenseRepository,
    ExpenseService, MonthFilter, SummaryQuery,
};

pub fn run_command<R: ExpenseRepository>(
    service: &ExpenseService<R>,
    command: Command,
) -> Result<(), CliError> {
    match command {
        Command::Add {
            amount,
            date,
            note,
            category,
        } => {
            let request = AddExpenseRequest {
                amount,
                date: CanonicalDate::parse(&date)?,
                note,
                category,
            };
            let expense = service.add_expense(request)?;
            println!(
                "Added expense id={}, amount={}, date={}, category={}",
                expense.id, expense.amount, expense.date, expense.category
            );
        }
        Command::View {
            limit,
            category,
            start,
            end,
        } => {
            let query = ExpenseListQuery {
                // An empty category flag means "no filter", matching the
                // empty-means-default rule on the write side.
                category: category.filter(|category| !category.is_empty()),
                start: start.as_deref().map(CanonicalDate::parse).transpose()?,
                end: end.as_deref().map(CanonicalDate::parse).transpose()?,
                limit,
            };
            render_expense_table(&service.list_expenses(&query)?);
        }
        Command::Update {
            id,
            amount,
            date,
            note,
            category,
        } => {
            let patch = ExpensePatch {
                amount,
                date: date.as_deref().map(CanonicalDate::parse).transpose()?,
                note,
                category,
            };
            service.update_expense(id, &patch)?;
            println!("Updated expense id={id}");
        }
        Command::Delete { id } => {
            service.delete_expense(id)?;
            println!("Deleted expense id={id}");
        }
        Command::Summary { group_by, month } => {
            let query = SummaryQuery {
                month: month.as_deref().map(MonthFilter::parse).transpose()?,
                group_by_category: group_by == Some(GroupBy::Category),
            };
            let report = service.summarize(&query)?;

            println!("Total spent: {:.2}", report.total);
            if let Some(by_category) = report.by_category {
                println!();
                println!("By category:");
                for row in by_category {
                    println!("  {:<12} : {:.2}", row.category, row.total);
                }
            }
        }
    }

    Ok(())
}

fn render_expense_table(expenses: &[Expense]) {
    if expenses.is_empty() {
        println!("No expenses found.");
        return;
    }

    println!(
        "{:>3} {:>10}  {:>12}  {:>10}  NOTE",
        "ID", "AMOUNT", "CATEGORY", "DATE"
    );
    println!("{}", "-".repeat(60));
    for expense in expenses {
        println!(
            "{:>3} {:>10.2}  {:<12}  {:>10}  {}",
            expense.id, expense.amount, expense.category, expense.date, expense.note
        );
    }
}
