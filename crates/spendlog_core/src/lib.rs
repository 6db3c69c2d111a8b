//! Core domain logic for spendlog.
//! This crate is the single source of truth for expense business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging};
pub use model::date::{CanonicalDate, InvalidDate, InvalidMonth, MonthFilter};
pub use model::expense::{
    Expense, ExpenseId, ExpensePatch, ExpenseValidationError, NewExpense, DEFAULT_CATEGORY,
};
pub use repo::expense_repo::{
    CategoryTotal, ExpenseListQuery, ExpenseRepository, RepoError, RepoResult,
    SqliteExpenseRepository, SummaryQuery, SummaryReport,
};
pub use service::expense_service::{AddExpenseRequest, ExpenseService};
