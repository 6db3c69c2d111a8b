//! Expense repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD and aggregation APIs over the `expenses` table.
//! - Keep SQL construction inside the persistence boundary.
//!
//! # Invariants
//! - Write paths validate the positive-amount invariant before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - User input reaches SQL only through bound parameters.

use crate::db::DbError;
use crate::model::date::{CanonicalDate, MonthFilter};
use crate::model::expense::{
    Expense, ExpenseId, ExpensePatch, ExpenseValidationError, NewExpense, DEFAULT_CATEGORY,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const EXPENSE_SELECT_SQL: &str = "SELECT id, amount, category, note, date FROM expenses";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for expense persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ExpenseValidationError),
    Db(DbError),
    NotFound(ExpenseId),
    NoFieldsProvided,
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "expense not found: {id}"),
            Self::NoFieldsProvided => write!(f, "no update fields provided"),
            Self::InvalidData(message) => write!(f, "invalid persisted expense data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::NoFieldsProvided => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ExpenseValidationError> for RepoError {
    fn from(value: ExpenseValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Filter options for listing expenses. All filters combine with AND.
#[derive(Debug, Clone, Default)]
pub struct ExpenseListQuery {
    /// Exact category match.
    pub category: Option<String>,
    /// Inclusive lower date bound.
    pub start: Option<CanonicalDate>,
    /// Inclusive upper date bound.
    pub end: Option<CanonicalDate>,
    /// `None` and zero both mean unbounded.
    pub limit: Option<u32>,
}

/// Options for the summary aggregation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryQuery {
    /// Restrict totals to one calendar month.
    pub month: Option<MonthFilter>,
    /// Additionally compute per-category subtotals.
    pub group_by_category: bool,
}

/// Per-category subtotal row.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Aggregation result for the summary operation.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryReport {
    /// Sum over all matching rows; `0.0` when nothing matches.
    pub total: f64,
    /// Present only when grouping was requested; ordered by subtotal
    /// descending.
    pub by_category: Option<Vec<CategoryTotal>>,
}

/// Repository interface for expense CRUD and aggregation.
pub trait ExpenseRepository {
    fn insert_expense(&self, expense: &NewExpense) -> RepoResult<ExpenseId>;
    fn get_expense(&self, id: ExpenseId) -> RepoResult<Option<Expense>>;
    fn list_expenses(&self, query: &ExpenseListQuery) -> RepoResult<Vec<Expense>>;
    fn update_expense(&self, id: ExpenseId, patch: &ExpensePatch) -> RepoResult<()>;
    fn delete_expense(&self, id: ExpenseId) -> RepoResult<()>;
    fn summarize(&self, query: &SummaryQuery) -> RepoResult<SummaryReport>;
}

/// SQLite-backed expense repository.
pub struct SqliteExpenseRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteExpenseRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn expense_exists(&self, id: ExpenseId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM expenses WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

impl ExpenseRepository for SqliteExpenseRepository<'_> {
    fn insert_expense(&self, expense: &NewExpense) -> RepoResult<ExpenseId> {
        expense.validate()?;

        self.conn.execute(
            "INSERT INTO expenses (amount, category, note, date) VALUES (?1, ?2, ?3, ?4);",
            params![
                expense.amount,
                expense.category.as_str(),
                expense.note.as_str(),
                expense.date.to_string(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_expense(&self, id: ExpenseId) -> RepoResult<Option<Expense>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EXPENSE_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_expense_row(row)?));
        }

        Ok(None)
    }

    fn list_expenses(&self, query: &ExpenseListQuery) -> RepoResult<Vec<Expense>> {
        let mut sql = format!("{EXPENSE_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(category) = &query.category {
            sql.push_str(" AND category = ?");
            bind_values.push(Value::Text(category.clone()));
        }

        if let Some(start) = query.start {
            sql.push_str(" AND date >= ?");
            bind_values.push(Value::Text(start.to_string()));
        }

        if let Some(end) = query.end {
            sql.push_str(" AND date <= ?");
            bind_values.push(Value::Text(end.to_string()));
        }

        sql.push_str(" ORDER BY date DESC, id DESC");

        // A zero limit means "no limit" rather than an empty page.
        if let Some(limit) = query.limit.filter(|limit| *limit > 0) {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut expenses = Vec::new();

        while let Some(row) = rows.next()? {
            expenses.push(parse_expense_row(row)?);
        }

        Ok(expenses)
    }

    fn update_expense(&self, id: ExpenseId, patch: &ExpensePatch) -> RepoResult<()> {
        if !self.expense_exists(id)? {
            return Err(RepoError::NotFound(id));
        }
        if patch.is_empty() {
            return Err(RepoError::NoFieldsProvided);
        }
        patch.validate()?;

        let mut assignments: Vec<&str> = Vec::new();
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(amount) = patch.amount {
            assignments.push("amount = ?");
            bind_values.push(Value::Real(amount));
        }
        if let Some(date) = patch.date {
            assignments.push("date = ?");
            bind_values.push(Value::Text(date.to_string()));
        }
        if let Some(note) = &patch.note {
            assignments.push("note = ?");
            bind_values.push(Value::Text(note.clone()));
        }
        if let Some(category) = &patch.category {
            assignments.push("category = ?");
            bind_values.push(Value::Text(category.clone()));
        }

        let sql = format!(
            "UPDATE expenses SET {} WHERE id = ?;",
            assignments.join(", ")
        );
        bind_values.push(Value::Integer(id));

        let changed = self.conn.execute(&sql, params_from_iter(bind_values))?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_expense(&self, id: ExpenseId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM expenses WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn summarize(&self, query: &SummaryQuery) -> RepoResult<SummaryReport> {
        let mut where_clause = String::new();
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(month) = &query.month {
            where_clause.push_str(" WHERE date LIKE ?");
            bind_values.push(Value::Text(format!("{}%", month.date_prefix())));
        }

        let total: f64 = self.conn.query_row(
            &format!("SELECT COALESCE(SUM(amount), 0.0) FROM expenses{where_clause};"),
            params_from_iter(bind_values.clone()),
            |row| row.get(0),
        )?;

        let by_category = if query.group_by_category {
            let sql = format!(
                "SELECT category, SUM(amount) AS subtotal FROM expenses{where_clause} \
                 GROUP BY category ORDER BY subtotal DESC;"
            );
            let mut stmt = self.conn.prepare(&sql)?;
            let mut rows = stmt.query(params_from_iter(bind_values))?;
            let mut totals = Vec::new();

            while let Some(row) = rows.next()? {
                totals.push(CategoryTotal {
                    category: row
                        .get::<_, Option<String>>(0)?
                        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
                    total: row.get(1)?,
                });
            }

            Some(totals)
        } else {
            None
        };

        Ok(SummaryReport { total, by_category })
    }
}

fn parse_expense_row(row: &Row<'_>) -> RepoResult<Expense> {
    let date_text: String = row.get("date")?;
    let date = CanonicalDate::from_canonical(&date_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid date value `{date_text}` in expenses.date"))
    })?;

    Ok(Expense {
        id: row.get("id")?,
        amount: row.get("amount")?,
        category: row
            .get::<_, Option<String>>("category")?
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        note: row.get::<_, Option<String>>("note")?.unwrap_or_default(),
        date,
    })
}
