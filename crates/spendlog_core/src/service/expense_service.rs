//! Expense use-case service.
//!
//! # Responsibility
//! - Provide stable operation entry points for CLI callers.
//! - Apply input defaults before persistence.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::date::CanonicalDate;
use crate::model::expense::{Expense, ExpenseId, ExpensePatch, NewExpense};
use crate::repo::expense_repo::{
    ExpenseListQuery, ExpenseRepository, RepoResult, SummaryQuery, SummaryReport,
};

/// Request model for recording an expense.
#[derive(Debug, Clone, PartialEq)]
pub struct AddExpenseRequest {
    pub amount: f64,
    pub date: CanonicalDate,
    /// Stored as an empty string when omitted.
    pub note: Option<String>,
    /// Falls back to the default category when omitted or empty.
    pub category: Option<String>,
}

/// Use-case service wrapper for expense operations.
pub struct ExpenseService<R: ExpenseRepository> {
    repo: R,
}

impl<R: ExpenseRepository> ExpenseService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Records a new expense and returns the stored row.
    ///
    /// # Contract
    /// - Omitted or empty category becomes the default category.
    /// - Omitted note becomes an empty string.
    /// - Returns the store-assigned id with normalized field values.
    pub fn add_expense(&self, request: AddExpenseRequest) -> RepoResult<Expense> {
        let mut expense = NewExpense::new(request.amount, request.date);
        if let Some(note) = request.note {
            expense.note = note;
        }
        if let Some(category) = request.category.filter(|category| !category.is_empty()) {
            expense.category = category;
        }

        let id = self.repo.insert_expense(&expense)?;
        Ok(Expense {
            id,
            amount: expense.amount,
            category: expense.category,
            note: expense.note,
            date: expense.date,
        })
    }

    /// Gets one expense by id.
    pub fn get_expense(&self, id: ExpenseId) -> RepoResult<Option<Expense>> {
        self.repo.get_expense(id)
    }

    /// Lists expenses using the provided filter options.
    pub fn list_expenses(&self, query: &ExpenseListQuery) -> RepoResult<Vec<Expense>> {
        self.repo.list_expenses(query)
    }

    /// Applies a partial update to an existing expense.
    ///
    /// Returns repository-level not-found or validation errors unchanged.
    pub fn update_expense(&self, id: ExpenseId, patch: &ExpensePatch) -> RepoResult<()> {
        self.repo.update_expense(id, patch)
    }

    /// Deletes an expense by id.
    pub fn delete_expense(&self, id: ExpenseId) -> RepoResult<()> {
        self.repo.delete_expense(id)
    }

    /// Computes totals over the optionally filtered expense set.
    pub fn summarize(&self, query: &SummaryQuery) -> RepoResult<SummaryReport> {
        self.repo.summarize(query)
    }
}
