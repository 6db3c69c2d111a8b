//! Expense domain model.
//!
//! # Responsibility
//! - Define the canonical expense record and its write-side inputs.
//! - Enforce the positive-amount invariant before persistence.
//!
//! # Invariants
//! - `id` is store-assigned and never reused within one database file.
//! - `amount` is finite and strictly positive on every write path.
//! - `date` is always the canonical `YYYY-MM-DD` form.

use crate::model::date::CanonicalDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned row identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ExpenseId = i64;

/// Category applied when the caller omits one or passes an empty label.
pub const DEFAULT_CATEGORY: &str = "uncategorized";

/// Validation error for expense write inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExpenseValidationError {
    /// Amount is zero, negative, or not a finite number.
    NonPositiveAmount(f64),
}

impl Display for ExpenseValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "amount must be positive, got {amount}")
            }
        }
    }
}

impl Error for ExpenseValidationError {}

/// Persisted expense row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub amount: f64,
    pub category: String,
    pub note: String,
    pub date: CanonicalDate,
}

/// Write model for the add operation; `id` does not exist yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub amount: f64,
    pub category: String,
    pub note: String,
    pub date: CanonicalDate,
}

impl NewExpense {
    /// Creates a new expense input with the default category and empty note.
    pub fn new(amount: f64, date: CanonicalDate) -> Self {
        Self {
            amount,
            category: DEFAULT_CATEGORY.to_string(),
            note: String::new(),
            date,
        }
    }

    /// Checks the positive-amount invariant.
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        validate_amount(self.amount)
    }
}

/// Partial-update input for the update operation.
///
/// `None` fields retain the persisted value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpensePatch {
    pub amount: Option<f64>,
    pub date: Option<CanonicalDate>,
    pub note: Option<String>,
    pub category: Option<String>,
}

impl ExpensePatch {
    /// Returns whether the patch carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.date.is_none()
            && self.note.is_none()
            && self.category.is_none()
    }

    /// Checks the positive-amount invariant when an amount is supplied.
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        match self.amount {
            Some(amount) => validate_amount(amount),
            None => Ok(()),
        }
    }
}

fn validate_amount(amount: f64) -> Result<(), ExpenseValidationError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ExpenseValidationError::NonPositiveAmount(amount));
    }
    Ok(())
}
