//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes enforce input validation before persistence.
//! - Repository APIs return semantic errors (`NotFound`, `NoFieldsProvided`)
//!   in addition to DB transport errors.

pub mod expense_repo;
