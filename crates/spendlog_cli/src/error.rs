//! User-facing CLI error wrapper.
//!
//! Collects every failure a command can produce so the dispatcher has one
//! uniform rendering path.

use spendlog_core::db::DbError;
use spendlog_core::{InvalidDate, InvalidMonth, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Any failure a command can surface to the dispatcher.
#[derive(Debug)]
pub enum CliError {
    Db(DbError),
    Repo(RepoError),
    Date(InvalidDate),
    Month(InvalidMonth),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Date(err) => write!(f, "{err}"),
            Self::Month(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Date(err) => Some(err),
            Self::Month(err) => Some(err),
        }
    }
}

impl From<DbError> for CliError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RepoError> for CliError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<InvalidDate> for CliError {
    fn from(value: InvalidDate) -> Self {
        Self::Date(value)
    }
}

impl From<InvalidMonth> for CliError {
    fn from(value: InvalidMonth) -> Self {
        Self::Month(value)
    }
}
