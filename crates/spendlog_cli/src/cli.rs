//! Command-line argument surface.
//!
//! Raw date and month strings are validated in command handlers rather than
//! by the argument parser, so malformed values flow through the uniform
//! `Error:` reporting path instead of a usage error.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Personal expense tracker over a local SQLite store.
#[derive(Debug, Parser)]
#[command(name = "spendlog", version, about = "Personal expense tracker")]
pub struct Cli {
    /// Path of the SQLite database file.
    #[arg(
        long,
        global = true,
        env = "SPENDLOG_DB",
        default_value = "expenses.db",
        value_name = "PATH"
    )]
    pub db: PathBuf,

    /// Exit with a non-zero status when a command fails.
    #[arg(long, global = true)]
    pub strict_exit: bool,

    /// Directory for rolling log files; logging stays disabled when unset.
    #[arg(long, global = true, env = "SPENDLOG_LOG_DIR", value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log verbosity: trace|debug|info|warn|error.
    #[arg(long, global = true, env = "SPENDLOG_LOG_LEVEL", value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add an expense.
    Add {
        /// Amount spent; must be positive.
        #[arg(long)]
        amount: f64,
        /// Expense date, YYYY-MM-DD or DD-MM-YYYY.
        #[arg(long)]
        date: String,
        /// Free-form note.
        #[arg(long)]
        note: Option<String>,
        /// Category label.
        #[arg(long)]
        category: Option<String>,
    },
    /// View expenses, newest first.
    View {
        /// Maximum number of rows to print.
        #[arg(long)]
        limit: Option<u32>,
        /// Exact category match.
        #[arg(long)]
        category: Option<String>,
        /// Start date (inclusive), YYYY-MM-DD or DD-MM-YYYY.
        #[arg(long)]
        start: Option<String>,
        /// End date (inclusive), YYYY-MM-DD or DD-MM-YYYY.
        #[arg(long)]
        end: Option<String>,
    },
    /// Update an expense by id.
    Update {
        /// Target expense id.
        id: i64,
        /// New amount; must be positive.
        #[arg(long)]
        amount: Option<f64>,
        /// New date, YYYY-MM-DD or DD-MM-YYYY.
        #[arg(long)]
        date: Option<String>,
        /// New note.
        #[arg(long)]
        note: Option<String>,
        /// New category label.
        #[arg(long)]
        category: Option<String>,
    },
    /// Delete an expense by id.
    Delete {
        /// Target expense id.
        id: i64,
    },
    /// Print spending totals.
    Summary {
        /// Grouping mode for subtotals.
        #[arg(long, value_enum)]
        group_by: Option<GroupBy>,
        /// Month filter, YYYY-MM or MM-YYYY.
        #[arg(long)]
        month: Option<String>,
    },
}

impl Command {
    /// Stable command name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::View { .. } => "view",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
            Self::Summary { .. } => "summary",
        }
    }
}

/// Recognized grouping modes for `summary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GroupBy {
    Category,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, GroupBy};
    use clap::{CommandFactory, Parser};

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn add_parses_required_and_optional_flags() {
        let cli = Cli::parse_from([
            "spendlog",
            "add",
            "--amount",
            "12.5",
            "--date",
            "05-03-2024",
            "--category",
            "food",
        ]);

        match cli.command {
            Command::Add {
                amount,
                date,
                note,
                category,
            } => {
                assert_eq!(amount, 12.5);
                assert_eq!(date, "05-03-2024");
                assert_eq!(note, None);
                assert_eq!(category.as_deref(), Some("food"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn add_requires_amount_and_date() {
        assert!(Cli::try_parse_from(["spendlog", "add", "--amount", "5"]).is_err());
        assert!(Cli::try_parse_from(["spendlog", "add", "--date", "2024-03-05"]).is_err());
    }

    #[test]
    fn update_takes_a_positional_id() {
        assert!(Cli::try_parse_from(["spendlog", "update", "--amount", "5"]).is_err());

        let cli = Cli::parse_from(["spendlog", "update", "7", "--note", "cab"]);
        match cli.command {
            Command::Update { id, note, .. } => {
                assert_eq!(id, 7);
                assert_eq!(note.as_deref(), Some("cab"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn summary_group_by_accepts_only_category() {
        let cli = Cli::parse_from(["spendlog", "summary", "--group-by", "category"]);
        match cli.command {
            Command::Summary { group_by, month } => {
                assert_eq!(group_by, Some(GroupBy::Category));
                assert_eq!(month, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }

        assert!(Cli::try_parse_from(["spendlog", "summary", "--group-by", "merchant"]).is_err());
    }

    #[test]
    fn global_flags_are_accepted_after_the_subcommand() {
        let cli = Cli::parse_from(["spendlog", "delete", "3", "--db", "custom.db", "--strict-exit"]);
        assert_eq!(cli.db.to_str(), Some("custom.db"));
        assert!(cli.strict_exit);
        assert_eq!(cli.command.name(), "delete");
    }
}
