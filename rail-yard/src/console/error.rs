//! Console error types.

use crate::domain::YardError;

/// Errors from parsing or running a console command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// The yard rejected the operation
    #[error(transparent)]
    Yard(#[from] YardError),

    /// No command with that name
    #[error("unknown command '{0}' (type 'help' for a list)")]
    Unknown(String),

    /// Wrong number of arguments
    #[error("usage: {usage}")]
    Usage { usage: String },

    /// An argument could not be parsed
    #[error("invalid {name}: '{value}' is not a whole number")]
    BadNumber { name: &'static str, value: String },

    /// Failed to serialize the yard report
    #[error("report error: {0}")]
    Report(#[from] serde_json::Error),
}
