//! Error types for the transaction history engine.

use crate::money::Money;
use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, HistoryError>;

/// Errors that can occur while loading, querying or exporting transactions.
#[derive(Error, Debug)]
pub enum HistoryError {
    /// Failed to open, read or write a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading or writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A source row that cannot become a valid transaction
    #[error("Invalid transaction at row {row}: {message}")]
    InvalidRecord { row: usize, message: String },

    /// Transaction amounts are magnitudes and cannot be negative
    #[error("Transaction {id} has negative amount {amount}")]
    NegativeAmount { id: String, amount: Money },

    /// Transaction ID already loaded
    #[error("Duplicate transaction ID {id} at row {row}")]
    DuplicateId { id: String, row: usize },

    /// Export settings that would produce unreadable output
    #[error("Invalid export settings: {0}")]
    InvalidExportConfig(String),

    /// Export requested while no transaction is visible
    #[error("No transactions to export")]
    NothingToExport,
}
