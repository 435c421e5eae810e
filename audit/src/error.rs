//! Ledger error types.

use gridcap_core::TransactionId;
use thiserror::Error;

/// Ledger errors.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// No transaction with this id.
    #[error("transaction not found: {0}")]
    NotFound(TransactionId),

    /// The transaction was already undone.
    #[error("transaction already undone: {0}")]
    AlreadyUndone(TransactionId),

    /// A committed transaction must carry at least one leg.
    #[error("transaction has no legs")]
    NoLegs,

    /// File ledger I/O failure.
    #[error("ledger io error: {0}")]
    Io(#[from] std::io::Error),

    /// A ledger line that does not parse.
    #[error("ledger format error: {0}")]
    Format(#[from] serde_json::Error),
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
