//! Engine error types.
//!
//! Validation rejections carry the full preview shape so callers render a
//! rejected commit exactly like a rejected preview; everything else is a
//! hard failure.

use gridcap_capmath::CapMathError;
use gridcap_core::{TeamCode, TransactionId, TransactionKind};
use thiserror::Error;

use crate::preview::PreviewResult;

fn rejection_summary(preview: &PreviewResult) -> String {
    preview
        .notes
        .first()
        .cloned()
        .unwrap_or_else(|| "validation failed".to_string())
}

/// Engine errors.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Missing or malformed move fields. Surfaced verbatim to the caller.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// Unknown team code.
    #[error("team not found: {0}")]
    TeamNotFound(TeamCode),

    /// The move failed validation; the payload carries the same structured
    /// result a rejected preview returns.
    #[error("move rejected: {}", rejection_summary(.0))]
    Rejected(Box<PreviewResult>),

    /// The persistence layer refused the commit. Nothing was applied.
    #[error("commit failed: {0}")]
    CommitFailed(String),

    /// Only releases can be undone.
    #[error("undo not supported for {0} transactions")]
    UnsupportedUndo(TransactionKind),

    /// No transaction with this id.
    #[error("transaction not found: {0}")]
    NotFound(TransactionId),

    /// The transaction was already undone.
    #[error("transaction already undone: {0}")]
    AlreadyUndone(TransactionId),

    /// Malformed cap-math input: a caller/data bug, never retried.
    #[error(transparent)]
    CapMath(#[from] CapMathError),
}

impl EngineError {
    pub fn invalid_payload(reason: impl Into<String>) -> Self {
        Self::InvalidPayload(reason.into())
    }

    /// The rejection preview, when this error is a validation rejection.
    pub fn rejection(&self) -> Option<&PreviewResult> {
        match self {
            EngineError::Rejected(preview) => Some(preview),
            _ => None,
        }
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
