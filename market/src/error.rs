//! Market error types.

use gridcap_engine::EngineError;
use thiserror::Error;

/// Market errors.
#[derive(Debug, Error)]
pub enum MarketError {
    /// No free-agent profile with this id on the board.
    #[error("unknown free agent: {0}")]
    UnknownFreeAgent(String),

    /// Board file could not be read.
    #[error("board io error: {0}")]
    Io(#[from] std::io::Error),

    /// Board file could not be parsed.
    #[error("board format error: {0}")]
    Format(#[from] serde_json::Error),

    /// The underlying engine refused the operation.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Result type for market operations.
pub type MarketResult<T> = Result<T, MarketError>;
