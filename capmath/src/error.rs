//! Cap-math error types.
//!
//! These are caller/data bugs, never expected outcomes: a malformed
//! schedule or a negative dollar amount propagates immediately without any
//! recovery attempt.

use thiserror::Error;

/// Cap-math errors.
#[derive(Debug, Error)]
pub enum CapMathError {
    /// Proration schedule outside the allowed 1..=5 year range.
    #[error("invalid proration schedule: {years} years (must be 1-5)")]
    InvalidProrationSchedule { years: u8 },

    /// A contract-year row with malformed components.
    #[error("invalid contract year: {reason}")]
    InvalidContractYear { reason: String },
}

impl CapMathError {
    pub fn invalid_contract_year(reason: impl Into<String>) -> Self {
        Self::InvalidContractYear {
            reason: reason.into(),
        }
    }
}

/// Result type for cap-math operations.
pub type CapMathResult<T> = Result<T, CapMathError>;
