//! Gridcap Engine
//!
//! Preview/commit/undo orchestration for front-office moves.
//!
//! Responsibilities:
//! - Plan moves against versioned snapshots (cap math + rule validation)
//! - Commit state changes and the ledger record as one atomic unit
//! - Undo releases from the audit record alone
//! - Batch previews that thread hypothetical state through a move list

mod advisor;
mod engine;
mod error;
mod parse;
mod preview;

pub use advisor::{CapAdvisor, ReleaseAdvisor};
pub use engine::TransactionEngine;
pub use error::{EngineError, EngineResult};
pub use parse::parse_payload;
pub use preview::{PartnerPreview, PreviewResult};

// Payload types are part of the engine's surface; they live with the audit
// schema so committed records can store them verbatim.
pub use gridcap_audit::{
    MovePayload, ReleasePayload, SignPayload, SignTarget, TradePayload, TransactionRecord,
};
pub use gridcap_capmath::SigningTerms;
