//! Gridcap Audit
//!
//! Transaction records and the append-only ledger.
//!
//! Responsibilities:
//! - Typed move payloads (the exact caller input, preserved verbatim)
//! - Audit entries freezing the computed deltas per transaction kind
//! - Append-only memory and file ledgers with undo as a status transition

mod error;
mod ledger;
mod payload;
mod record;

pub use error::{LedgerError, LedgerResult};
pub use ledger::{FileLedger, TransactionLedger};
pub use payload::{MovePayload, ReleasePayload, SignPayload, SignTarget, TradePayload};
pub use record::{
    AuditEntry, ReleaseAudit, ReleaseUndo, SignAudit, TradeAudit, TradeSideAudit,
    TransactionDraft, TransactionLeg, TransactionRecord,
};
