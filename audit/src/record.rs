//! Transaction records and audit entries.

use chrono::{DateTime, Utc};
use gridcap_capmath::CapImpact;
use gridcap_core::{
    Contract, ContractYear, Money, Player, PlayerId, TeamCode, TransactionId, TransactionKind,
    TransactionStatus,
};
use serde::{Deserialize, Serialize};

use crate::payload::{ReleasePayload, SignPayload, TradePayload};

/// One team's side of a committed transaction. Sign/release moves have one
/// leg; trades have two. Legs live and die with their transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionLeg {
    pub team: TeamCode,
    /// Cap-space change for this team. Meaningful per team, never summed
    /// across teams: trades balance in players, not dollars.
    pub cap_delta: Money,
    pub affected_players: Vec<PlayerId>,
    pub roster_count_before: usize,
    pub roster_count_after: usize,
}

/// Snapshot taken before a release so undo can restore the player without
/// re-reading contract rows that may have changed since.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseUndo {
    /// The player exactly as they were, prior status included.
    pub player: Player,
    pub contract: Option<Contract>,
}

/// Frozen record of a signing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignAudit {
    pub payload: SignPayload,
    /// The id the new (or re-signed) player ended up with.
    pub player_id: PlayerId,
    /// The season rows the signing booked, as booked.
    pub contract_years: Vec<ContractYear>,
    pub first_year_cap_hit: Money,
}

/// Frozen record of a release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseAudit {
    pub payload: ReleasePayload,
    /// The cap math exactly as computed at commit time.
    pub impact: CapImpact,
    pub undo: ReleaseUndo,
}

/// One team's frozen numbers inside a trade audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeSideAudit {
    pub team: TeamCode,
    pub cap_delta: Money,
    pub dead_money: Money,
    pub dead_money_future: Money,
    /// Players leaving this team.
    pub players_out: Vec<PlayerId>,
}

/// Frozen record of a trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeAudit {
    pub payload: TradePayload,
    pub proposing: TradeSideAudit,
    pub partner: TradeSideAudit,
}

/// The audit attached 1:1 to every committed transaction: the exact input
/// payload and the exact computed deltas, as a closed set of typed
/// variants keyed by transaction kind. Replaying or undoing a transaction
/// reads this record, never the live contract rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditEntry {
    Sign(SignAudit),
    Release(ReleaseAudit),
    Trade(TradeAudit),
}

impl AuditEntry {
    pub fn kind(&self) -> TransactionKind {
        match self {
            AuditEntry::Sign(_) => TransactionKind::Sign,
            AuditEntry::Release(_) => TransactionKind::Release,
            AuditEntry::Trade(_) => TransactionKind::Trade,
        }
    }
}

/// A committed transaction: the top-level record, its legs, and its audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: TransactionId,
    pub team: TeamCode,
    pub kind: TransactionKind,
    pub status: TransactionStatus,
    /// Cap delta for the proposing team.
    pub cap_delta: Money,
    pub cap_space_after: Money,
    pub notes: Vec<String>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub executed_at: DateTime<Utc>,
    pub legs: Vec<TransactionLeg>,
    pub audit: AuditEntry,
}

/// Everything the ledger needs to mint a committed record; the ledger
/// assigns the id and the committed status.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub team: TeamCode,
    pub kind: TransactionKind,
    pub cap_delta: Money,
    pub cap_space_after: Money,
    pub notes: Vec<String>,
    pub created_by: Option<String>,
    pub executed_at: DateTime<Utc>,
    pub legs: Vec<TransactionLeg>,
    pub audit: AuditEntry,
}
