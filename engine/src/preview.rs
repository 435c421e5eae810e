//! Preview results.

use gridcap_core::{Money, TeamCode, TransactionKind};
use gridcap_rules::Violations;
use serde::{Deserialize, Serialize};

/// The trade counterpart's side of a preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerPreview {
    pub team: TeamCode,
    pub cap_space_before: Money,
    pub cap_space_after: Money,
    pub cap_delta: Money,
    pub dead_money: Money,
    pub dead_money_future: Money,
    pub roster_delta: i64,
    pub roster_count_after: usize,
}

/// The full result of previewing a move: admissibility, cap and roster
/// deltas, and ordered human-readable notes. Previewing the same move
/// against unchanged state returns the same result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewResult {
    pub team: TeamCode,
    pub kind: TransactionKind,
    pub allowed: bool,
    pub cap_limit: Money,
    pub total_cap: Money,
    pub cap_space_before: Money,
    pub cap_space_after: Money,
    /// Cap-space change for the proposing team (positive frees space).
    pub cap_delta: Money,
    /// Dead money charged to the current league year.
    pub dead_money: Money,
    /// Dead money deferred to the next league year.
    pub dead_money_future: Money,
    pub roster_delta: i64,
    pub roster_count_after: usize,
    pub notes: Vec<String>,
    /// Structured reasons behind a rejection, partner-side attributed.
    pub violations: Violations,
    pub partner: Option<PartnerPreview>,
}

impl PreviewResult {
    /// True when the rejection is entirely the trade partner's.
    pub fn partner_rejected(&self) -> bool {
        !self.allowed && self.violations.only_partner()
    }

    /// The primary machine-readable rejection reason: `partner_rejected`
    /// when the move fails only on the counterpart's side, otherwise the
    /// first violation's own code.
    pub fn rejection_code(&self) -> Option<&'static str> {
        if self.allowed {
            return None;
        }
        if self.violations.only_partner() {
            return Some("partner_rejected");
        }
        self.violations.all().first().map(|v| v.kind.code())
    }
}
