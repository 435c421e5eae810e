//! State mutations.
//!
//! The store accepts a closed set of changes so every write path is
//! enumerable, validatable up front, and reversible by appending the
//! opposite change.

use gridcap_core::{Contract, Money, Player, PlayerId, PlayerStatus, TeamCode};

/// A single mutation against league state. Changes are applied in batches
/// through [`crate::LeagueStore::apply`]; a batch lands atomically or not
/// at all.
#[derive(Debug, Clone)]
pub enum StateChange {
    /// Change a player's status (release, restore on undo).
    SetPlayerStatus {
        player_id: PlayerId,
        status: PlayerStatus,
    },

    /// Move a player to another club (trade).
    AssignTeam {
        player_id: PlayerId,
        team: TeamCode,
    },

    /// Add a new player, optionally with a contract (signing).
    AddPlayer {
        player: Player,
        contract: Option<Contract>,
    },

    /// Replace a player's contract (re-signing a player already known to
    /// the league).
    SetContract {
        player_id: PlayerId,
        contract: Contract,
    },

    /// Adjust a team's dead-money balance. Deltas may be negative (undo
    /// reverses a charge by applying its negation).
    ChargeDeadMoney {
        team: TeamCode,
        current: Money,
        future: Money,
    },

    /// Zero out signing-bonus proration on a player's contract rows. Used
    /// when a contract changes hands: the sender keeps the proration as
    /// dead money and the acquirer never inherits it.
    StripProration { player_id: PlayerId },
}
