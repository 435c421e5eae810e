//! Roster store error types.

use gridcap_core::{PlayerId, TeamCode};
use thiserror::Error;

/// Errors from the league state store.
#[derive(Debug, Error)]
pub enum RosterError {
    /// Team not found.
    #[error("team not found: {0}")]
    TeamNotFound(TeamCode),

    /// Player not found.
    #[error("player not found: {0}")]
    PlayerNotFound(PlayerId),

    /// A player id was reused.
    #[error("player already exists: {0}")]
    PlayerExists(PlayerId),

    /// The caller's snapshot is stale: another write won the race.
    #[error("version conflict on {team}: expected v{expected}, found v{found}")]
    VersionConflict {
        team: TeamCode,
        expected: u64,
        found: u64,
    },
}

/// Result type for roster operations.
pub type RosterResult<T> = Result<T, RosterError>;
