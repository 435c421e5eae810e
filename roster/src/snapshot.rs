//! Immutable team snapshots.

use std::collections::HashMap;

use gridcap_core::{Contract, Money, Player, PlayerId, TeamCode};

/// A point-in-time copy of one team's roster and cap state, tagged with
/// the version the copy was taken at. Previews run entirely against
/// snapshots; commits present the version back to the store as the
/// compare half of compare-and-write.
#[derive(Debug, Clone)]
pub struct TeamSnapshot {
    pub code: TeamCode,
    pub version: u64,
    /// Every player currently assigned to the team, any status.
    pub players: Vec<Player>,
    pub contracts: HashMap<PlayerId, Contract>,
    /// Dead money charged to the team for the current league year.
    pub dead_money: Money,
    /// Dead money already deferred to the next league year.
    pub dead_money_future: Money,
}

impl TeamSnapshot {
    /// Players counting toward the roster limit and the cap total.
    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players
            .iter()
            .filter(|p| p.status.counts_toward_roster())
    }

    /// Active roster count.
    pub fn roster_count(&self) -> usize {
        self.active_players().count()
    }

    /// Look up a player on this team.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Look up a player's contract.
    pub fn contract(&self, id: PlayerId) -> Option<&Contract> {
        self.contracts.get(&id)
    }
}
