//! Cap-relief advisories.
//!
//! Hint generation is a pluggable collaborator, not part of validation:
//! the engine consults an advisor, if one is wired in, after a
//! cap-insufficient rejection, and the move is rejected the same way with
//! or without one.

use gridcap_capmath::release_impact;
use gridcap_core::{LeagueYear, Money};
use gridcap_roster::TeamSnapshot;

/// Suggests how a team could free cap space.
pub trait CapAdvisor {
    /// A one-line hint for covering `shortfall`, if the advisor has one.
    fn advise(&self, snapshot: &TeamSnapshot, season: LeagueYear, shortfall: Money)
        -> Option<String>;
}

/// Suggests the single release that frees the most cap space, preferring
/// the cheapest one that covers the shortfall outright.
#[derive(Debug, Default)]
pub struct ReleaseAdvisor;

impl ReleaseAdvisor {
    pub fn new() -> Self {
        Self
    }
}

impl CapAdvisor for ReleaseAdvisor {
    fn advise(
        &self,
        snapshot: &TeamSnapshot,
        season: LeagueYear,
        shortfall: Money,
    ) -> Option<String> {
        let mut candidates: Vec<(Money, String)> = snapshot
            .active_players()
            .filter_map(|player| {
                let contract = snapshot.contract(player.id)?;
                let impact = release_impact(contract, season, false).ok()?;
                if impact.savings > Money::ZERO {
                    Some((impact.savings, player.full_name()))
                } else {
                    None
                }
            })
            .collect();
        if candidates.is_empty() {
            return None;
        }

        // Cheapest release that covers the shortfall, else the biggest.
        candidates.sort_by_key(|(savings, _)| *savings);
        let (savings, name) = candidates
            .iter()
            .find(|(savings, _)| *savings >= shortfall)
            .unwrap_or_else(|| candidates.last().expect("non-empty"));

        Some(format!("Free {} by releasing {}.", savings, name))
    }
}
