//! The persistence boundary.
//!
//! The engine never talks to `LeagueState` directly; it goes through
//! `LeagueStore`, whose `apply` is an atomic compare-and-write. A real
//! deployment would back this trait with a database transaction; the
//! in-memory implementation here is the simulator's authority and the
//! reference for tests.

use gridcap_core::{PlayerId, TeamCode};

use crate::change::StateChange;
use crate::error::RosterResult;
use crate::snapshot::TeamSnapshot;
use crate::state::LeagueState;

/// Atomic access to league state.
pub trait LeagueStore {
    /// All registered team codes.
    fn team_codes(&self) -> Vec<TeamCode>;

    /// A club's display name.
    fn display_name(&self, team: &TeamCode) -> RosterResult<String>;

    /// Versioned copy of a team's roster and cap state.
    fn snapshot(&self, team: &TeamCode) -> RosterResult<TeamSnapshot>;

    /// Allocate an id for a player about to be created.
    fn allocate_player_id(&mut self) -> PlayerId;

    /// Apply `changes` atomically, provided every `(team, version)` pair in
    /// `expected` still matches the store. All-or-nothing: on any error no
    /// change is applied.
    fn apply(
        &mut self,
        expected: &[(TeamCode, u64)],
        changes: &[StateChange],
    ) -> RosterResult<()>;
}

/// In-memory store owning the authoritative [`LeagueState`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: LeagueState,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            state: LeagueState::new(),
        }
    }

    /// Wrap an already-seeded state.
    pub fn with_state(state: LeagueState) -> Self {
        Self { state }
    }

    /// Direct access for seeding and assertions.
    pub fn state_mut(&mut self) -> &mut LeagueState {
        &mut self.state
    }
}

impl LeagueStore for MemoryStore {
    fn team_codes(&self) -> Vec<TeamCode> {
        self.state.team_codes()
    }

    fn display_name(&self, team: &TeamCode) -> RosterResult<String> {
        self.state.display_name(team).map(str::to_string)
    }

    fn snapshot(&self, team: &TeamCode) -> RosterResult<TeamSnapshot> {
        self.state.snapshot(team)
    }

    fn allocate_player_id(&mut self) -> PlayerId {
        self.state.allocate_player_id()
    }

    fn apply(
        &mut self,
        expected: &[(TeamCode, u64)],
        changes: &[StateChange],
    ) -> RosterResult<()> {
        self.state.apply(expected, changes)
    }
}
