//! Authoritative league state.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use gridcap_core::{Contract, Money, Player, PlayerId, TeamCode};

use crate::change::StateChange;
use crate::error::{RosterError, RosterResult};
use crate::snapshot::TeamSnapshot;

/// Per-team bookkeeping.
#[derive(Debug, Clone)]
struct TeamEntry {
    display_name: String,
    version: u64,
    dead_money: Money,
    dead_money_future: Money,
}

/// The authoritative roster/cap state for every club, with a per-team
/// version counter. All writes go through [`LeagueState::apply`], which
/// validates the entire batch before touching anything.
#[derive(Debug, Default)]
pub struct LeagueState {
    teams: BTreeMap<TeamCode, TeamEntry>,
    players: HashMap<PlayerId, Player>,
    contracts: HashMap<PlayerId, Contract>,
    next_player_id: u64,
}

impl LeagueState {
    /// Create an empty league.
    pub fn new() -> Self {
        Self {
            teams: BTreeMap::new(),
            players: HashMap::new(),
            contracts: HashMap::new(),
            next_player_id: 1,
        }
    }

    /// Register a club.
    pub fn add_team(&mut self, code: TeamCode, display_name: impl Into<String>) {
        self.teams.insert(
            code,
            TeamEntry {
                display_name: display_name.into(),
                version: 1,
                dead_money: Money::ZERO,
                dead_money_future: Money::ZERO,
            },
        );
    }

    /// All registered team codes, in order.
    pub fn team_codes(&self) -> Vec<TeamCode> {
        self.teams.keys().cloned().collect()
    }

    /// A club's display name.
    pub fn display_name(&self, code: &TeamCode) -> RosterResult<&str> {
        self.teams
            .get(code)
            .map(|entry| entry.display_name.as_str())
            .ok_or_else(|| RosterError::TeamNotFound(code.clone()))
    }

    /// Allocate an id for a player about to be added.
    pub fn allocate_player_id(&mut self) -> PlayerId {
        let id = PlayerId::new(self.next_player_id);
        self.next_player_id += 1;
        id
    }

    /// Seed a player (and optionally a contract) without bumping versions.
    /// For league setup only; transactional writes go through `apply`.
    pub fn seed_player(&mut self, player: Player, contract: Option<Contract>) -> RosterResult<()> {
        if !self.teams.contains_key(&player.team) {
            return Err(RosterError::TeamNotFound(player.team.clone()));
        }
        if self.players.contains_key(&player.id) {
            return Err(RosterError::PlayerExists(player.id));
        }
        self.next_player_id = self.next_player_id.max(player.id.raw() + 1);
        if let Some(contract) = contract {
            self.contracts.insert(player.id, contract);
        }
        self.players.insert(player.id, player);
        Ok(())
    }

    /// Take a snapshot of one team's roster and cap state.
    pub fn snapshot(&self, code: &TeamCode) -> RosterResult<TeamSnapshot> {
        let entry = self
            .teams
            .get(code)
            .ok_or_else(|| RosterError::TeamNotFound(code.clone()))?;

        let mut players: Vec<Player> = self
            .players
            .values()
            .filter(|p| &p.team == code)
            .cloned()
            .collect();
        players.sort_by_key(|p| p.id);

        let contracts = players
            .iter()
            .filter_map(|p| self.contracts.get(&p.id).map(|c| (p.id, c.clone())))
            .collect();

        Ok(TeamSnapshot {
            code: code.clone(),
            version: entry.version,
            players,
            contracts,
            dead_money: entry.dead_money,
            dead_money_future: entry.dead_money_future,
        })
    }

    /// Current version for a team.
    pub fn version(&self, code: &TeamCode) -> RosterResult<u64> {
        self.teams
            .get(code)
            .map(|entry| entry.version)
            .ok_or_else(|| RosterError::TeamNotFound(code.clone()))
    }

    /// Apply a batch of changes if every expected version still holds.
    ///
    /// The whole batch is validated first; on any failure nothing is
    /// applied. On success every team touched by the batch has its
    /// version bumped once.
    pub fn apply(
        &mut self,
        expected: &[(TeamCode, u64)],
        changes: &[StateChange],
    ) -> RosterResult<()> {
        // Compare phase.
        for (team, version) in expected {
            let entry = self
                .teams
                .get(team)
                .ok_or_else(|| RosterError::TeamNotFound(team.clone()))?;
            if entry.version != *version {
                return Err(RosterError::VersionConflict {
                    team: team.clone(),
                    expected: *version,
                    found: entry.version,
                });
            }
        }

        // Validate phase: every change must be applicable.
        for change in changes {
            match change {
                StateChange::SetPlayerStatus { player_id, .. }
                | StateChange::StripProration { player_id }
                | StateChange::SetContract { player_id, .. } => {
                    if !self.players.contains_key(player_id) {
                        return Err(RosterError::PlayerNotFound(*player_id));
                    }
                }
                StateChange::AssignTeam { player_id, team } => {
                    if !self.players.contains_key(player_id) {
                        return Err(RosterError::PlayerNotFound(*player_id));
                    }
                    if !self.teams.contains_key(team) {
                        return Err(RosterError::TeamNotFound(team.clone()));
                    }
                }
                StateChange::AddPlayer { player, .. } => {
                    if self.players.contains_key(&player.id) {
                        return Err(RosterError::PlayerExists(player.id));
                    }
                    if !self.teams.contains_key(&player.team) {
                        return Err(RosterError::TeamNotFound(player.team.clone()));
                    }
                }
                StateChange::ChargeDeadMoney { team, .. } => {
                    if !self.teams.contains_key(team) {
                        return Err(RosterError::TeamNotFound(team.clone()));
                    }
                }
            }
        }

        // Write phase: cannot fail after validation.
        let mut touched: BTreeSet<TeamCode> = BTreeSet::new();
        for change in changes {
            match change {
                StateChange::SetPlayerStatus { player_id, status } => {
                    let player = self.players.get_mut(player_id).expect("validated");
                    touched.insert(player.team.clone());
                    player.status = *status;
                }
                StateChange::AssignTeam { player_id, team } => {
                    let player = self.players.get_mut(player_id).expect("validated");
                    touched.insert(player.team.clone());
                    touched.insert(team.clone());
                    player.team = team.clone();
                }
                StateChange::AddPlayer { player, contract } => {
                    touched.insert(player.team.clone());
                    self.next_player_id = self.next_player_id.max(player.id.raw() + 1);
                    if let Some(contract) = contract {
                        self.contracts.insert(player.id, contract.clone());
                    }
                    self.players.insert(player.id, player.clone());
                }
                StateChange::SetContract {
                    player_id,
                    contract,
                } => {
                    let player = self.players.get(player_id).expect("validated");
                    touched.insert(player.team.clone());
                    self.contracts.insert(*player_id, contract.clone());
                }
                StateChange::ChargeDeadMoney {
                    team,
                    current,
                    future,
                } => {
                    let entry = self.teams.get_mut(team).expect("validated");
                    touched.insert(team.clone());
                    entry.dead_money += *current;
                    entry.dead_money_future += *future;
                }
                StateChange::StripProration { player_id } => {
                    if let Some(player) = self.players.get(player_id) {
                        touched.insert(player.team.clone());
                    }
                    if let Some(contract) = self.contracts.get_mut(player_id) {
                        for year in &mut contract.years {
                            year.signing_proration = Money::ZERO;
                        }
                    }
                }
            }
        }
        for team in touched {
            if let Some(entry) = self.teams.get_mut(&team) {
                entry.version += 1;
            }
        }

        Ok(())
    }
}
