//! Shared fixtures for gridcap integration scenarios.

use chrono::NaiveDate;
use gridcap_audit::{
    MovePayload, ReleasePayload, SignPayload, SignTarget, TradePayload, TransactionLedger,
};
use gridcap_capmath::SigningTerms;
use gridcap_core::{
    Contract, ContractYear, LeagueConfig, LeagueYear, Money, Player, PlayerId, TeamCode,
};
use gridcap_engine::TransactionEngine;
use gridcap_roster::MemoryStore;

/// The cap year every fixture runs in.
pub const SEASON: u16 = 2025;

/// A seeded league plus the ledger and config an engine needs.
pub struct LeagueFixture {
    pub store: MemoryStore,
    pub ledger: TransactionLedger,
    pub config: LeagueConfig,
}

impl LeagueFixture {
    /// Two empty clubs (ARI, SEA) under the default cap.
    pub fn new() -> Self {
        let mut store = MemoryStore::new();
        let state = store.state_mut();
        state.add_team(TeamCode::new("ARI"), "Arizona Cardinals");
        state.add_team(TeamCode::new("SEA"), "Seattle Seahawks");
        Self {
            store,
            ledger: TransactionLedger::new(),
            config: LeagueConfig::new(LeagueYear::new(SEASON)),
        }
    }

    /// Override the current-year cap limit.
    pub fn with_cap_limit(mut self, dollars: i64) -> Self {
        self.config = self.config.with_cap_limit(Money::from_dollars(dollars));
        self
    }

    /// Seed a contracted player: flat base per season plus even proration.
    pub fn add_contracted_player(
        &mut self,
        team: &str,
        id: u64,
        name: &str,
        position: &str,
        base: i64,
        proration: i64,
        seasons: u16,
    ) -> PlayerId {
        let player_id = PlayerId::new(id);
        let years: Vec<ContractYear> = (0..seasons)
            .map(|offset| ContractYear {
                season: LeagueYear::new(SEASON + offset),
                base_salary: Money::from_dollars(base),
                signing_proration: Money::from_dollars(proration),
                roster_bonus: Money::ZERO,
                workout_bonus: Money::ZERO,
                guaranteed: Money::ZERO,
                cash: Money::from_dollars(base),
                is_void_year: false,
            })
            .collect();
        let contract = Contract::new(
            player_id,
            Money::from_dollars((base + proration) * i64::from(seasons)),
            Money::from_dollars(base + proration),
            Money::ZERO,
            years,
        );
        let (first, last) = Player::split_name(name);
        self.store
            .state_mut()
            .seed_player(
                Player::new(player_id, TeamCode::new(team), first, last, position, roster_date()),
                Some(contract),
            )
            .expect("fixture seed");
        player_id
    }

    /// Fill a club with minimum-salary camp bodies up to `count` players.
    pub fn fill_roster(&mut self, team: &str, starting_id: u64, count: u64) {
        for i in 0..count {
            let id = PlayerId::new(starting_id + i);
            self.store
                .state_mut()
                .seed_player(
                    Player::new(
                        id,
                        TeamCode::new(team),
                        "Camp",
                        format!("Body{}", starting_id + i),
                        "TE",
                        roster_date(),
                    ),
                    None,
                )
                .expect("fixture seed");
        }
    }

    /// An engine borrowing this fixture's store, ledger, and config.
    pub fn engine(&mut self) -> TransactionEngine<'_, MemoryStore> {
        TransactionEngine::new(&mut self.store, &mut self.ledger, &self.config)
    }
}

impl Default for LeagueFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// The fixture's standard roster date.
pub fn roster_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 12).expect("valid date")
}

/// A release payload.
pub fn release(player: u64, post_june_1: bool) -> MovePayload {
    MovePayload::Release(ReleasePayload {
        player_id: PlayerId::new(player),
        post_june_1,
    })
}

/// A signing payload for a brand-new player.
pub fn sign_new(name: &str, position: &str, terms: SigningTerms) -> MovePayload {
    MovePayload::Sign(SignPayload {
        target: SignTarget::New {
            full_name: name.to_string(),
            position: position.to_string(),
        },
        terms,
    })
}

/// A trade payload between the fixture's two clubs.
pub fn trade(send: Vec<u64>, partner: &str, receive: Vec<u64>) -> MovePayload {
    MovePayload::Trade(TradePayload {
        player_ids: send.into_iter().map(PlayerId::new).collect(),
        partner_team_code: TeamCode::new(partner),
        partner_player_ids: receive.into_iter().map(PlayerId::new).collect(),
        pick_compensation: Vec::new(),
        post_june_1: false,
    })
}
