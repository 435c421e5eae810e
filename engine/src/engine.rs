//! The transaction engine.
//!
//! Orchestrates preview, commit, and undo over the cap math, the rule
//! checker, the roster store, and the ledger. Preview is side-effect free;
//! commit re-validates against a fresh snapshot and lands its state
//! changes and its ledger record as one all-or-nothing unit keyed on team
//! versions; undo rebuilds the prior state from the audit record alone.

use std::collections::HashMap;

use chrono::Utc;
use tracing::{error, info, warn};

use gridcap_audit::{
    AuditEntry, MovePayload, ReleaseAudit, ReleasePayload, ReleaseUndo, SignAudit, SignPayload,
    SignTarget, TradeAudit, TradePayload, TradeSideAudit, TransactionDraft, TransactionLedger,
    TransactionLeg, TransactionRecord,
};
use gridcap_capmath::{
    acquisition_cap_hit, build_contract_years, contract_cap_hit, release_impact, signing_cap_hit,
    trade_impact, CapImpact,
};
use gridcap_core::{
    Contract, LeagueConfig, Money, Player, PlayerId, PlayerStatus, TeamCode, TransactionId,
    TransactionKind, TransactionStatus,
};
use gridcap_roster::{LeagueStore, RosterError, StateChange, TeamSnapshot};
use gridcap_rules::{LegAssessment, RuleChecker, Verdict, ViolationKind};

use crate::advisor::CapAdvisor;
use crate::error::{EngineError, EngineResult};
use crate::preview::{PartnerPreview, PreviewResult};

/// A team's cap position before a move.
#[derive(Debug, Clone, Copy)]
struct CapPosition {
    cap_limit: Money,
    total_cap: Money,
    cap_space: Money,
}

/// Everything a planned move needs to land: the preview the caller sees,
/// the expected versions, the state changes, and the record pieces.
struct MovePlan {
    preview: PreviewResult,
    expected: Vec<(TeamCode, u64)>,
    changes: Vec<StateChange>,
    legs: Vec<TransactionLeg>,
    audit: AuditEntry,
}

/// The front-office transaction engine.
pub struct TransactionEngine<'a, S: LeagueStore> {
    store: &'a mut S,
    ledger: &'a mut TransactionLedger,
    config: &'a LeagueConfig,
    advisor: Option<&'a dyn CapAdvisor>,
    created_by: Option<String>,
}

impl<'a, S: LeagueStore> TransactionEngine<'a, S> {
    /// Create an engine over a store and a ledger.
    pub fn new(
        store: &'a mut S,
        ledger: &'a mut TransactionLedger,
        config: &'a LeagueConfig,
    ) -> Self {
        Self {
            store,
            ledger,
            config,
            advisor: None,
            created_by: None,
        }
    }

    /// Wire in an optional cap advisor consulted after cap rejections.
    pub fn with_advisor(mut self, advisor: &'a dyn CapAdvisor) -> Self {
        self.advisor = Some(advisor);
        self
    }

    /// Attribute committed transactions to a user.
    pub fn with_created_by(mut self, created_by: impl Into<String>) -> Self {
        self.created_by = Some(created_by.into());
        self
    }

    // ========== Operations ==========

    /// Preview a move against current state. No persistence; previewing
    /// the same move twice against unchanged state returns the same
    /// result.
    pub fn preview(&self, team: &TeamCode, payload: &MovePayload) -> EngineResult<PreviewResult> {
        let (snapshot, partner) = self.snapshots_for(team, payload)?;
        let plan = self.plan_move(payload, &snapshot, partner.as_ref(), None)?;
        Ok(plan.preview)
    }

    /// Preview a sequence of same-team moves, each seeing the hypothetical
    /// effects of the allowed moves before it. Nothing is persisted.
    pub fn preview_batch(
        &self,
        team: &TeamCode,
        payloads: &[MovePayload],
    ) -> EngineResult<Vec<PreviewResult>> {
        let mut scratch: HashMap<TeamCode, TeamSnapshot> = HashMap::new();
        scratch.insert(team.clone(), self.fetch_snapshot(team)?);

        let mut results = Vec::with_capacity(payloads.len());
        for (index, payload) in payloads.iter().enumerate() {
            if let MovePayload::Trade(trade) = payload {
                if trade.partner_team_code == *team {
                    return Err(EngineError::invalid_payload(
                        "a team cannot trade with itself",
                    ));
                }
                if !scratch.contains_key(&trade.partner_team_code) {
                    let partner = self.fetch_snapshot(&trade.partner_team_code)?;
                    scratch.insert(trade.partner_team_code.clone(), partner);
                }
            }

            let snapshot = scratch.get(team).expect("seeded above").clone();
            let partner = match payload {
                MovePayload::Trade(trade) => scratch.get(&trade.partner_team_code).cloned(),
                _ => None,
            };
            // Hypothetical ids for players a batched signing would create.
            let reserved = match payload {
                MovePayload::Sign(sign) if matches!(sign.target, SignTarget::New { .. }) => {
                    Some(PlayerId::new(u64::MAX - index as u64))
                }
                _ => None,
            };

            let plan = self.plan_move(payload, &snapshot, partner.as_ref(), reserved)?;
            if plan.preview.allowed {
                apply_to_scratch(&mut scratch, &plan.changes);
            }
            results.push(plan.preview);
        }
        Ok(results)
    }

    /// Commit a move. Validation reruns against a fresh snapshot - a stale
    /// preview is never trusted - and the state changes plus the ledger
    /// record land atomically or not at all. A concurrent commit that wins
    /// the race surfaces here as a standard rejection, not a corrupted
    /// state.
    pub fn commit(
        &mut self,
        team: &TeamCode,
        payload: &MovePayload,
    ) -> EngineResult<TransactionRecord> {
        let reserved = match payload {
            MovePayload::Sign(sign) if matches!(sign.target, SignTarget::New { .. }) => {
                Some(self.store.allocate_player_id())
            }
            _ => None,
        };

        let mut revalidated = false;
        loop {
            let (snapshot, partner) = self.snapshots_for(team, payload)?;
            let plan = self.plan_move(payload, &snapshot, partner.as_ref(), reserved)?;
            if !plan.preview.allowed {
                warn!(team = %team, kind = %plan.preview.kind, "commit rejected by validation");
                return Err(EngineError::Rejected(Box::new(plan.preview)));
            }

            match self.store.apply(&plan.expected, &plan.changes) {
                Ok(()) => {
                    let draft = TransactionDraft {
                        team: team.clone(),
                        kind: plan.preview.kind,
                        cap_delta: plan.preview.cap_delta,
                        cap_space_after: plan.preview.cap_space_after,
                        notes: plan.preview.notes.clone(),
                        created_by: self.created_by.clone(),
                        executed_at: Utc::now(),
                        legs: plan.legs,
                        audit: plan.audit,
                    };
                    let id = self.ledger.append(draft).map_err(|err| {
                        error!(team = %team, "state applied but ledger append failed: {err}");
                        EngineError::CommitFailed(err.to_string())
                    })?;
                    info!(team = %team, id = %id, kind = %payload.kind(), "transaction committed");
                    return Ok(self.ledger.get(id).expect("just appended").clone());
                }
                // Lost a race: re-read, re-validate once, and either land
                // or surface the standard rejection.
                Err(RosterError::VersionConflict { .. }) if !revalidated => {
                    revalidated = true;
                    continue;
                }
                Err(err) => return Err(EngineError::CommitFailed(err.to_string())),
            }
        }
    }

    /// Undo a committed release. The prior player state and cap charges
    /// are rebuilt from the audit record, never from current contract
    /// rows; the transaction row stays queryable with status `undone`.
    pub fn undo(&mut self, id: TransactionId) -> EngineResult<TransactionRecord> {
        let record = self
            .ledger
            .get(id)
            .ok_or(EngineError::NotFound(id))?
            .clone();
        if record.status == TransactionStatus::Undone {
            return Err(EngineError::AlreadyUndone(id));
        }
        if record.kind != TransactionKind::Release {
            return Err(EngineError::UnsupportedUndo(record.kind));
        }
        let AuditEntry::Release(audit) = &record.audit else {
            return Err(EngineError::UnsupportedUndo(record.kind));
        };

        let mut revalidated = false;
        loop {
            let snapshot = self.fetch_snapshot(&record.team)?;
            let mut changes = vec![StateChange::SetPlayerStatus {
                player_id: audit.undo.player.id,
                status: audit.undo.player.status,
            }];
            if audit.impact.dead_money != Money::ZERO
                || audit.impact.dead_money_future != Money::ZERO
            {
                changes.push(StateChange::ChargeDeadMoney {
                    team: record.team.clone(),
                    current: -audit.impact.dead_money,
                    future: -audit.impact.dead_money_future,
                });
            }

            match self
                .store
                .apply(&[(record.team.clone(), snapshot.version)], &changes)
            {
                Ok(()) => {
                    let undone = self.ledger.mark_undone(id).map_err(|err| {
                        error!(id = %id, "state restored but ledger transition failed: {err}");
                        EngineError::CommitFailed(err.to_string())
                    })?;
                    info!(team = %record.team, id = %id, "release undone");
                    return Ok(undone.clone());
                }
                Err(RosterError::VersionConflict { .. }) if !revalidated => {
                    revalidated = true;
                    continue;
                }
                Err(err) => return Err(EngineError::CommitFailed(err.to_string())),
            }
        }
    }

    /// Committed (and undone) transactions for a team, oldest first.
    pub fn history(&self, team: &TeamCode) -> Vec<TransactionRecord> {
        self.ledger
            .for_team(team)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Look up a single transaction.
    pub fn transaction(&self, id: TransactionId) -> Option<TransactionRecord> {
        self.ledger.get(id).cloned()
    }

    // ========== Planning ==========

    fn snapshots_for(
        &self,
        team: &TeamCode,
        payload: &MovePayload,
    ) -> EngineResult<(TeamSnapshot, Option<TeamSnapshot>)> {
        let snapshot = self.fetch_snapshot(team)?;
        let partner = match payload {
            MovePayload::Trade(trade) => {
                if trade.partner_team_code == *team {
                    return Err(EngineError::invalid_payload(
                        "a team cannot trade with itself",
                    ));
                }
                Some(self.fetch_snapshot(&trade.partner_team_code)?)
            }
            _ => None,
        };
        Ok((snapshot, partner))
    }

    fn fetch_snapshot(&self, team: &TeamCode) -> EngineResult<TeamSnapshot> {
        self.store.snapshot(team).map_err(|err| match err {
            RosterError::TeamNotFound(code) => EngineError::TeamNotFound(code),
            other => EngineError::CommitFailed(other.to_string()),
        })
    }

    fn cap_position(&self, snapshot: &TeamSnapshot) -> CapPosition {
        let player_cap: Money = snapshot
            .active_players()
            .map(|player| contract_cap_hit(snapshot.contract(player.id), self.config.cap_year))
            .sum();
        let total_cap = player_cap + snapshot.dead_money;
        let cap_limit = self.config.cap_limit();
        CapPosition {
            cap_limit,
            total_cap,
            cap_space: cap_limit - total_cap,
        }
    }

    fn plan_move(
        &self,
        payload: &MovePayload,
        snapshot: &TeamSnapshot,
        partner: Option<&TeamSnapshot>,
        reserved: Option<PlayerId>,
    ) -> EngineResult<MovePlan> {
        match payload {
            MovePayload::Release(release) => self.plan_release(snapshot, release),
            MovePayload::Sign(sign) => self.plan_sign(snapshot, sign, reserved),
            MovePayload::Trade(trade) => {
                let partner = partner.expect("trade planning requires a partner snapshot");
                self.plan_trade(snapshot, partner, trade)
            }
        }
    }

    fn plan_release(
        &self,
        snapshot: &TeamSnapshot,
        payload: &ReleasePayload,
    ) -> EngineResult<MovePlan> {
        let player = snapshot.player(payload.player_id).ok_or_else(|| {
            EngineError::invalid_payload(format!(
                "player {} is not on {}",
                payload.player_id, snapshot.code
            ))
        })?;
        let contract = snapshot.contract(payload.player_id);

        let impact = match contract {
            Some(contract) => {
                release_impact(contract, self.config.cap_year, payload.post_june_1)?
            }
            None => CapImpact::zero(),
        };

        let position = self.cap_position(snapshot);
        let cap_space_after = position.cap_space + impact.savings;
        let roster_before = snapshot.roster_count();
        let roster_after =
            roster_before - usize::from(player.status.counts_toward_roster());

        let assessment = LegAssessment::proposing(snapshot.code.clone())
            .with_cap_space_after(cap_space_after)
            .requires_cap_space(false)
            .with_roster_count_after(roster_after)
            .with_subject(player.id, player.full_name(), player.status);
        let mut verdict = RuleChecker::new(self.config).validate(&[assessment]);

        if impact.is_underwater() {
            verdict.note(format!(
                "Releasing {} provides no cap relief ({} savings).",
                player.full_name(),
                impact.savings
            ));
        } else {
            verdict.note(format!(
                "Releasing {} saves {} against the cap.",
                player.full_name(),
                impact.savings
            ));
        }
        verdict.note(format!("Dead money this year: {}", impact.dead_money));
        if impact.dead_money_future != Money::ZERO {
            verdict.note(format!(
                "Dead money next year: {}",
                impact.dead_money_future
            ));
        }
        if cap_space_after.is_negative() {
            verdict.note("Team would remain over the cap after this move.");
        }

        let mut changes = vec![StateChange::SetPlayerStatus {
            player_id: player.id,
            status: PlayerStatus::Released,
        }];
        if impact.dead_money != Money::ZERO || impact.dead_money_future != Money::ZERO {
            changes.push(StateChange::ChargeDeadMoney {
                team: snapshot.code.clone(),
                current: impact.dead_money,
                future: impact.dead_money_future,
            });
        }

        let legs = vec![TransactionLeg {
            team: snapshot.code.clone(),
            cap_delta: impact.savings,
            affected_players: vec![player.id],
            roster_count_before: roster_before,
            roster_count_after: roster_after,
        }];
        let audit = AuditEntry::Release(ReleaseAudit {
            payload: *payload,
            impact,
            undo: ReleaseUndo {
                player: player.clone(),
                contract: contract.cloned(),
            },
        });

        Ok(MovePlan {
            preview: self.preview_from(
                snapshot,
                TransactionKind::Release,
                verdict,
                position,
                impact.savings,
                impact.dead_money,
                impact.dead_money_future,
                -1,
                roster_after,
                None,
            ),
            expected: vec![(snapshot.code.clone(), snapshot.version)],
            changes,
            legs,
            audit,
        })
    }

    fn plan_sign(
        &self,
        snapshot: &TeamSnapshot,
        payload: &SignPayload,
        reserved: Option<PlayerId>,
    ) -> EngineResult<MovePlan> {
        let (player_id, full_name, position_name, existing) = match &payload.target {
            SignTarget::Existing { player_id } => {
                let player = snapshot.player(*player_id).ok_or_else(|| {
                    EngineError::invalid_payload(format!(
                        "player {} is not available to {}",
                        player_id, snapshot.code
                    ))
                })?;
                if player.status.counts_toward_roster() {
                    return Err(EngineError::invalid_payload(format!(
                        "{} is already on the {} roster",
                        player.full_name(),
                        snapshot.code
                    )));
                }
                (*player_id, player.full_name(), player.position.clone(), true)
            }
            SignTarget::New {
                full_name,
                position,
            } => {
                if full_name.trim().is_empty() {
                    return Err(EngineError::invalid_payload("full_name must not be empty"));
                }
                (
                    reserved.unwrap_or(PlayerId::new(0)),
                    full_name.clone(),
                    position.clone(),
                    false,
                )
            }
        };

        let first_year_cap_hit = signing_cap_hit(&payload.terms, self.config.cap_year)?;
        let contract_years = build_contract_years(&payload.terms, self.config.cap_year)?;

        let cap_position = self.cap_position(snapshot);
        let cap_delta = -first_year_cap_hit;
        let cap_space_after = cap_position.cap_space + cap_delta;
        let roster_before = snapshot.roster_count();
        let roster_after = roster_before + 1;

        let assessment = LegAssessment::proposing(snapshot.code.clone())
            .with_cap_space_after(cap_space_after)
            .with_roster_count_after(roster_after);
        let mut verdict = RuleChecker::new(self.config).validate(&[assessment]);
        self.consult_advisor(snapshot, &mut verdict);

        verdict.note(format!(
            "Signing {} adds {} to the current cap.",
            full_name, first_year_cap_hit
        ));
        verdict.note(format!("Guaranteed cash: {}", payload.terms.guaranteed));
        if payload.terms.signing_bonus > Money::ZERO {
            verdict.note(format!(
                "Signing bonus of {} prorates over {} years.",
                payload.terms.signing_bonus,
                payload.terms.years.min(gridcap_capmath::MAX_PRORATION_YEARS)
            ));
        }

        let total_value =
            Money::from_dollars(payload.terms.apy.dollars() * i64::from(payload.terms.years));
        let mut contract = Contract::new(
            player_id,
            total_value,
            payload.terms.apy,
            payload.terms.guaranteed,
            contract_years.clone(),
        );
        contract.signed_date = Some(self.config.current_date);

        let changes = if existing {
            vec![
                StateChange::SetPlayerStatus {
                    player_id,
                    status: PlayerStatus::Active,
                },
                StateChange::SetContract {
                    player_id,
                    contract,
                },
            ]
        } else {
            let (first_name, last_name) = Player::split_name(&full_name);
            let player = Player::new(
                player_id,
                snapshot.code.clone(),
                first_name,
                last_name,
                position_name,
                self.config.current_date,
            );
            vec![StateChange::AddPlayer {
                player,
                contract: Some(contract),
            }]
        };

        let legs = vec![TransactionLeg {
            team: snapshot.code.clone(),
            cap_delta,
            affected_players: vec![player_id],
            roster_count_before: roster_before,
            roster_count_after: roster_after,
        }];
        let audit = AuditEntry::Sign(SignAudit {
            payload: payload.clone(),
            player_id,
            contract_years,
            first_year_cap_hit,
        });

        Ok(MovePlan {
            preview: self.preview_from(
                snapshot,
                TransactionKind::Sign,
                verdict,
                cap_position,
                cap_delta,
                Money::ZERO,
                Money::ZERO,
                1,
                roster_after,
                None,
            ),
            expected: vec![(snapshot.code.clone(), snapshot.version)],
            changes,
            legs,
            audit,
        })
    }

    fn plan_trade(
        &self,
        snapshot: &TeamSnapshot,
        partner: &TeamSnapshot,
        payload: &TradePayload,
    ) -> EngineResult<MovePlan> {
        if payload.player_ids.is_empty() && payload.partner_player_ids.is_empty() {
            return Err(EngineError::invalid_payload("trade moves no players"));
        }

        let outgoing = resolve_players(snapshot, &payload.player_ids)?;
        let incoming = resolve_players(partner, &payload.partner_player_ids)?;

        let own_side = self.trade_side(snapshot, partner, &outgoing, &incoming, payload)?;
        let partner_side = self.trade_side(partner, snapshot, &incoming, &outgoing, payload)?;

        let position = self.cap_position(snapshot);
        let partner_position = self.cap_position(partner);
        let cap_space_after = position.cap_space + own_side.cap_delta;
        let partner_cap_space_after = partner_position.cap_space + partner_side.cap_delta;

        let roster_delta = incoming.len() as i64 - outgoing.len() as i64;
        let roster_before = snapshot.roster_count();
        let roster_after = (roster_before as i64 + roster_delta) as usize;
        let partner_roster_before = partner.roster_count();
        let partner_roster_after = (partner_roster_before as i64 - roster_delta) as usize;

        let mut own_assessment = LegAssessment::proposing(snapshot.code.clone())
            .with_cap_space_after(cap_space_after)
            .requires_cap_space(own_side.cap_delta.is_negative())
            .with_roster_count_after(roster_after);
        for player in &outgoing {
            own_assessment =
                own_assessment.with_subject(player.id, player.full_name(), player.status);
        }
        let mut partner_assessment = LegAssessment::partner(partner.code.clone())
            .with_cap_space_after(partner_cap_space_after)
            .requires_cap_space(partner_side.cap_delta.is_negative())
            .with_roster_count_after(partner_roster_after);
        for player in &incoming {
            partner_assessment =
                partner_assessment.with_subject(player.id, player.full_name(), player.status);
        }

        let mut verdict =
            RuleChecker::new(self.config).validate(&[own_assessment, partner_assessment]);
        self.consult_advisor(snapshot, &mut verdict);

        verdict.note(format!("Outgoing savings: {}", own_side.outgoing_savings));
        verdict.note(format!("Incoming cap hits: {}", own_side.incoming_cap));
        if !payload.pick_compensation.is_empty() {
            verdict.note(format!(
                "Pick compensation: {}.",
                payload.pick_compensation.join(", ")
            ));
        }

        let mut changes = Vec::new();
        for player in &outgoing {
            changes.push(StateChange::AssignTeam {
                player_id: player.id,
                team: partner.code.clone(),
            });
            changes.push(StateChange::SetPlayerStatus {
                player_id: player.id,
                status: PlayerStatus::Traded,
            });
            changes.push(StateChange::StripProration {
                player_id: player.id,
            });
        }
        for player in &incoming {
            changes.push(StateChange::AssignTeam {
                player_id: player.id,
                team: snapshot.code.clone(),
            });
            changes.push(StateChange::SetPlayerStatus {
                player_id: player.id,
                status: PlayerStatus::Traded,
            });
            changes.push(StateChange::StripProration {
                player_id: player.id,
            });
        }
        if own_side.dead_money != Money::ZERO || own_side.dead_money_future != Money::ZERO {
            changes.push(StateChange::ChargeDeadMoney {
                team: snapshot.code.clone(),
                current: own_side.dead_money,
                future: own_side.dead_money_future,
            });
        }
        if partner_side.dead_money != Money::ZERO
            || partner_side.dead_money_future != Money::ZERO
        {
            changes.push(StateChange::ChargeDeadMoney {
                team: partner.code.clone(),
                current: partner_side.dead_money,
                future: partner_side.dead_money_future,
            });
        }

        let affected: Vec<PlayerId> = outgoing
            .iter()
            .chain(incoming.iter())
            .map(|p| p.id)
            .collect();
        let legs = vec![
            TransactionLeg {
                team: snapshot.code.clone(),
                cap_delta: own_side.cap_delta,
                affected_players: affected.clone(),
                roster_count_before: roster_before,
                roster_count_after: roster_after,
            },
            TransactionLeg {
                team: partner.code.clone(),
                cap_delta: partner_side.cap_delta,
                affected_players: affected,
                roster_count_before: partner_roster_before,
                roster_count_after: partner_roster_after,
            },
        ];

        let audit = AuditEntry::Trade(TradeAudit {
            payload: payload.clone(),
            proposing: TradeSideAudit {
                team: snapshot.code.clone(),
                cap_delta: own_side.cap_delta,
                dead_money: own_side.dead_money,
                dead_money_future: own_side.dead_money_future,
                players_out: outgoing.iter().map(|p| p.id).collect(),
            },
            partner: TradeSideAudit {
                team: partner.code.clone(),
                cap_delta: partner_side.cap_delta,
                dead_money: partner_side.dead_money,
                dead_money_future: partner_side.dead_money_future,
                players_out: incoming.iter().map(|p| p.id).collect(),
            },
        });

        let partner_preview = PartnerPreview {
            team: partner.code.clone(),
            cap_space_before: partner_position.cap_space,
            cap_space_after: partner_cap_space_after,
            cap_delta: partner_side.cap_delta,
            dead_money: partner_side.dead_money,
            dead_money_future: partner_side.dead_money_future,
            roster_delta: -roster_delta,
            roster_count_after: partner_roster_after,
        };

        Ok(MovePlan {
            preview: self.preview_from(
                snapshot,
                TransactionKind::Trade,
                verdict,
                position,
                own_side.cap_delta,
                own_side.dead_money,
                own_side.dead_money_future,
                roster_delta,
                roster_after,
                Some(partner_preview),
            ),
            expected: vec![
                (snapshot.code.clone(), snapshot.version),
                (partner.code.clone(), partner.version),
            ],
            changes,
            legs,
            audit,
        })
    }

    /// One team's cap arithmetic for a trade: what leaves, what arrives.
    fn trade_side(
        &self,
        from: &TeamSnapshot,
        to: &TeamSnapshot,
        outgoing: &[&Player],
        incoming: &[&Player],
        payload: &TradePayload,
    ) -> EngineResult<TradeSideNumbers> {
        let mut outgoing_savings = Money::ZERO;
        let mut dead_money = Money::ZERO;
        let mut dead_money_future = Money::ZERO;
        for player in outgoing {
            if let Some(contract) = from.contract(player.id) {
                let impact =
                    trade_impact(contract, self.config.cap_year, payload.post_june_1)?;
                outgoing_savings += impact.savings;
                dead_money += impact.dead_money;
                dead_money_future += impact.dead_money_future;
            }
        }

        let mut incoming_cap = Money::ZERO;
        for player in incoming {
            // The arriving contract lives on the other snapshot.
            if let Some(contract) = to.contract(player.id) {
                incoming_cap += acquisition_cap_hit(contract, self.config.cap_year)?;
            }
        }

        Ok(TradeSideNumbers {
            outgoing_savings,
            incoming_cap,
            cap_delta: outgoing_savings - incoming_cap,
            dead_money,
            dead_money_future,
        })
    }

    /// Consult the advisor when validation failed on our own cap room.
    fn consult_advisor(&self, snapshot: &TeamSnapshot, verdict: &mut Verdict) {
        let Some(advisor) = self.advisor else { return };
        let shortfall = verdict.violations.own().find_map(|v| match &v.kind {
            ViolationKind::CapInsufficient { shortfall } => Some(*shortfall),
            _ => None,
        });
        if let Some(shortfall) = shortfall {
            if let Some(hint) = advisor.advise(snapshot, self.config.cap_year, shortfall) {
                verdict.note(hint);
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn preview_from(
        &self,
        snapshot: &TeamSnapshot,
        kind: TransactionKind,
        verdict: Verdict,
        position: CapPosition,
        cap_delta: Money,
        dead_money: Money,
        dead_money_future: Money,
        roster_delta: i64,
        roster_count_after: usize,
        partner: Option<PartnerPreview>,
    ) -> PreviewResult {
        PreviewResult {
            team: snapshot.code.clone(),
            kind,
            allowed: verdict.allowed,
            cap_limit: position.cap_limit,
            total_cap: position.total_cap,
            cap_space_before: position.cap_space,
            cap_space_after: position.cap_space + cap_delta,
            cap_delta,
            dead_money,
            dead_money_future,
            roster_delta,
            roster_count_after,
            notes: verdict.notes,
            violations: verdict.violations,
            partner,
        }
    }
}

/// Per-side trade arithmetic.
struct TradeSideNumbers {
    outgoing_savings: Money,
    incoming_cap: Money,
    cap_delta: Money,
    dead_money: Money,
    dead_money_future: Money,
}

fn resolve_players<'s>(
    snapshot: &'s TeamSnapshot,
    ids: &[PlayerId],
) -> EngineResult<Vec<&'s Player>> {
    ids.iter()
        .map(|id| {
            snapshot.player(*id).ok_or_else(|| {
                EngineError::invalid_payload(format!(
                    "player {} is not on {}",
                    id, snapshot.code
                ))
            })
        })
        .collect()
}

/// Apply planned changes to batch-preview scratch snapshots. Only the
/// teams present in the scratch map are updated; this mirrors the store's
/// write phase closely enough for hypothetical previews.
fn apply_to_scratch(scratch: &mut HashMap<TeamCode, TeamSnapshot>, changes: &[StateChange]) {
    for change in changes {
        match change {
            StateChange::SetPlayerStatus { player_id, status } => {
                for snapshot in scratch.values_mut() {
                    if let Some(player) =
                        snapshot.players.iter_mut().find(|p| p.id == *player_id)
                    {
                        player.status = *status;
                    }
                }
            }
            StateChange::AssignTeam { player_id, team } => {
                let mut moved: Option<(Player, Option<Contract>)> = None;
                for snapshot in scratch.values_mut() {
                    if let Some(index) =
                        snapshot.players.iter().position(|p| p.id == *player_id)
                    {
                        let mut player = snapshot.players.remove(index);
                        player.team = team.clone();
                        let contract = snapshot.contracts.remove(player_id);
                        moved = Some((player, contract));
                        break;
                    }
                }
                if let (Some((player, contract)), Some(destination)) =
                    (moved, scratch.get_mut(team))
                {
                    if let Some(contract) = contract {
                        destination.contracts.insert(player.id, contract);
                    }
                    destination.players.push(player);
                }
            }
            StateChange::AddPlayer { player, contract } => {
                if let Some(snapshot) = scratch.get_mut(&player.team) {
                    if let Some(contract) = contract {
                        snapshot.contracts.insert(player.id, contract.clone());
                    }
                    snapshot.players.push(player.clone());
                }
            }
            StateChange::SetContract {
                player_id,
                contract,
            } => {
                for snapshot in scratch.values_mut() {
                    if snapshot.players.iter().any(|p| p.id == *player_id) {
                        snapshot.contracts.insert(*player_id, contract.clone());
                    }
                }
            }
            StateChange::ChargeDeadMoney {
                team,
                current,
                future,
            } => {
                if let Some(snapshot) = scratch.get_mut(team) {
                    snapshot.dead_money += *current;
                    snapshot.dead_money_future += *future;
                }
            }
            StateChange::StripProration { player_id } => {
                for snapshot in scratch.values_mut() {
                    if let Some(contract) = snapshot.contracts.get_mut(player_id) {
                        for year in &mut contract.years {
                            year.signing_proration = Money::ZERO;
                        }
                    }
                }
            }
        }
    }
}
