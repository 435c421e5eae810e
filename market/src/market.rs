//! Free-agency listings and offer negotiation.

use gridcap_audit::{MovePayload, SignPayload, SignTarget, TradePayload, TransactionLedger};
use gridcap_capmath::{contract_cap_hit, SigningTerms};
use gridcap_core::{LeagueConfig, Money, PlayerId, TeamCode, TransactionId};
use gridcap_roster::{LeagueStore, TeamSnapshot};
use gridcap_engine::TransactionEngine;

use crate::board::FreeAgentBoard;
use crate::error::{MarketError, MarketResult};
use crate::score::{
    contender_score, desired_depth, fit_score, position_counts, value_score,
};

/// A board entry scored against one team's roster.
#[derive(Debug, Clone)]
pub struct FreeAgentListing {
    pub id: String,
    pub name: String,
    pub position: String,
    pub market_value: Money,
    pub fit_score: u8,
    pub contender_score: u8,
    pub value_score: f64,
    pub notes: Vec<String>,
}

/// A player on another roster worth calling about.
#[derive(Debug, Clone)]
pub struct TradeTarget {
    pub player_id: PlayerId,
    pub name: String,
    pub position: String,
    pub team: TeamCode,
    pub team_display: String,
    pub cap_hit: Money,
    pub years_remaining: usize,
    pub fit_score: u8,
    pub availability_score: u8,
    pub contender_score: u8,
    pub notes: Vec<String>,
}

/// An offer extended to a free agent.
#[derive(Debug, Clone)]
pub struct FreeAgentOffer {
    pub free_agent_id: String,
    pub terms: SigningTerms,
}

/// The agent's counter when an offer falls short.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterOffer {
    pub apy: Money,
    pub years: u8,
    pub signing_bonus: Money,
}

/// Outcome of a free-agent negotiation.
#[derive(Debug, Clone)]
pub struct OfferOutcome {
    pub accepted: bool,
    pub notes: Vec<String>,
    pub cap_space_after: Money,
    pub counter: Option<CounterOffer>,
    pub transaction_id: Option<TransactionId>,
}

/// Outcome of pitching a trade to the partner front office.
#[derive(Debug, Clone)]
pub struct TradeOutcome {
    pub accepted: bool,
    pub notes: Vec<String>,
    pub cap_space_after: Money,
    pub counter_request: Option<String>,
    pub transaction_id: Option<TransactionId>,
}

fn cap_totals(snapshot: &TeamSnapshot, config: &LeagueConfig) -> (Money, Money) {
    let player_cap: Money = snapshot
        .active_players()
        .map(|player| contract_cap_hit(snapshot.contract(player.id), config.cap_year))
        .sum();
    let total = player_cap + snapshot.dead_money;
    (total, config.cap_limit() - total)
}

/// Score every free agent on the board against a team's needs.
pub fn list_free_agents<S: LeagueStore>(
    store: &S,
    config: &LeagueConfig,
    board: &FreeAgentBoard,
    team: &TeamCode,
) -> MarketResult<Vec<FreeAgentListing>> {
    let snapshot = store
        .snapshot(team)
        .map_err(|_| MarketError::UnknownFreeAgent(format!("team {team} not found")))?;
    let counts = position_counts(&snapshot);
    let (total_cap, cap_space) = cap_totals(&snapshot, config);
    let contender = contender_score(cap_space, total_cap, config.cap_limit());
    let pool = board.market_values();

    Ok(board
        .free_agents
        .iter()
        .map(|profile| {
            let fit = fit_score(&counts, &profile.position);
            let have = counts.get(&profile.position).copied().unwrap_or(0);
            let notes = vec![
                format!(
                    "{} carries {}/{} ideal {} bodies.",
                    team,
                    have,
                    desired_depth(&profile.position),
                    profile.position
                ),
                format!("Cap space available: {}.", cap_space),
            ];
            FreeAgentListing {
                id: profile.id.clone(),
                name: profile.name.clone(),
                position: profile.position.clone(),
                market_value: profile.market_value,
                fit_score: fit,
                contender_score: contender,
                value_score: value_score(profile.market_value, &pool),
                notes,
            }
        })
        .collect())
}

/// Rank players across the league the team could plausibly trade for.
pub fn list_trade_targets<S: LeagueStore>(
    store: &S,
    config: &LeagueConfig,
    team: &TeamCode,
    limit: usize,
) -> MarketResult<Vec<TradeTarget>> {
    let own_snapshot = store
        .snapshot(team)
        .map_err(|_| MarketError::UnknownFreeAgent(format!("team {team} not found")))?;
    let own_counts = position_counts(&own_snapshot);

    let mut entries = Vec::new();
    for code in store.team_codes() {
        if code == *team {
            continue;
        }
        let snapshot = match store.snapshot(&code) {
            Ok(snapshot) => snapshot,
            Err(_) => continue,
        };
        let display = store.display_name(&code).unwrap_or_else(|_| code.to_string());
        let partner_counts = position_counts(&snapshot);
        let (total_cap, cap_space) = cap_totals(&snapshot, config);
        let contender = contender_score(cap_space, total_cap, config.cap_limit());

        for player in snapshot.active_players() {
            let contract = snapshot.contract(player.id);
            let cap_hit = contract_cap_hit(contract, config.cap_year);
            if cap_hit <= Money::ZERO {
                continue;
            }
            let desired = desired_depth(&player.position);
            let depth = partner_counts.get(&player.position).copied().unwrap_or(0);
            let surplus = depth.saturating_sub(desired);
            let cap_pressure = (-cap_space).floor_zero().dollars() / 2_000_000;
            let availability =
                (35 + surplus as i64 * 8 + cap_pressure).min(95) as u8;
            let years_remaining = contract
                .map(|c| c.seasons_remaining(config.cap_year))
                .unwrap_or(0);

            entries.push(TradeTarget {
                player_id: player.id,
                name: player.full_name(),
                position: player.position.clone(),
                team: code.clone(),
                team_display: display.clone(),
                cap_hit,
                years_remaining,
                fit_score: fit_score(&own_counts, &player.position),
                availability_score: availability,
                contender_score: contender,
                notes: vec![
                    format!("{} depth at {}: {}/{}.", code, player.position, depth, desired),
                    format!(
                        "Cap space after move could reach {}.",
                        cap_space + cap_hit
                    ),
                ],
            });
        }
    }

    entries.sort_by(|a, b| {
        let a_score = a.fit_score as u16 + a.availability_score as u16;
        let b_score = b.fit_score as u16 + b.availability_score as u16;
        b_score.cmp(&a_score).then(a.player_id.cmp(&b.player_id))
    });
    entries.truncate(limit);
    Ok(entries)
}

/// Round a dollar figure to the nearest $10,000, agent style.
fn round_to_ten_thousand(amount: Money) -> Money {
    let step = 10_000;
    Money::from_dollars((amount.dollars() + step / 2) / step * step)
}

/// Pitch a contract to a free agent. Interest blends perceived value,
/// roster fit, and the team's contender standing; a short offer draws a
/// counter instead of a signature. An accepted offer commits the signing
/// through the engine.
pub fn evaluate_free_agent_offer<S: LeagueStore>(
    store: &mut S,
    ledger: &mut TransactionLedger,
    config: &LeagueConfig,
    board: &FreeAgentBoard,
    team: &TeamCode,
    offer: &FreeAgentOffer,
) -> MarketResult<OfferOutcome> {
    let profile = board
        .profile(&offer.free_agent_id)
        .ok_or_else(|| MarketError::UnknownFreeAgent(offer.free_agent_id.clone()))?
        .clone();

    let snapshot = store
        .snapshot(team)
        .map_err(|_| MarketError::UnknownFreeAgent(format!("team {team} not found")))?;
    let counts = position_counts(&snapshot);
    let (total_cap, cap_space) = cap_totals(&snapshot, config);
    let fit = fit_score(&counts, &profile.position);
    let contender = contender_score(cap_space, total_cap, config.cap_limit());

    let market_value = if profile.market_value > Money::ZERO {
        profile.market_value
    } else {
        offer.terms.apy
    };
    let value_ratio = if market_value > Money::ZERO {
        offer.terms.apy.dollars() as f64 / market_value.dollars() as f64
    } else {
        1.0
    };
    let preferred = if profile.preferred_years.is_empty() {
        vec![3, 4]
    } else {
        profile.preferred_years.clone()
    };
    let within_years = preferred[0] <= offer.terms.years
        && offer.terms.years <= *preferred.last().expect("non-empty");

    let mut interest = 0.5 * value_ratio.min(1.5)
        + 0.3 * (fit as f64 / 100.0)
        + 0.2 * (contender as f64 / 100.0);
    if !within_years {
        interest -= 0.1;
    }

    // The agent assumes standard guarantees when the offer names none.
    let mut terms = offer.terms;
    if terms.guaranteed == Money::ZERO {
        let bonus_cash = terms.signing_bonus + terms.roster_bonus + terms.workout_bonus;
        terms.guaranteed = if bonus_cash > Money::ZERO {
            bonus_cash
        } else {
            Money::from_dollars(terms.apy.dollars() * 2 / 5)
        };
    }

    let payload = MovePayload::Sign(SignPayload {
        target: SignTarget::New {
            full_name: profile.name.clone(),
            position: profile.position.clone(),
        },
        terms,
    });

    let preview = {
        let engine = TransactionEngine::new(store, ledger, config);
        engine.preview(team, &payload)?
    };
    let mut notes = preview.notes.clone();

    if interest >= 0.95 && preview.allowed {
        let record = {
            let mut engine = TransactionEngine::new(store, ledger, config);
            engine.commit(team, &payload)?
        };
        notes.push(format!(
            "{} accepted a {}-year offer averaging {}.",
            profile.name, offer.terms.years, offer.terms.apy
        ));
        return Ok(OfferOutcome {
            accepted: true,
            notes,
            cap_space_after: preview.cap_space_after,
            counter: None,
            transaction_id: Some(record.id),
        });
    }

    if !preview.allowed {
        notes.push("Cap or roster limits block this contract.".to_string());
    }
    let counter = CounterOffer {
        apy: round_to_ten_thousand(market_value),
        years: *preferred.last().expect("non-empty"),
        signing_bonus: offer
            .terms
            .signing_bonus
            .max(Money::from_dollars(market_value.dollars() * 3 / 10)),
    };
    Ok(OfferOutcome {
        accepted: false,
        notes,
        cap_space_after: preview.cap_space_after,
        counter: Some(counter),
        transaction_id: None,
    })
}

/// Pitch a trade to the partner front office. The partner weighs the two
/// sides' cap deltas; a lopsided package draws a counter-request, a fair
/// and valid one commits through the engine.
pub fn evaluate_trade_offer<S: LeagueStore>(
    store: &mut S,
    ledger: &mut TransactionLedger,
    config: &LeagueConfig,
    team: &TeamCode,
    trade: &TradePayload,
) -> MarketResult<TradeOutcome> {
    let payload = MovePayload::Trade(trade.clone());
    let preview = {
        let engine = TransactionEngine::new(store, ledger, config);
        engine.preview(team, &payload)?
    };

    let outgoing_value = preview.cap_delta.dollars().unsigned_abs() as f64;
    let partner_delta = preview
        .partner
        .as_ref()
        .map(|p| p.cap_delta.dollars().unsigned_abs() as f64)
        .unwrap_or(0.0);
    let fairness = if outgoing_value > 0.0 && partner_delta > 0.0 {
        (partner_delta / outgoing_value).clamp(0.2, 2.0)
    } else {
        1.0
    };

    let mut notes = preview.notes.clone();
    if !preview.allowed || !(0.6..=1.4).contains(&fairness) {
        if fairness < 0.6 {
            notes.push("Partner rejected: offer too lopsided.".to_string());
        }
        if fairness > 1.4 {
            notes.push(
                "Your outgoing value exceeds the return; sweetener recommended.".to_string(),
            );
        }
        return Ok(TradeOutcome {
            accepted: false,
            notes,
            cap_space_after: preview.cap_space_after,
            counter_request: Some(
                "Adjust the player mix or add draft compensation to balance the deal."
                    .to_string(),
            ),
            transaction_id: None,
        });
    }

    let record = {
        let mut engine = TransactionEngine::new(store, ledger, config);
        engine.commit(team, &payload)?
    };
    notes.push("Trade executed after front-office approval.".to_string());
    Ok(TradeOutcome {
        accepted: true,
        notes,
        cap_space_after: preview.cap_space_after,
        counter_request: None,
        transaction_id: Some(record.id),
    })
}
