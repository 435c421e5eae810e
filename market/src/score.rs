//! Roster-fit and market scoring heuristics.

use std::collections::HashMap;

use gridcap_core::Money;
use gridcap_roster::TeamSnapshot;

/// Ideal positional depth for a 90-man offseason roster.
pub fn desired_depth(position: &str) -> usize {
    match position.to_ascii_uppercase().as_str() {
        "QB" => 3,
        "RB" => 5,
        "WR" => 9,
        "TE" => 4,
        "OT" => 4,
        "G" => 4,
        "C" => 2,
        "DL" => 6,
        "EDGE" => 6,
        "LB" => 6,
        "CB" => 8,
        "S" => 5,
        "K" | "P" | "LS" => 1,
        _ => 4,
    }
}

/// Active players per position.
pub fn position_counts(snapshot: &TeamSnapshot) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for player in snapshot.active_players() {
        *counts.entry(player.position.clone()).or_insert(0) += 1;
    }
    counts
}

/// How badly the team needs a body at this position, 40-96.
pub fn fit_score(counts: &HashMap<String, usize>, position: &str) -> u8 {
    let desired = desired_depth(position);
    let have = counts.get(position).copied().unwrap_or(0);
    let need = desired.saturating_sub(have);
    let ratio = if desired > 0 {
        need as f64 / desired as f64
    } else {
        0.0
    };
    ((40.0 + ratio * 60.0).min(96.0)) as u8
}

/// How much of a contender the team's spending says it is, 25-95.
pub fn contender_score(cap_space: Money, total_cap: Money, cap_limit: Money) -> u8 {
    let spend_ratio = if cap_limit > Money::ZERO {
        (total_cap.dollars() as f64 / cap_limit.dollars() as f64).min(1.2)
    } else {
        0.0
    };
    let mut score = (spend_ratio * 90.0).clamp(30.0, 95.0) as i32;
    if cap_space.is_negative() {
        score = (score - 10).max(25);
    }
    score as u8
}

/// A player's asking price relative to the market median, 0.5-1.5.
pub fn value_score(market_value: Money, pool_values: &[Money]) -> f64 {
    let mut filtered: Vec<i64> = pool_values
        .iter()
        .filter(|value| **value > Money::ZERO)
        .map(|value| value.dollars())
        .collect();
    if filtered.is_empty() || market_value <= Money::ZERO {
        return 1.0;
    }
    filtered.sort_unstable();
    let median = if filtered.len() % 2 == 1 {
        filtered[filtered.len() / 2] as f64
    } else {
        let upper = filtered.len() / 2;
        (filtered[upper - 1] + filtered[upper]) as f64 / 2.0
    };
    if median <= 0.0 {
        return 1.0;
    }
    let ratio = market_value.dollars() as f64 / median;
    (ratio.clamp(0.5, 1.5) * 100.0).round() / 100.0
}
