//! Release and trade cap impact.
//!
//! Acceleration model:
//! - Pre-June 1 release: every remaining year of signing-bonus proration
//!   accelerates into the current season's dead money, along with any
//!   remaining guaranteed base salary.
//! - Post-June 1 release: only the current season's proration (plus
//!   guaranteed base) hits this season; future-season proration defers to
//!   the next league year and is reported separately, never folded into
//!   the current-year figure.
//! - Trade: the sender's proration accelerates exactly as on a release,
//!   but the acquiring team assumes the remaining base salaries and
//!   guarantees, so no guarantee component lands in the sender's dead
//!   money and the acquirer never inherits proration.

use gridcap_core::{Contract, LeagueYear, Money};
use serde::{Deserialize, Serialize};

use crate::error::CapMathResult;
use crate::cap_hit;

/// The cap consequences of removing a player from a roster.
///
/// `savings` is measured against the current season only and may be
/// negative (an underwater cut); computing it is not the same as allowing
/// it - admissibility is the validator's job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapImpact {
    /// Current-season cap hit the move removes.
    pub cap_hit: Money,
    /// Current-season cap relief: `cap_hit - dead_money`.
    pub savings: Money,
    /// Dead money charged to the current season.
    pub dead_money: Money,
    /// Dead money deferred to the next league year (post-June 1 only).
    pub dead_money_future: Money,
}

impl CapImpact {
    /// An impact with no cap consequences (no contract on file).
    pub fn zero() -> Self {
        Self::default()
    }

    /// True when the move costs cap space instead of freeing it.
    pub fn is_underwater(&self) -> bool {
        self.savings.is_non_positive()
    }
}

/// The cap hit a contract carries for a season, with the original row
/// resolution: exact season, else next future season, else the last row;
/// contracts without season rows fall back to APY, then total value.
pub fn contract_cap_hit(contract: Option<&Contract>, season: LeagueYear) -> Money {
    let Some(contract) = contract else {
        return Money::ZERO;
    };
    if let Some(row) = contract.year_for(season) {
        return row.cap_hit();
    }
    if contract.average_per_year > Money::ZERO {
        return contract.average_per_year;
    }
    if contract.total_value > Money::ZERO {
        return contract.total_value;
    }
    Money::ZERO
}

/// Remaining guaranteed base salary from `season` onward. Bonus guarantees
/// are already captured by proration acceleration, so only the portion of
/// each year's guarantee attributable to base salary counts here.
pub fn guaranteed_remaining(contract: &Contract, season: LeagueYear) -> Money {
    contract
        .years_from(season)
        .map(|yr| yr.guaranteed.min(yr.base_salary))
        .sum()
}

/// Savings and dead money for releasing a player in `season`.
pub fn release_impact(
    contract: &Contract,
    season: LeagueYear,
    post_june_1: bool,
) -> CapMathResult<CapImpact> {
    impact(contract, season, post_june_1, true)
}

/// Sender-side savings and dead money for trading a player away in
/// `season`. Mirrors a release except the acquirer assumes the remaining
/// guarantees, so none land in the sender's dead money.
pub fn trade_impact(
    contract: &Contract,
    season: LeagueYear,
    post_june_1: bool,
) -> CapMathResult<CapImpact> {
    impact(contract, season, post_june_1, false)
}

/// The acquiring team's cap hit for a traded-for player: the current
/// season's base and bonuses with no inherited signing proration.
pub fn acquisition_cap_hit(contract: &Contract, season: LeagueYear) -> CapMathResult<Money> {
    let Some(row) = contract.year_for(season) else {
        return Ok(Money::ZERO);
    };
    Ok(cap_hit(row)? - row.signing_proration)
}

fn impact(
    contract: &Contract,
    season: LeagueYear,
    post_june_1: bool,
    keep_guarantees: bool,
) -> CapMathResult<CapImpact> {
    let Some(current) = contract.year_for(season) else {
        return Ok(CapImpact::zero());
    };
    // Anchor on the resolved row's season so fallback resolution (a season
    // outside the contract's range) still sees a consistent remaining set.
    let anchor = current.season;

    let current_hit = cap_hit(current)?;
    for row in contract.years_after(anchor) {
        cap_hit(row)?;
    }

    let current_proration = current.signing_proration;
    let future_proration: Money = contract
        .years_after(anchor)
        .map(|yr| yr.signing_proration)
        .sum();
    let guarantees = if keep_guarantees {
        guaranteed_remaining(contract, anchor)
    } else {
        Money::ZERO
    };

    let (dead_money, dead_money_future) = if post_june_1 {
        (current_proration + guarantees, future_proration)
    } else {
        (current_proration + future_proration + guarantees, Money::ZERO)
    };

    Ok(CapImpact {
        cap_hit: current_hit,
        savings: current_hit - dead_money,
        dead_money,
        dead_money_future,
    })
}
