//! New-contract construction and first-year cap impact.

use gridcap_core::{ContractYear, LeagueYear, Money};
use serde::{Deserialize, Serialize};

use crate::error::{CapMathError, CapMathResult};
use crate::proration::{proration_schedule, MAX_PRORATION_YEARS};
use crate::cap_hit;

/// The negotiated shape of a new contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningTerms {
    /// Contract length in seasons.
    pub years: u8,
    /// Average per year.
    pub apy: Money,
    /// Signing bonus, prorated over `min(years, 5)`.
    #[serde(default)]
    pub signing_bonus: Money,
    /// First-year roster bonus.
    #[serde(default)]
    pub roster_bonus: Money,
    /// First-year workout bonus.
    #[serde(default)]
    pub workout_bonus: Money,
    /// Total guaranteed cash, consumed against early-year cash flow.
    #[serde(default)]
    pub guaranteed: Money,
}

impl SigningTerms {
    /// A simple `years` x `apy` deal with no bonuses.
    pub fn flat(years: u8, apy: Money) -> Self {
        Self {
            years,
            apy,
            signing_bonus: Money::ZERO,
            roster_bonus: Money::ZERO,
            workout_bonus: Money::ZERO,
            guaranteed: Money::ZERO,
        }
    }

    fn validate(&self) -> CapMathResult<()> {
        if self.years == 0 {
            return Err(CapMathError::invalid_contract_year(
                "contract must cover at least one season",
            ));
        }
        for (name, amount) in [
            ("apy", self.apy),
            ("signing_bonus", self.signing_bonus),
            ("roster_bonus", self.roster_bonus),
            ("workout_bonus", self.workout_bonus),
            ("guaranteed", self.guaranteed),
        ] {
            if amount.is_negative() {
                return Err(CapMathError::invalid_contract_year(format!(
                    "{} is negative ({})",
                    name, amount
                )));
            }
        }
        Ok(())
    }
}

/// Build the season rows a new signing books, starting at `start_season`.
///
/// The signing bonus prorates over `min(years, 5)` with the remainder in
/// the first year; roster and workout bonuses are first-year charges; base
/// salary is whatever remains of the APY (floored at zero); guaranteed
/// cash is consumed against each season's cash flow until exhausted.
pub fn build_contract_years(
    terms: &SigningTerms,
    start_season: LeagueYear,
) -> CapMathResult<Vec<ContractYear>> {
    terms.validate()?;

    let proration_years = terms.years.min(MAX_PRORATION_YEARS);
    let schedule = if terms.signing_bonus > Money::ZERO {
        proration_schedule(terms.signing_bonus, proration_years)?
    } else {
        vec![Money::ZERO; proration_years as usize]
    };

    let mut remaining_guarantee = terms.guaranteed;
    let mut years = Vec::with_capacity(terms.years as usize);
    for index in 0..terms.years {
        let season = start_season.plus(index as u16);
        let proration = schedule
            .get(index as usize)
            .copied()
            .unwrap_or(Money::ZERO);
        let roster_bonus = if index == 0 {
            terms.roster_bonus
        } else {
            Money::ZERO
        };
        let workout_bonus = if index == 0 {
            terms.workout_bonus
        } else {
            Money::ZERO
        };

        let base_salary =
            (terms.apy - proration - roster_bonus - workout_bonus).floor_zero();
        let mut cash = base_salary + roster_bonus + workout_bonus;
        if index == 0 {
            cash += terms.signing_bonus;
        }
        let guarantee_for_year = remaining_guarantee.min(cash);
        remaining_guarantee = (remaining_guarantee - guarantee_for_year).floor_zero();

        years.push(ContractYear {
            season,
            base_salary,
            signing_proration: proration,
            roster_bonus,
            workout_bonus,
            guaranteed: guarantee_for_year,
            cash,
            is_void_year: false,
        });
    }
    Ok(years)
}

/// The first-year cap hit a new signing adds, bonuses included.
pub fn signing_cap_hit(terms: &SigningTerms, start_season: LeagueYear) -> CapMathResult<Money> {
    let years = build_contract_years(terms, start_season)?;
    cap_hit(years.first().expect("terms cover at least one season"))
}
