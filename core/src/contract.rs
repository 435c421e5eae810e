//! Contract rows.
//!
//! A `Contract` owns one `ContractYear` per season. Seasons that have
//! already been played are history; future seasons stay editable until a
//! transaction executes against them, at which point the audit record
//! freezes the numbers it used.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{LeagueYear, Money, PlayerId};

/// Per-season breakdown for a contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractYear {
    pub season: LeagueYear,
    pub base_salary: Money,
    pub signing_proration: Money,
    pub roster_bonus: Money,
    pub workout_bonus: Money,
    /// Guaranteed cash for this season (base + bonuses covered by guarantee).
    pub guaranteed: Money,
    /// Cash paid out this season (bonuses are cash up front, proration is not).
    pub cash: Money,
    pub is_void_year: bool,
}

impl ContractYear {
    /// A season row with only a base salary.
    pub fn base_only(season: LeagueYear, base_salary: Money) -> Self {
        Self {
            season,
            base_salary,
            signing_proration: Money::ZERO,
            roster_bonus: Money::ZERO,
            workout_bonus: Money::ZERO,
            guaranteed: Money::ZERO,
            cash: base_salary,
            is_void_year: false,
        }
    }

    /// The charge against the cap for this season:
    /// base + proration + roster bonus + workout bonus.
    pub fn cap_hit(&self) -> Money {
        self.base_salary + self.signing_proration + self.roster_bonus + self.workout_bonus
    }
}

/// Top-level contract for a player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub player_id: PlayerId,
    pub total_value: Money,
    pub average_per_year: Money,
    pub guaranteed: Money,
    pub signed_date: Option<NaiveDate>,
    pub notes: Option<String>,
    /// Season rows, kept sorted by season.
    pub years: Vec<ContractYear>,
}

impl Contract {
    /// Create a contract from its season rows; rows are sorted by season.
    pub fn new(
        player_id: PlayerId,
        total_value: Money,
        average_per_year: Money,
        guaranteed: Money,
        mut years: Vec<ContractYear>,
    ) -> Self {
        years.sort_by_key(|yr| yr.season);
        Self {
            player_id,
            total_value,
            average_per_year,
            guaranteed,
            signed_date: None,
            notes: None,
            years,
        }
    }

    /// Resolve the season row a computation should use: the exact season if
    /// present, else the next future season, else the final season row.
    pub fn year_for(&self, season: LeagueYear) -> Option<&ContractYear> {
        if self.years.is_empty() {
            return None;
        }
        self.years
            .iter()
            .find(|yr| yr.season == season)
            .or_else(|| self.years.iter().find(|yr| yr.season > season))
            .or_else(|| self.years.last())
    }

    /// Season rows at or after the given season, in order.
    pub fn years_from(&self, season: LeagueYear) -> impl Iterator<Item = &ContractYear> {
        self.years.iter().filter(move |yr| yr.season >= season)
    }

    /// Season rows strictly after the given season, in order.
    pub fn years_after(&self, season: LeagueYear) -> impl Iterator<Item = &ContractYear> {
        self.years.iter().filter(move |yr| yr.season > season)
    }

    /// Seasons remaining from the given season, inclusive.
    pub fn seasons_remaining(&self, season: LeagueYear) -> usize {
        self.years_from(season).count()
    }
}
