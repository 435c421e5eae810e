//! League calendar and cap configuration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::Money;

/// The cap-accounting period a charge applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeagueYear(pub u16);

impl LeagueYear {
    pub fn new(year: u16) -> Self {
        Self(year)
    }

    pub fn raw(&self) -> u16 {
        self.0
    }

    /// The league year immediately after this one.
    pub fn next(&self) -> LeagueYear {
        LeagueYear(self.0 + 1)
    }

    /// Offset this league year by a number of seasons.
    pub fn plus(&self, seasons: u16) -> LeagueYear {
        LeagueYear(self.0 + seasons)
    }
}

impl fmt::Display for LeagueYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cap limits per league year. Limits are immutable once referenced by a
/// computation; years without an explicit entry fall back to the default.
#[derive(Debug, Clone)]
pub struct CapTable {
    default_limit: Money,
    limits: HashMap<LeagueYear, Money>,
}

impl CapTable {
    /// Create a table with a default limit for unlisted years.
    pub fn new(default_limit: Money) -> Self {
        Self {
            default_limit,
            limits: HashMap::new(),
        }
    }

    /// Set the limit for a specific league year.
    pub fn set(&mut self, year: LeagueYear, limit: Money) {
        self.limits.insert(year, limit);
    }

    /// The cap limit for a league year.
    pub fn limit_for(&self, year: LeagueYear) -> Money {
        self.limits.get(&year).copied().unwrap_or(self.default_limit)
    }
}

/// Which roster window the simulated date falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterWindow {
    /// Expanded offseason roster.
    Offseason,
    /// Regular-season active roster.
    InSeason,
}

/// League policy values supplied by configuration, not hard-coded at call
/// sites: the current cap year, cap limits, roster limits per window, and
/// the simulated date that selects between them.
#[derive(Debug, Clone)]
pub struct LeagueConfig {
    /// Current cap-accounting year.
    pub cap_year: LeagueYear,
    /// Cap limits by year.
    pub cap_table: CapTable,
    /// Roster limit during the offseason window.
    pub offseason_roster_limit: usize,
    /// Roster limit once the regular season starts.
    pub in_season_roster_limit: usize,
    /// First day of the regular season for the current cap year.
    pub regular_season_start: NaiveDate,
    /// The simulated "today".
    pub current_date: NaiveDate,
}

impl LeagueConfig {
    /// Defaults for the current league year: $255.4M cap, 90-man offseason
    /// roster, 53-man in-season roster, season opening in early September.
    pub fn new(cap_year: LeagueYear) -> Self {
        let year = cap_year.raw() as i32;
        Self {
            cap_year,
            cap_table: CapTable::new(Money::from_dollars(255_400_000)),
            offseason_roster_limit: 90,
            in_season_roster_limit: 53,
            regular_season_start: NaiveDate::from_ymd_opt(year, 9, 4)
                .unwrap_or(NaiveDate::MIN),
            current_date: NaiveDate::from_ymd_opt(year, 3, 12).unwrap_or(NaiveDate::MIN),
        }
    }

    /// Move the simulated date.
    pub fn with_current_date(mut self, date: NaiveDate) -> Self {
        self.current_date = date;
        self
    }

    /// Override the default cap limit for the current year.
    pub fn with_cap_limit(mut self, limit: Money) -> Self {
        self.cap_table.set(self.cap_year, limit);
        self
    }

    /// The cap limit for the current cap year.
    pub fn cap_limit(&self) -> Money {
        self.cap_table.limit_for(self.cap_year)
    }

    /// The roster window the simulated date falls in.
    pub fn roster_window(&self) -> RosterWindow {
        if self.current_date < self.regular_season_start {
            RosterWindow::Offseason
        } else {
            RosterWindow::InSeason
        }
    }

    /// The roster limit selected by the simulated date.
    pub fn roster_limit(&self) -> usize {
        match self.roster_window() {
            RosterWindow::Offseason => self.offseason_roster_limit,
            RosterWindow::InSeason => self.in_season_roster_limit,
        }
    }
}
