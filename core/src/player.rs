//! Player rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{PlayerId, TeamCode};

/// Where a player stands with respect to the roster on the simulated day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    /// On the roster and counting against the cap.
    Active,
    /// Cut on the simulated day.
    Released,
    /// Sent to another club on the simulated day.
    Traded,
    /// Out of the league.
    Retired,
}

impl PlayerStatus {
    /// Whether a player in this status counts toward the roster limit and
    /// the team's cap total.
    pub fn counts_toward_roster(&self) -> bool {
        matches!(self, PlayerStatus::Active | PlayerStatus::Traded)
    }

    /// Whether a player in this status can be the subject of a new
    /// release or trade.
    pub fn is_movable(&self) -> bool {
        matches!(self, PlayerStatus::Active)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerStatus::Active => "active",
            PlayerStatus::Released => "released",
            PlayerStatus::Traded => "traded",
            PlayerStatus::Retired => "retired",
        }
    }
}

impl fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A player on a club's roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub team: TeamCode,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub status: PlayerStatus,
    pub jersey_number: Option<u8>,
    pub experience: u8,
    pub roster_date: NaiveDate,
}

impl Player {
    /// Create an active player with the minimal required fields.
    pub fn new(
        id: PlayerId,
        team: TeamCode,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        position: impl Into<String>,
        roster_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            team,
            first_name: first_name.into(),
            last_name: last_name.into(),
            position: position.into(),
            status: PlayerStatus::Active,
            jersey_number: None,
            experience: 0,
            roster_date,
        }
    }

    /// "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Split a display name into (first, last), tolerating single-word and
    /// empty inputs.
    pub fn split_name(full_name: &str) -> (String, String) {
        let mut parts = full_name.split_whitespace();
        match parts.next() {
            None => ("Player".to_string(), "Unknown".to_string()),
            Some(first) => {
                let rest: Vec<&str> = parts.collect();
                if rest.is_empty() {
                    (first.to_string(), "Unknown".to_string())
                } else {
                    (first.to_string(), rest.join(" "))
                }
            }
        }
    }
}
