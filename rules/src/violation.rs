//! Rule violation types.
//!
//! A violation is a value, not an error: rejected moves are an expected,
//! common outcome and flow back to the caller inside the verdict.

use gridcap_core::{Money, PlayerId, PlayerStatus, TeamCode};
use serde::{Deserialize, Serialize};

/// Which side of a move a violation belongs to. Trade partners fail
/// independently and the caller renders the two sides differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    /// The team proposing the move.
    Proposing,
    /// The trade counterpart.
    Partner,
}

/// What rule a move broke, with the data the caller needs to render it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ViolationKind {
    /// Post-move cap space is negative by `shortfall`.
    CapInsufficient { shortfall: Money },

    /// Post-move roster exceeds the window's limit.
    RosterLimitExceeded { count: usize, limit: usize },

    /// The player has already been moved on the simulated day.
    PlayerIneligible {
        player_id: PlayerId,
        status: PlayerStatus,
    },
}

impl ViolationKind {
    pub fn code(&self) -> &'static str {
        match self {
            ViolationKind::CapInsufficient { .. } => "cap_insufficient",
            ViolationKind::RosterLimitExceeded { .. } => "roster_limit_exceeded",
            ViolationKind::PlayerIneligible { .. } => "player_ineligible",
        }
    }
}

/// One broken rule on one side of a move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub side: TeamSide,
    pub team: TeamCode,
    pub kind: ViolationKind,
    /// Human-readable reason, ready to surface to the user.
    pub message: String,
}

impl Violation {
    pub fn new(
        side: TeamSide,
        team: TeamCode,
        kind: ViolationKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            side,
            team,
            kind,
            message: message.into(),
        }
    }

    /// True when this violation is on the trade partner's side.
    pub fn is_partner(&self) -> bool {
        self.side == TeamSide::Partner
    }
}

/// Ordered collection of violations. Every broken rule is reported, not
/// just the first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn all(&self) -> &[Violation] {
        &self.violations
    }

    /// Violations on the proposing team's side.
    pub fn own(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| !v.is_partner())
    }

    /// Violations on the partner's side.
    pub fn partner(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| v.is_partner())
    }

    /// True when every violation sits on the partner's side.
    pub fn only_partner(&self) -> bool {
        !self.violations.is_empty() && self.violations.iter().all(|v| v.is_partner())
    }

    pub fn merge(&mut self, other: Violations) {
        self.violations.extend(other.violations);
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

/// The single admissibility result for a proposed move: a yes/no verdict
/// plus ordered human-readable notes (reasons on rejection, information on
/// success).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub allowed: bool,
    pub violations: Violations,
    pub notes: Vec<String>,
}

impl Verdict {
    /// Build a verdict from collected violations; their messages become
    /// the leading notes.
    pub fn from_violations(violations: Violations) -> Self {
        let notes = violations.all().iter().map(|v| v.message.clone()).collect();
        Self {
            allowed: violations.is_empty(),
            violations,
            notes,
        }
    }

    /// Append an informational note.
    pub fn note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }
}
