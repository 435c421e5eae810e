//! Move admissibility checks.
//!
//! The checker is stateless: it sees one assessment per affected team
//! (post-move cap space, post-move roster count, the players being moved)
//! and the league configuration, and returns a verdict. It runs
//! identically during preview and again immediately before commit.

use gridcap_core::{LeagueConfig, Money, PlayerId, PlayerStatus, TeamCode};

use crate::violation::{TeamSide, Verdict, Violation, ViolationKind, Violations};

/// A player a move wants to take off (or put through) a roster.
#[derive(Debug, Clone)]
pub struct MoveSubject {
    pub player_id: PlayerId,
    pub name: String,
    pub status: PlayerStatus,
}

/// Everything the checker needs to know about one team's side of a move.
#[derive(Debug, Clone)]
pub struct LegAssessment {
    pub side: TeamSide,
    pub team: TeamCode,
    /// Cap space once the move lands.
    pub cap_space_after: Money,
    /// Whether negative post-move cap space blocks this leg. Cap-relief
    /// moves (a plain release) are computed even for over-the-cap teams.
    pub requires_cap_space: bool,
    /// Active roster count once the move lands.
    pub roster_count_after: usize,
    /// Players leaving this roster as part of the move.
    pub subjects: Vec<MoveSubject>,
}

impl LegAssessment {
    /// An assessment for the proposing team.
    pub fn proposing(team: TeamCode) -> Self {
        Self::new(TeamSide::Proposing, team)
    }

    /// An assessment for the trade counterpart.
    pub fn partner(team: TeamCode) -> Self {
        Self::new(TeamSide::Partner, team)
    }

    fn new(side: TeamSide, team: TeamCode) -> Self {
        Self {
            side,
            team,
            cap_space_after: Money::ZERO,
            requires_cap_space: true,
            roster_count_after: 0,
            subjects: Vec::new(),
        }
    }

    pub fn with_cap_space_after(mut self, cap_space_after: Money) -> Self {
        self.cap_space_after = cap_space_after;
        self
    }

    pub fn requires_cap_space(mut self, required: bool) -> Self {
        self.requires_cap_space = required;
        self
    }

    pub fn with_roster_count_after(mut self, count: usize) -> Self {
        self.roster_count_after = count;
        self
    }

    pub fn with_subject(mut self, player_id: PlayerId, name: impl Into<String>, status: PlayerStatus) -> Self {
        self.subjects.push(MoveSubject {
            player_id,
            name: name.into(),
            status,
        });
        self
    }
}

/// Stateless rule checker.
pub struct RuleChecker<'c> {
    config: &'c LeagueConfig,
}

impl<'c> RuleChecker<'c> {
    pub fn new(config: &'c LeagueConfig) -> Self {
        Self { config }
    }

    /// Validate every leg of a move. All violations across all legs are
    /// collected; a single failing leg rejects the whole move.
    pub fn validate(&self, legs: &[LegAssessment]) -> Verdict {
        let mut violations = Violations::new();
        for leg in legs {
            violations.merge(self.check_leg(leg));
        }
        Verdict::from_violations(violations)
    }

    fn check_leg(&self, leg: &LegAssessment) -> Violations {
        let mut violations = Violations::new();

        for subject in &leg.subjects {
            if !subject.status.is_movable() {
                violations.push(Violation::new(
                    leg.side,
                    leg.team.clone(),
                    ViolationKind::PlayerIneligible {
                        player_id: subject.player_id,
                        status: subject.status,
                    },
                    format!(
                        "{} has already been {} today and cannot be moved again.",
                        subject.name, subject.status
                    ),
                ));
            }
        }

        if leg.requires_cap_space && leg.cap_space_after.is_negative() {
            let shortfall = -leg.cap_space_after;
            violations.push(Violation::new(
                leg.side,
                leg.team.clone(),
                ViolationKind::CapInsufficient { shortfall },
                format!("{} would be {} over the cap.", leg.team, shortfall),
            ));
        }

        let limit = self.config.roster_limit();
        if leg.roster_count_after > limit {
            violations.push(Violation::new(
                leg.side,
                leg.team.clone(),
                ViolationKind::RosterLimitExceeded {
                    count: leg.roster_count_after,
                    limit,
                },
                format!(
                    "{} roster limit ({}) exceeded: {} players after the move.",
                    leg.team, limit, leg.roster_count_after
                ),
            ));
        }

        violations
    }
}
