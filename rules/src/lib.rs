//! Gridcap Rules
//!
//! Stateless admissibility checks for proposed moves.
//!
//! Responsibilities:
//! - Cap-room, roster-limit, and player-eligibility checks per team leg
//! - Partner-side attribution for trades
//! - A verdict value carrying every violation, never an error

mod checker;
mod violation;

pub use checker::{LegAssessment, MoveSubject, RuleChecker};
pub use violation::{TeamSide, Verdict, Violation, ViolationKind, Violations};
