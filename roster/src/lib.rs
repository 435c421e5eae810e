//! Gridcap Roster
//!
//! Versioned league state and the atomic store boundary.
//!
//! Responsibilities:
//! - Own the authoritative roster/contract/dead-money state per club
//! - Hand out immutable versioned snapshots for previews
//! - Apply change batches as a compare-and-write (all-or-nothing)

mod change;
mod error;
mod snapshot;
mod state;
mod store;

pub use change::StateChange;
pub use error::{RosterError, RosterResult};
pub use snapshot::TeamSnapshot;
pub use state::LeagueState;
pub use store::{LeagueStore, MemoryStore};
