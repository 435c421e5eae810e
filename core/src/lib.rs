//! Gridcap Core
//!
//! Shared domain types for the salary-cap simulator.
//!
//! Responsibilities:
//! - Opaque identifiers (players, teams, transactions)
//! - Whole-dollar money arithmetic
//! - League calendar and cap configuration
//! - Player and contract rows

mod contract;
mod id;
mod league;
mod money;
mod player;
mod transaction;

pub use contract::{Contract, ContractYear};
pub use id::{PlayerId, TeamCode, TransactionId};
pub use league::{CapTable, LeagueConfig, LeagueYear, RosterWindow};
pub use money::Money;
pub use player::{Player, PlayerStatus};
pub use transaction::{TransactionKind, TransactionStatus};
