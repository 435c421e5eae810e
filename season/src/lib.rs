//! Gridcap Season
//!
//! A lightweight schedule-and-standings simulator. Results are
//! deterministic per team: the RNG is seeded from the team code, so the
//! same request always produces the same season.

mod sim;

pub use sim::{
    simulate_season, DivisionStanding, GameResult, SeasonError, SeasonResult, SeasonSummary,
    SimulatedGame, TeamStanding, DIVISIONS,
};
