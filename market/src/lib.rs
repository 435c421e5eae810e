//! Gridcap Market
//!
//! Free agency and trade negotiation on top of the transaction engine.
//!
//! Responsibilities:
//! - The free-agent board and its fit/contender/value scoring
//! - Trade-target ranking across the league
//! - Offer evaluation with counters; accepted deals commit through the
//!   engine

mod board;
mod error;
mod market;
mod score;

pub use board::{FreeAgentBoard, FreeAgentProfile};
pub use error::{MarketError, MarketResult};
pub use market::{
    evaluate_free_agent_offer, evaluate_trade_offer, list_free_agents, list_trade_targets,
    CounterOffer, FreeAgentListing, FreeAgentOffer, OfferOutcome, TradeOutcome, TradeTarget,
};
pub use score::{contender_score, desired_depth, fit_score, position_counts, value_score};
