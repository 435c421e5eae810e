//! The free-agent board.

use std::fs;
use std::path::Path;

use gridcap_core::Money;
use serde::{Deserialize, Serialize};

use crate::error::MarketResult;

/// A free agent available on the open market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeAgentProfile {
    pub id: String,
    pub name: String,
    pub position: String,
    #[serde(default)]
    pub age: Option<u8>,
    /// What the market thinks the player is worth per year.
    #[serde(default)]
    pub market_value: Money,
    #[serde(default)]
    pub traits: Vec<String>,
    #[serde(default)]
    pub preferred_roles: Vec<String>,
    #[serde(default)]
    pub last_team: Option<String>,
    /// Contract lengths the player will entertain, ascending.
    #[serde(default)]
    pub preferred_years: Vec<u8>,
    #[serde(default)]
    pub scheme_fits: Vec<String>,
}

/// The pool of available free agents, loaded once per simulated market.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FreeAgentBoard {
    #[serde(default)]
    pub free_agents: Vec<FreeAgentProfile>,
}

impl FreeAgentBoard {
    /// An empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a board from JSON.
    pub fn from_json(json: &str) -> MarketResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a board file; a missing file is an empty board.
    pub fn load(path: impl AsRef<Path>) -> MarketResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new());
        }
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Look up a profile by id.
    pub fn profile(&self, id: &str) -> Option<&FreeAgentProfile> {
        self.free_agents.iter().find(|agent| agent.id == id)
    }

    /// Every market value on the board, for value scoring.
    pub fn market_values(&self) -> Vec<Money> {
        self.free_agents
            .iter()
            .map(|agent| agent.market_value)
            .collect()
    }
}
