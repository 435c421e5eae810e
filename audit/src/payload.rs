//! Move payloads.
//!
//! The exact caller-supplied input for each transaction kind. These are
//! part of the audit schema: a committed transaction stores its payload
//! verbatim so replay never depends on later data corrections. Unknown
//! fields are ignored on the way in; missing required fields are a parse
//! error the engine surfaces as an invalid payload.

use gridcap_capmath::SigningTerms;
use gridcap_core::{PlayerId, TeamCode, TransactionKind};
use serde::{Deserialize, Serialize};

/// Who a signing is for: a player already known to the league (an
/// unattached free agent) or a brand-new descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignTarget {
    /// Sign an existing player by id.
    Existing { player_id: PlayerId },
    /// Create the player as part of the signing.
    New {
        full_name: String,
        position: String,
    },
}

/// Payload for a signing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignPayload {
    pub target: SignTarget,
    pub terms: SigningTerms,
}

/// Payload for a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleasePayload {
    pub player_id: PlayerId,
    #[serde(default)]
    pub post_june_1: bool,
}

/// Payload for a trade. Pick compensation rides along untouched; picks are
/// carried, not valued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradePayload {
    pub player_ids: Vec<PlayerId>,
    pub partner_team_code: TeamCode,
    pub partner_player_ids: Vec<PlayerId>,
    #[serde(default)]
    pub pick_compensation: Vec<String>,
    #[serde(default)]
    pub post_june_1: bool,
}

/// A move payload, tagged by transaction kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MovePayload {
    Sign(SignPayload),
    Release(ReleasePayload),
    Trade(TradePayload),
}

impl MovePayload {
    /// The transaction kind this payload describes.
    pub fn kind(&self) -> TransactionKind {
        match self {
            MovePayload::Sign(_) => TransactionKind::Sign,
            MovePayload::Release(_) => TransactionKind::Release,
            MovePayload::Trade(_) => TransactionKind::Trade,
        }
    }
}
