//! Payload parsing for untyped callers.

use gridcap_audit::MovePayload;

use crate::error::{EngineError, EngineResult};

/// Parse a JSON move payload. Extra fields are ignored; missing required
/// fields fail fast with `InvalidPayload`, carrying the parser's own
/// message verbatim.
pub fn parse_payload(json: &str) -> EngineResult<MovePayload> {
    serde_json::from_str(json).map_err(|err| EngineError::InvalidPayload(err.to_string()))
}
