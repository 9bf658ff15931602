use crate::*;
use serde::Deserialize;
use serde::Serialize;

/// A model proposed a move the rules engine refused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IllegalAttempt {
    pub actor: Actor,
    pub model_id: String,
    pub attempted_choice: String,
    /// Whether the engine substituted a fallback move.
    pub is_fallback: bool,
}
