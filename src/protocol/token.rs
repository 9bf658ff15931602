use crate::*;
use serde::Deserialize;
use serde::Serialize;

/// Incremental reasoning text. Consumers concatenate tokens per actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningToken {
    pub actor: Actor,
    pub token: String,
}
