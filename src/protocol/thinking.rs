use crate::*;
use serde::Deserialize;
use serde::Serialize;

/// A model has been asked to act and is deliberating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerThinking {
    pub actor: Actor,
    pub model_id: String,
    /// What the model is deciding, e.g. `"bid"` or `"play"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}
