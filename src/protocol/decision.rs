use super::*;
use crate::*;
use serde::Deserialize;
use serde::Serialize;

/// A model committed to a move.
///
/// The wire shape is flat: a played `card`, or a bid `action` with its
/// optional `suit` and `goingAlone`. [`DecisionMade::kind`] recovers which.
/// A decision carrying neither `card` nor `action` does not decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionMade {
    pub actor: Actor,
    pub model_id: String,
    pub reasoning: String,
    pub duration_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub going_alone: Option<bool>,
    /// The refused choice that preceded this one, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub illegal_attempt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_fallback: Option<bool>,
}

/// The move carried by a [`DecisionMade`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision<'a> {
    Play {
        card: &'a str,
    },
    Bid {
        action: &'a str,
        suit: Option<&'a str>,
        alone: bool,
    },
}

impl DecisionMade {
    pub fn kind(&self) -> Option<Decision<'_>> {
        match (self.card.as_deref(), self.action.as_deref()) {
            (Some(card), _) => Some(Decision::Play { card }),
            (None, Some(action)) => Some(Decision::Bid {
                action,
                suit: self.suit.as_deref(),
                alone: self.going_alone.unwrap_or(false),
            }),
            (None, None) => None,
        }
    }
    pub fn fallback(&self) -> bool {
        self.is_fallback.unwrap_or(false)
    }
    pub fn validate(&self) -> Result<(), ProtocolError> {
        self.kind()
            .map(|_| ())
            .ok_or_else(|| ProtocolError::malformed(Message::DECISION_MADE, "neither card nor bid action"))
    }
}
