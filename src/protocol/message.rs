use super::*;
use crate::*;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// One event on the decision stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    PlayerThinking(PlayerThinking),
    ReasoningToken(ReasoningToken),
    IllegalAttempt(IllegalAttempt),
    DecisionMade(DecisionMade),
    RoundComplete(RoundComplete),
    Error(Failure),
}

impl Message {
    pub const PLAYER_THINKING: &'static str = "player_thinking";
    pub const REASONING_TOKEN: &'static str = "reasoning_token";
    pub const ILLEGAL_ATTEMPT: &'static str = "illegal_attempt";
    pub const DECISION_MADE: &'static str = "decision_made";
    pub const ROUND_COMPLETE: &'static str = "round_complete";
    pub const ERROR: &'static str = "error";

    /// Parses one frame payload. The discriminant is checked first and
    /// selects the only payload shape that will be accepted.
    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        let value = serde_json::from_str::<Value>(text)
            .map_err(|e| ProtocolError::Syntax(e.to_string()))?;
        let kind = value
            .as_object()
            .ok_or_else(|| ProtocolError::Syntax(String::from("expected an object")))?
            .get("type")
            .and_then(Value::as_str)
            .ok_or(ProtocolError::Untagged)?
            .to_owned();
        let message = match kind.as_str() {
            Self::PLAYER_THINKING => Self::PlayerThinking(Self::payload(&kind, value)?),
            Self::REASONING_TOKEN => Self::ReasoningToken(Self::payload(&kind, value)?),
            Self::ILLEGAL_ATTEMPT => Self::IllegalAttempt(Self::payload(&kind, value)?),
            Self::DECISION_MADE => Self::DecisionMade(Self::payload(&kind, value)?),
            Self::ROUND_COMPLETE => Self::RoundComplete(Self::payload(&kind, value)?),
            Self::ERROR => Self::Error(Self::payload(&kind, value)?),
            _ => return Err(ProtocolError::Unknown(kind)),
        };
        message.validate().map(|_| message)
    }
    /// JSON text of this message, tag included.
    pub fn encode(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(|e| ProtocolError::malformed(self.kind(), e))
    }
    /// This message as one SSE data frame, blank-line terminated.
    pub fn frame(&self) -> Result<String, ProtocolError> {
        self.encode()
            .map(|json| format!("{}{}\n\n", FRAME_PREFIX, json))
    }
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PlayerThinking(_) => Self::PLAYER_THINKING,
            Self::ReasoningToken(_) => Self::REASONING_TOKEN,
            Self::IllegalAttempt(_) => Self::ILLEGAL_ATTEMPT,
            Self::DecisionMade(_) => Self::DECISION_MADE,
            Self::RoundComplete(_) => Self::ROUND_COMPLETE,
            Self::Error(_) => Self::ERROR,
        }
    }
    pub fn actor(&self) -> Option<&str> {
        match self {
            Self::PlayerThinking(m) => Some(&m.actor),
            Self::ReasoningToken(m) => Some(&m.actor),
            Self::IllegalAttempt(m) => Some(&m.actor),
            Self::DecisionMade(m) => Some(&m.actor),
            Self::RoundComplete(_) | Self::Error(_) => None,
        }
    }
    /// No further messages follow for this round.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::RoundComplete(_))
    }
    pub fn error(message: impl ToString) -> Self {
        Self::Error(Failure {
            message: message.to_string(),
        })
    }
    pub fn token(actor: &str, token: &str) -> Self {
        Self::ReasoningToken(ReasoningToken {
            actor: actor.to_owned(),
            token: token.to_owned(),
        })
    }
    fn payload<T: DeserializeOwned>(kind: &str, value: Value) -> Result<T, ProtocolError> {
        serde_json::from_value(value).map_err(|e| ProtocolError::malformed(kind, e))
    }
    fn validate(&self) -> Result<(), ProtocolError> {
        match self {
            Self::DecisionMade(m) => m.validate(),
            _ => Ok(()),
        }
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PlayerThinking(m) => write!(f, "{} ({}) thinking", m.actor, m.model_id),
            Self::ReasoningToken(m) => write!(f, "{}: {:?}", m.actor, m.token),
            Self::IllegalAttempt(m) => write!(f, "{} tried {}", m.actor, m.attempted_choice),
            Self::DecisionMade(m) => match m.kind() {
                Some(Decision::Play { card }) => write!(f, "{} plays {}", m.actor, card),
                Some(Decision::Bid { action, .. }) => write!(f, "{} bids {}", m.actor, action),
                None => write!(f, "{} decided", m.actor),
            },
            Self::RoundComplete(m) => write!(f, "round complete: {}", m.round_summary),
            Self::Error(m) => write!(f, "error: {}", m.message),
        }
    }
}
