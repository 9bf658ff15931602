use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// End of a round. Terminal for push consumers.
///
/// The state snapshot and the decision list are opaque here; the application
/// owns their schema, so neither is checked beyond being JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundComplete {
    pub game_state: Value,
    pub phase: String,
    pub decisions: Vec<Value>,
    pub round_summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Message;
    #[test]
    fn decisions_are_passed_through_untouched() {
        let text = r#"{"type":"round_complete","gameState":{},"phase":"round_over","decisions":[{"actor":"north","choice":"pass"},{"actor":"east","modelId":"m","reasoning":"","durationMs":1}],"roundSummary":"done"}"#;
        let Message::RoundComplete(round) = Message::decode(text).unwrap() else {
            panic!("expected round_complete");
        };
        assert_eq!(round.decisions.len(), 2);
        assert_eq!(round.decisions[0]["choice"], "pass");
        assert!(round.winner.is_none());
    }
    #[test]
    fn decisions_must_still_be_a_list() {
        let text = r#"{"type":"round_complete","gameState":{},"phase":"over","decisions":{},"roundSummary":"done"}"#;
        assert!(Message::decode(text).is_err());
    }
}
