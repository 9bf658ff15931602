use super::*;
use crate::protocol::Message;
use anyhow::Context;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// A short bid-then-play round, one protocol message per line.
const DEMO: &str = r#"
{"type":"player_thinking","actor":"north","modelId":"demo","action":"bid"}
{"type":"reasoning_token","actor":"north","token":"Two bowers "}
{"type":"reasoning_token","actor":"north","token":"in hand, "}
{"type":"reasoning_token","actor":"north","token":"order it up."}
{"type":"decision_made","actor":"north","modelId":"demo","reasoning":"Two bowers in hand, order it up.","durationMs":640,"action":"order_up","suit":"hearts","goingAlone":false}
{"type":"player_thinking","actor":"east","modelId":"demo","action":"play"}
{"type":"illegal_attempt","actor":"east","modelId":"demo","attemptedChoice":"AS","isFallback":false}
{"type":"reasoning_token","actor":"east","token":"Must follow hearts."}
{"type":"decision_made","actor":"east","modelId":"demo","reasoning":"Must follow hearts.","durationMs":410,"card":"9H","illegalAttempt":"AS"}
{"type":"round_complete","gameState":{"trump":"hearts","score":[1,0]},"phase":"round_over","decisions":[],"roundSummary":"North-South take the round","winner":"ns"}
"#;

/// Producer replaying a fixed script of messages at a steady pace.
#[derive(Debug, Clone)]
pub struct Replay {
    messages: Vec<Message>,
    delay: Duration,
}

impl Replay {
    pub fn new(messages: Vec<Message>, delay: Duration) -> Self {
        Self { messages, delay }
    }
    /// Built-in round used when no script is configured.
    pub fn demo(delay: Duration) -> Self {
        let messages = DEMO
            .lines()
            .filter_map(|line| Message::decode(line).ok())
            .collect();
        Self::new(messages, delay)
    }
    pub fn load(path: &Path, delay: Duration) -> anyhow::Result<Self> {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))
            .and_then(|text| Self::parse(&text, delay))
            .inspect(|r| log::info!("[hosting] loaded {} messages from {}", r.len(), path.display()))
    }
    /// One message per non-blank line. Any undecodable line fails the whole script.
    pub fn parse(text: &str, delay: Duration) -> anyhow::Result<Self> {
        text.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| Message::decode(line).with_context(|| format!("line {}", i + 1)))
            .collect::<anyhow::Result<Vec<_>>>()
            .map(|messages| Self::new(messages, delay))
    }
    pub fn len(&self) -> usize {
        self.messages.len()
    }
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[async_trait::async_trait]
impl Producer for Replay {
    async fn play(&self, _: Value, tx: UnboundedSender<Message>) -> anyhow::Result<()> {
        for message in self.messages.iter().cloned() {
            tokio::time::sleep(self.delay).await;
            if tx.send(message).is_err() {
                log::debug!("[hosting] consumer left mid-round");
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn demo_is_one_complete_round() {
        let demo = Replay::demo(Duration::ZERO);
        assert_eq!(demo.len(), 10);
        assert!(demo.messages.last().unwrap().is_terminal());
        assert_eq!(demo.messages.iter().filter(|m| m.is_terminal()).count(), 1);
    }
    #[test]
    fn bad_line_is_reported_with_its_number() {
        let text = "{\"type\":\"error\",\"message\":\"x\"}\n\n{\"type\":\"huh\"}\n";
        let err = Replay::parse(text, Duration::ZERO).unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }
    #[test]
    fn missing_file_fails() {
        assert!(Replay::load(Path::new("/nonexistent/round.jsonl"), Duration::ZERO).is_err());
    }
    #[tokio::test(start_paused = true)]
    async fn plays_in_order_with_pacing() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let start = tokio::time::Instant::now();
        Replay::demo(Duration::from_millis(50))
            .play(Value::Null, tx)
            .await
            .unwrap();
        assert_eq!(start.elapsed(), Duration::from_millis(500));
        let mut kinds = Vec::new();
        while let Ok(message) = rx.try_recv() {
            kinds.push(message.kind());
        }
        assert_eq!(kinds.first(), Some(&Message::PLAYER_THINKING));
        assert_eq!(kinds.last(), Some(&Message::ROUND_COMPLETE));
    }
    #[tokio::test]
    async fn stops_when_consumer_leaves() {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        drop(rx);
        assert!(Replay::demo(Duration::ZERO).play(Value::Null, tx).await.is_ok());
    }
}
