use crate::protocol::Message;
use serde_json::Value;
use tokio::sync::mpsc::UnboundedSender;

/// Source of one round's messages.
///
/// The game engine and model layer implement this outside the crate. Each
/// call plays a single round described by `request`, sending messages in
/// order and ending with `round_complete`. A returned error is forwarded to
/// the consumer as a final `error` frame.
#[async_trait::async_trait]
pub trait Producer: Send + Sync {
    async fn play(&self, request: Value, tx: UnboundedSender<Message>) -> anyhow::Result<()>;
}
