use super::*;
use crate::protocol::Message;
use crate::*;
use futures::StreamExt;
use futures::stream::BoxStream;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Caller hook invoked with every successfully decoded message.
pub type Callback = Arc<dyn Fn(&Message) + Send + Sync>;

/// Mutable connection state. Every signal and timer carries the generation
/// it was created under; anything from an older generation is ignored.
#[derive(Default)]
struct Link {
    state: ConnectionState,
    attempts: u32,
    generation: u64,
    endpoint: String,
    callback: Option<Callback>,
    handle: Option<JoinHandle<()>>,
    retry: Option<JoinHandle<()>>,
    reasoning: HashMap<Actor, String>,
}

/// Push-based stream client.
///
/// Holds at most one live connection. Transport failures are retried with
/// exponential backoff up to a fixed number of attempts; `round_complete`
/// ends the connection; `reasoning_token` text is accumulated per actor
/// until the caller clears it. Cheap to clone; clones share one connection.
///
/// Connecting spawns onto the ambient tokio runtime.
#[derive(Clone)]
pub struct Reconnector {
    transport: Arc<dyn Transport>,
    config: ReconnectConfig,
    link: Arc<Mutex<Link>>,
    state: Arc<watch::Sender<ConnectionState>>,
}

impl Reconnector {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self::with_config(transport, ReconnectConfig::default())
    }
    pub fn with_config(transport: impl Transport + 'static, config: ReconnectConfig) -> Self {
        Self {
            transport: Arc::new(transport),
            config,
            link: Arc::default(),
            state: Arc::new(watch::Sender::new(ConnectionState::Disconnected)),
        }
    }
    /// Replaces any existing connection with a fresh one to `endpoint`.
    pub fn connect(&self, endpoint: &str, callback: Option<Callback>) {
        let mut link = self.lock();
        self.teardown(&mut link);
        link.attempts = 0;
        link.endpoint = endpoint.to_owned();
        link.callback = callback;
        log::info!("[reconnect] connecting to {}", endpoint);
        self.open(&mut link);
    }
    /// Closes the live connection and cancels any pending retry. Idempotent.
    pub fn disconnect(&self) {
        self.teardown(&mut self.lock());
    }
    pub fn state(&self) -> ConnectionState {
        self.lock().state
    }
    /// Receiver observing every state transition.
    pub fn watch(&self) -> watch::Receiver<ConnectionState> {
        self.state.subscribe()
    }
    /// Reconnects attempted since the last successful open.
    pub fn attempts(&self) -> u32 {
        self.lock().attempts
    }
    /// Reasoning text accumulated for `actor` so far.
    pub fn accumulated(&self, actor: &str) -> Option<String> {
        self.lock().reasoning.get(actor).cloned()
    }
    pub fn snapshot(&self) -> HashMap<Actor, String> {
        self.lock().reasoning.clone()
    }
    /// Forgets all accumulated reasoning. Never called implicitly.
    pub fn clear_accumulated(&self) {
        self.lock().reasoning.clear();
    }

    fn lock(&self) -> MutexGuard<'_, Link> {
        self.link.lock().unwrap_or_else(PoisonError::into_inner)
    }
    fn transition(&self, link: &mut Link, state: ConnectionState) {
        if link.state != state {
            log::debug!("[reconnect] {} -> {}", link.state, state);
        }
        link.state = state;
        self.state.send_replace(state);
    }
    fn open(&self, link: &mut Link) {
        link.generation += 1;
        let signals = self.transport.open(&link.endpoint);
        self.transition(link, ConnectionState::Connecting);
        link.handle = Some(tokio::spawn(self.clone().pump(link.generation, signals)));
    }
    fn teardown(&self, link: &mut Link) {
        if let Some(handle) = link.handle.take() {
            handle.abort();
        }
        if let Some(retry) = link.retry.take() {
            retry.abort();
        }
        link.generation += 1;
        self.transition(link, ConnectionState::Disconnected);
    }
    async fn pump(self, generation: u64, mut signals: BoxStream<'static, Signal>) {
        while let Some(signal) = signals.next().await {
            if !self.receive(generation, signal) {
                return;
            }
        }
        self.receive(generation, Signal::Error(String::from("connection closed")));
    }
    /// Applies one signal. Returns whether the connection is still current.
    fn receive(&self, generation: u64, signal: Signal) -> bool {
        let mut link = self.lock();
        if link.generation != generation {
            return false;
        }
        match signal {
            Signal::Open => {
                link.attempts = 0;
                self.transition(&mut link, ConnectionState::Connected);
                true
            }
            Signal::Error(reason) => {
                self.fail(&mut link, &reason);
                false
            }
            Signal::Message(text) => match Message::decode(&text) {
                Err(e) => {
                    log::warn!("[reconnect] dropping message: {}", e);
                    true
                }
                Ok(message) => {
                    self.dispatch(&mut link, &message);
                    let callback = link.callback.clone();
                    drop(link);
                    if let Some(callback) = callback {
                        callback(&message);
                    }
                    self.lock().generation == generation
                }
            },
        }
    }
    fn dispatch(&self, link: &mut Link, message: &Message) {
        match message {
            Message::ReasoningToken(t) => link
                .reasoning
                .entry(t.actor.clone())
                .or_default()
                .push_str(&t.token),
            Message::RoundComplete(_) => {
                log::debug!("[reconnect] round complete, closing {}", link.endpoint);
                self.teardown(link);
            }
            Message::Error(failure) => {
                log::error!("[reconnect] producer error: {}", failure.message);
                self.transition(link, ConnectionState::Error);
            }
            Message::PlayerThinking(_) | Message::IllegalAttempt(_) | Message::DecisionMade(_) => {}
        }
    }
    fn fail(&self, link: &mut Link, reason: &str) {
        link.handle = None;
        self.transition(link, ConnectionState::Error);
        if link.attempts >= self.config.max_attempts {
            log::warn!(
                "[reconnect] giving up on {} after {} attempts: {}",
                link.endpoint,
                link.attempts,
                reason
            );
            self.teardown(link);
            return;
        }
        let delay = self.config.delay(link.attempts);
        link.attempts += 1;
        log::info!(
            "[reconnect] {} failed ({}), attempt {} in {:?}",
            link.endpoint,
            reason,
            link.attempts,
            delay
        );
        let generation = link.generation;
        let client = self.clone();
        link.retry = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            client.retry(generation);
        }));
    }
    fn retry(&self, generation: u64) {
        let mut link = self.lock();
        if link.generation != generation || link.state != ConnectionState::Error {
            return;
        }
        link.retry = None;
        self.open(&mut link);
    }
}
