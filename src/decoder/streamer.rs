use super::*;
use crate::protocol::Message;
use futures::StreamExt;
use futures::stream::BoxStream;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

/// Lazy, finite, non-restartable sequence of decoded messages.
pub type Messages = BoxStream<'static, Result<Message, StreamError>>;

/// Pull-based consumer of a producer's framed byte stream.
///
/// Each call to [`Streamer::stream`] issues one request and yields one item
/// per valid data frame, in line order. Malformed frames are logged and
/// skipped, one warning each, and counted in [`Streamer::skipped`]. Setup
/// failures yield a single error before any message; a read failure yields
/// an error after everything decoded so far.
pub struct Streamer<U> {
    upstream: Arc<U>,
    activity: Activity,
    skipped: Arc<AtomicUsize>,
}

impl<U> Streamer<U>
where
    U: Upstream + 'static,
{
    pub fn new(upstream: U) -> Self {
        Self {
            upstream: Arc::new(upstream),
            activity: Activity::default(),
            skipped: Arc::default(),
        }
    }
    /// Shared handle on the "is streaming" flag.
    pub fn activity(&self) -> Activity {
        self.activity.clone()
    }
    pub fn is_streaming(&self) -> bool {
        self.activity.is_active()
    }
    /// Malformed frames dropped so far, across every stream.
    pub fn skipped(&self) -> usize {
        self.skipped.load(Ordering::Relaxed)
    }
    pub fn stream(&self, request: Request) -> Messages {
        let busy = self.activity.raise();
        let upstream = self.upstream.clone();
        let skipped = self.skipped.clone();
        let id = uuid::Uuid::now_v7();
        Box::pin(async_stream::stream! {
            let _busy = busy;
            log::debug!("[stream {}] opening {}", id, request.url);
            let response = match upstream.open(&request).await {
                Ok(response) => response,
                Err(e) => {
                    log::warn!("[stream {}] {}", id, e);
                    yield Err(e);
                    return;
                }
            };
            if !response.success() {
                log::warn!("[stream {}] upstream answered {}", id, response.status);
                yield Err(StreamError::Http(response.status));
                return;
            }
            let Some(mut body) = response.body else {
                yield Err(StreamError::NoBody);
                return;
            };
            let mut lines = LineBuffer::default();
            let mut count = 0usize;
            while let Some(chunk) = body.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        log::warn!("[stream {}] read failed after {} messages: {}", id, count, e);
                        yield Err(e);
                        return;
                    }
                };
                for line in lines.push(&chunk) {
                    let Frame::Data(payload) = Frame::from(line.as_str()) else {
                        continue;
                    };
                    match Message::decode(payload) {
                        Ok(message) => {
                            count += 1;
                            yield Ok(message);
                        }
                        Err(e) => {
                            skipped.fetch_add(1, Ordering::Relaxed);
                            log::warn!("[stream {}] skipping frame: {}", id, e);
                        }
                    }
                }
            }
            log::debug!("[stream {}] finished with {} messages", id, count);
        })
    }
}
