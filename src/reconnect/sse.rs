use super::*;
use crate::decoder::Frame;
use crate::decoder::LineBuffer;
use futures::StreamExt;
use futures::stream::BoxStream;
use reqwest::header::ACCEPT;

/// `text/event-stream` transport over HTTP GET.
///
/// Each `data: ` line is surfaced as one [`Signal::Message`]; other SSE
/// fields are dropped.
#[derive(Debug, Clone, Default)]
pub struct SseTransport {
    client: reqwest::Client,
}

impl SseTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for SseTransport {
    fn open(&self, endpoint: &str) -> BoxStream<'static, Signal> {
        let request = self.client.get(endpoint).header(ACCEPT, "text/event-stream");
        Box::pin(async_stream::stream! {
            let response = match request.send().await {
                Ok(response) if response.status().is_success() => response,
                Ok(response) => {
                    yield Signal::Error(format!("status {}", response.status()));
                    return;
                }
                Err(e) => {
                    yield Signal::Error(e.to_string());
                    return;
                }
            };
            yield Signal::Open;
            let mut body = response.bytes_stream();
            let mut lines = LineBuffer::default();
            while let Some(chunk) = body.next().await {
                match chunk {
                    Ok(chunk) => {
                        for line in lines.push(&chunk) {
                            if let Frame::Data(payload) = Frame::from(line.as_str()) {
                                yield Signal::Message(payload.to_owned());
                            }
                        }
                    }
                    Err(e) => {
                        yield Signal::Error(e.to_string());
                        return;
                    }
                }
            }
        })
    }
}
