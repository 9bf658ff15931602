use super::*;
use bytes::Bytes;
use futures::StreamExt;
use futures::stream::BoxStream;

/// Raw response body: chunks in arrival order.
pub type Body = BoxStream<'static, Result<Bytes, StreamError>>;

/// What to ask the producer for.
#[derive(Debug, Clone)]
pub struct Request {
    pub url: String,
    pub body: serde_json::Value,
}

/// Status line and body of a producer response.
pub struct Response {
    pub status: u16,
    pub body: Option<Body>,
}

impl Response {
    pub fn success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The producer side of a pull stream.
#[async_trait::async_trait]
pub trait Upstream: Send + Sync {
    async fn open(&self, request: &Request) -> Result<Response, StreamError>;
}

/// Producer reached over HTTP: POSTs the request body as JSON and
/// streams the response body unbuffered.
#[derive(Debug, Clone, Default)]
pub struct HttpUpstream {
    client: reqwest::Client,
}

impl HttpUpstream {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Upstream for HttpUpstream {
    async fn open(&self, request: &Request) -> Result<Response, StreamError> {
        let response = self
            .client
            .post(&request.url)
            .json(&request.body)
            .send()
            .await
            .map_err(StreamError::transport)?;
        Ok(Response {
            status: response.status().as_u16(),
            body: Some(
                response
                    .bytes_stream()
                    .map(|chunk| chunk.map_err(StreamError::transport))
                    .boxed(),
            ),
        })
    }
}
