use futures::stream::BoxStream;

/// Connection events surfaced by a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// The connection is established.
    Open,
    /// One pushed payload, still undecoded.
    Message(String),
    /// The connection failed. Nothing follows.
    Error(String),
}

/// Opens push connections.
///
/// Dropping the returned stream closes the underlying connection. A stream
/// that ends without an [`Signal::Error`] is treated as a dropped connection.
pub trait Transport: Send + Sync {
    fn open(&self, endpoint: &str) -> BoxStream<'static, Signal>;
}
