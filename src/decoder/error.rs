/// Failures that end a stream. Individual malformed frames are not among
/// them; those are logged and skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// The producer answered with a non-success status.
    Http(u16),
    /// The response carried no readable body.
    NoBody,
    /// The transport failed while connecting or reading.
    Transport(String),
}

impl StreamError {
    pub fn transport(e: impl ToString) -> Self {
        Self::Transport(e.to_string())
    }
}

impl std::fmt::Display for StreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(status) => write!(f, "http error: status {}", status),
            Self::NoBody => write!(f, "response has no body"),
            Self::Transport(s) => write!(f, "transport error: {}", s),
        }
    }
}

impl std::error::Error for StreamError {}
