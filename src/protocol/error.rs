/// Reasons a frame payload fails to decode into a [`super::Message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Not valid JSON, or not a JSON object.
    Syntax(String),
    /// No string `type` discriminant.
    Untagged,
    /// A `type` outside the closed variant set.
    Unknown(String),
    /// Known `type`, but the payload does not have that variant's shape.
    Malformed { kind: String, reason: String },
}

impl ProtocolError {
    pub fn malformed(kind: &str, reason: impl ToString) -> Self {
        Self::Malformed {
            kind: kind.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax(s) => write!(f, "invalid json: {}", s),
            Self::Untagged => write!(f, "missing type discriminant"),
            Self::Unknown(s) => write!(f, "unknown message type: {}", s),
            Self::Malformed { kind, reason } => write!(f, "malformed {}: {}", kind, reason),
        }
    }
}

impl std::error::Error for ProtocolError {}
