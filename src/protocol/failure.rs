use serde::Deserialize;
use serde::Serialize;

/// Producer-side failure, delivered as an ordinary message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub message: String,
}
