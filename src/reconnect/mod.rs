//! Push-based stream client with exponential-backoff reconnection.
//!
//! ```text
//! disconnected --connect()--> connecting --open--> connected
//! connected --transport error--> error --backoff--> connecting
//!                                error --attempts exhausted--> disconnected
//! connected --round_complete--> disconnected
//! any --disconnect()--> disconnected
//! ```
//!
//! - [`Reconnector`]: The client: one live connection, retry policy, reasoning accumulation
//! - [`Transport`]: Seam producing a [`Signal`] stream per connection
//! - [`SseTransport`]: `text/event-stream` over HTTP
mod config;
mod reconnector;
mod sse;
mod state;
mod transport;

pub use config::*;
pub use reconnector::*;
pub use sse::*;
pub use state::*;
pub use transport::*;
