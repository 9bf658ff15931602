//! actix-web surface for the decision stream.
//!
//! - [`Server`]: HTTP server with CORS, access logging and admission control
//! - [`Producer`]: Seam for whatever generates a round's messages
//! - [`Replay`]: Producer replaying a recorded round
//! - [`Config`]: Command line and environment settings
mod config;
mod handlers;
mod producer;
mod replay;
mod server;

pub use config::*;
pub use handlers::*;
pub use producer::*;
pub use replay::*;
pub use server::*;
