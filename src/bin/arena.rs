//! Arena stream server binary.
//!
//! Serves `POST /api/stream` as server-sent events behind per-client
//! admission control. Settings come from flags or the environment.

use arena::hosting::Config;
use arena::hosting::Server;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    arena::log()?;
    Server::run(Config::parse()).await
}
