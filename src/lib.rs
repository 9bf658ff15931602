//! Real-time decision streaming for the LLM card-game arena.
//!
//! The arena's game engine and model layer run elsewhere. This crate carries
//! their play-by-play from producer to consumer:
//!
//! - [`admission`]: Per-client token buckets gating the `/api` surface
//! - [`protocol`]: The closed set of [`Message`](protocol::Message) variants and SSE framing
//! - [`decoder`]: Pull-based decoding of a chunked byte stream into messages
//! - [`reconnect`]: Push-based client with exponential-backoff reconnection
//! - [`hosting`]: actix-web server exposing the streaming endpoint
pub mod admission;
pub mod decoder;
#[cfg(feature = "server")]
pub mod hosting;
pub mod protocol;
pub mod reconnect;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Seat or participant whose reasoning text is accumulated.
pub type Actor = String;
/// Fractional admission tokens.
pub type Tokens = f64;
/// Wall-clock seconds since the Unix epoch.
pub type Seconds = f64;

use std::time::Duration;

// ============================================================================
// ADMISSION CONTROL
// Continuous token-bucket refill, evaluated lazily at check time.
// ============================================================================
/// Burst size: requests a fresh client may issue back to back.
pub const BUCKET_CAPACITY: Tokens = 60.0;
/// Tokens recovered per second of inactivity.
pub const BUCKET_REFILL_RATE: Tokens = 1.0;
/// Idle time after which a bucket is evicted. Must be at least
/// capacity / rate so an evicted bucket would have been full anyway.
pub const BUCKET_TTL: Duration = Duration::from_secs(600);
/// Interval between eviction sweeps.
pub const BUCKET_SWEEP_INTERVAL: Duration = Duration::from_secs(60);
/// Namespace gated by admission control.
pub const API_PREFIX: &str = "/api";
/// Health probe, exempt from admission control.
pub const HEALTH_PATH: &str = "/api/health";

// ============================================================================
// FRAMING
// ============================================================================
/// Prefix marking a data frame line.
pub const FRAME_PREFIX: &str = "data: ";

// ============================================================================
// RECONNECTION
// Delay before attempt n is RECONNECT_BASE_DELAY * 2^n.
// ============================================================================
/// Reconnects attempted before giving up.
pub const RECONNECT_MAX_ATTEMPTS: u32 = 3;
/// Delay before the first reconnect.
pub const RECONNECT_BASE_DELAY: Duration = Duration::from_millis(1000);

// ============================================================================
// HOSTING
// ============================================================================
/// Address the server binds when BIND_ADDR is unset.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
/// actix-web worker threads.
pub const DEFAULT_WORKERS: usize = 4;
/// Pause between frames when replaying a recorded round.
pub const REPLAY_FRAME_DELAY: Duration = Duration::from_millis(50);

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Current wall-clock time in fractional epoch seconds.
pub fn now() -> Seconds {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default()
}

/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() -> anyhow::Result<()> {
    std::fs::create_dir_all("logs")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", now() as u64))?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file])?;
    Ok(())
}
