use super::*;
use crate::admission::AdmissionConfig;
use crate::*;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Serve the arena decision stream", long_about = None)]
pub struct Config {
    #[arg(long, env = "BIND_ADDR", default_value = DEFAULT_BIND_ADDR)]
    pub bind: String,
    #[arg(long, env = "ARENA_WORKERS", default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,
    /// JSONL file of protocol messages to replay; a built-in round otherwise.
    #[arg(long, env = "ARENA_REPLAY")]
    pub replay: Option<PathBuf>,
    #[arg(long = "frame-delay-ms", env = "ARENA_FRAME_DELAY_MS", default_value_t = REPLAY_FRAME_DELAY.as_millis() as u64)]
    pub delay: u64,
    #[arg(long, env = "ARENA_BUCKET_CAPACITY", default_value_t = BUCKET_CAPACITY)]
    pub capacity: Tokens,
    #[arg(long, env = "ARENA_BUCKET_RATE", default_value_t = BUCKET_REFILL_RATE)]
    pub rate: Tokens,
}

impl Config {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay)
    }
    /// Bucket sizing. The TTL is stretched if needed so an evicted bucket
    /// is always one that would have refilled completely.
    pub fn admission(&self) -> anyhow::Result<AdmissionConfig> {
        if !(self.capacity >= 1.0 && self.rate > 0.0) {
            anyhow::bail!("bucket capacity must be >= 1 and rate > 0");
        }
        Ok(AdmissionConfig {
            capacity: self.capacity,
            rate: self.rate,
            ttl: BUCKET_TTL.max(Duration::from_secs_f64(self.capacity / self.rate)),
        })
    }
    /// The producer this server streams from.
    pub fn producer(&self) -> anyhow::Result<Replay> {
        match self.replay {
            Some(ref path) => Replay::load(path, self.delay()),
            None => Ok(Replay::demo(self.delay())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn defaults_match_constants() {
        let config = Config::try_parse_from(["arena"]).unwrap();
        assert_eq!(config.workers, DEFAULT_WORKERS);
        assert_eq!(config.delay(), REPLAY_FRAME_DELAY);
        let admission = config.admission().unwrap();
        assert_eq!(admission.capacity, BUCKET_CAPACITY);
        assert_eq!(admission.ttl, BUCKET_TTL);
    }
    #[test]
    fn slow_refill_stretches_ttl() {
        let config = Config::try_parse_from(["arena", "--capacity", "100", "--rate", "0.1"]).unwrap();
        assert_eq!(config.admission().unwrap().ttl, Duration::from_secs(1000));
    }
    #[test]
    fn degenerate_buckets_are_refused() {
        let config = Config::try_parse_from(["arena", "--rate", "0"]).unwrap();
        assert!(config.admission().is_err());
        let config = Config::try_parse_from(["arena", "--capacity", "0.5"]).unwrap();
        assert!(config.admission().is_err());
    }
}
