use super::*;
use crate::*;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Background task evicting idle buckets on a fixed interval.
pub struct Sweeper;

impl Sweeper {
    pub fn spawn(buckets: Arc<Buckets>, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticks = tokio::time::interval(every);
            ticks.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                match buckets.sweep(now()) {
                    0 => continue,
                    n => log::debug!("[admission] evicted {} idle buckets, {} live", n, buckets.len()),
                }
            }
        })
    }
}
