use super::*;
use crate::*;

/// Admission state for a single client key.
///
/// Tokens stay within `0..=capacity`. Refill is proportional to the wall-clock
/// time elapsed since the previous check and never runs backwards.
#[derive(Debug, Clone, Copy)]
pub struct Bucket {
    tokens: Tokens,
    capacity: Tokens,
    rate: Tokens,
    stamp: Seconds,
}

impl Bucket {
    /// A full bucket, as seen by a client's first request.
    pub fn new(config: &AdmissionConfig, now: Seconds) -> Self {
        Self {
            tokens: config.capacity,
            capacity: config.capacity,
            rate: config.rate,
            stamp: now,
        }
    }
    pub fn tokens(&self) -> Tokens {
        self.tokens
    }
    /// Time of the last refill.
    pub fn stamp(&self) -> Seconds {
        self.stamp
    }
    /// Refills for the time elapsed since the last check, then tries to
    /// spend one token.
    pub fn take(&mut self, now: Seconds) -> Verdict {
        self.refill(now);
        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            Verdict::Allow(self.quota())
        } else {
            Verdict::Reject {
                quota: self.quota(),
                retry: ((1.0 - self.tokens) / self.rate).ceil() as u64,
            }
        }
    }
    fn refill(&mut self, now: Seconds) {
        let elapsed = (now - self.stamp).max(0.0);
        self.tokens = (self.tokens + elapsed * self.rate).min(self.capacity);
        self.stamp = self.stamp.max(now);
    }
    fn quota(&self) -> Quota {
        Quota {
            limit: self.capacity as u64,
            remaining: self.tokens.floor() as u64,
            reset: (self.stamp + (self.capacity - self.tokens) / self.rate).ceil() as u64,
        }
    }
}
