use crate::*;
use std::time::Duration;

/// Sizing for every bucket in a [`super::Buckets`] store.
#[derive(Debug, Clone, Copy)]
pub struct AdmissionConfig {
    pub capacity: Tokens,
    pub rate: Tokens,
    pub ttl: Duration,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            capacity: BUCKET_CAPACITY,
            rate: BUCKET_REFILL_RATE,
            ttl: BUCKET_TTL,
        }
    }
}
