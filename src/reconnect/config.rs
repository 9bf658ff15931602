use crate::*;
use std::time::Duration;

/// Retry policy for a [`super::Reconnector`].
#[derive(Debug, Clone, Copy)]
pub struct ReconnectConfig {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl ReconnectConfig {
    /// Backoff before the reconnect following `attempt` earlier failures.
    pub fn delay(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            max_attempts: RECONNECT_MAX_ATTEMPTS,
            base_delay: RECONNECT_BASE_DELAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn delays_double() {
        let config = ReconnectConfig::default();
        let delays = (0..3).map(|n| config.delay(n).as_millis()).collect::<Vec<_>>();
        assert_eq!(delays, vec![1000, 2000, 4000]);
    }
}
