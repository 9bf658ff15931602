use super::*;
use crate::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::RwLock;

type Slot = Arc<Mutex<Bucket>>;

/// Keyed bucket store shared by every request handler.
///
/// Checks for one key are serialized on that key's mutex, so two concurrent
/// requests can never both spend the last token. Checks for different keys
/// only share the map's read lock.
#[derive(Debug, Default)]
pub struct Buckets {
    config: AdmissionConfig,
    slots: RwLock<HashMap<String, Slot>>,
}

impl Buckets {
    pub fn new(config: AdmissionConfig) -> Self {
        Self {
            config,
            slots: RwLock::new(HashMap::new()),
        }
    }
    pub fn config(&self) -> &AdmissionConfig {
        &self.config
    }
    /// Admission check against the current wall clock.
    pub fn check(&self, key: &str) -> Verdict {
        self.check_at(key, now())
    }
    /// Admission check at an explicit time.
    pub fn check_at(&self, key: &str, now: Seconds) -> Verdict {
        self.slot(key, now)
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take(now)
    }
    /// Drops buckets idle for longer than the configured TTL.
    /// Buckets currently held by an in-flight check are kept.
    pub fn sweep(&self, now: Seconds) -> usize {
        let ttl = self.config.ttl.as_secs_f64();
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        let before = slots.len();
        slots.retain(|_, slot| {
            Arc::strong_count(slot) > 1
                || slot
                    .lock()
                    .map(|bucket| now - bucket.stamp() < ttl)
                    .unwrap_or(false)
        });
        before - slots.len()
    }
    pub fn len(&self) -> usize {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn slot(&self, key: &str, now: Seconds) -> Slot {
        if let Some(slot) = self
            .slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
        {
            return slot.clone();
        }
        self.slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key.to_owned())
            .or_insert_with(|| Arc::new(Mutex::new(Bucket::new(&self.config, now))))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const T0: Seconds = 1_700_000_000.0;
    #[test]
    fn sixty_then_throttled_then_recovers() {
        let buckets = Buckets::default();
        assert!((0..60).all(|_| buckets.check_at("10.0.0.1", T0).allowed()));
        let verdict = buckets.check_at("10.0.0.1", T0);
        let retry = verdict.retry_after().unwrap();
        assert!(retry > 0);
        assert!(buckets.check_at("10.0.0.1", T0 + retry as Seconds).allowed());
    }
    #[test]
    fn keys_are_independent() {
        let buckets = Buckets::default();
        (0..60).for_each(|_| {
            buckets.check_at("a", T0);
        });
        assert!(!buckets.check_at("a", T0).allowed());
        assert_eq!(buckets.check_at("b", T0).quota().remaining, 59);
        assert_eq!(buckets.len(), 2);
    }
    #[test]
    fn concurrent_checks_never_overspend() {
        let buckets = Arc::new(Buckets::default());
        let admitted = (0..8)
            .map(|_| {
                let buckets = buckets.clone();
                std::thread::spawn(move || {
                    (0..20)
                        .filter(|_| buckets.check_at("shared", T0).allowed())
                        .count()
                })
            })
            .collect::<Vec<_>>()
            .into_iter()
            .map(|h| h.join().unwrap())
            .sum::<usize>();
        assert_eq!(admitted, 60);
    }
    #[test]
    fn sweep_evicts_idle_buckets_only() {
        let buckets = Buckets::default();
        buckets.check_at("idle", T0);
        buckets.check_at("busy", T0 + 500.0);
        assert_eq!(buckets.sweep(T0 + 601.0), 1);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets.check_at("busy", T0 + 601.0).quota().remaining, 59);
    }
}
