use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

/// Observable "is streaming" flag.
///
/// Counts live streams rather than holding a bool so that overlapping
/// streams on one [`super::Streamer`] cannot lower it for each other.
#[derive(Debug, Clone, Default)]
pub struct Activity(Arc<AtomicUsize>);

impl Activity {
    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::SeqCst) > 0
    }
    pub fn raise(&self) -> Busy {
        self.0.fetch_add(1, Ordering::SeqCst);
        Busy(self.0.clone())
    }
}

/// Held by one stream for its whole life; dropping it lowers the flag on
/// every exit path, cancellation included.
#[derive(Debug)]
pub struct Busy(Arc<AtomicUsize>);

impl Drop for Busy {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn overlapping_guards() {
        let activity = Activity::default();
        let a = activity.raise();
        let b = activity.raise();
        drop(a);
        assert!(activity.is_active());
        drop(b);
        assert!(!activity.is_active());
    }
}
