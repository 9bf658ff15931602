/// Rate-limit figures reported to the client on every gated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    /// Bucket capacity.
    pub limit: u64,
    /// Whole tokens left after this request.
    pub remaining: u64,
    /// Epoch second at which the bucket is expected to be full again.
    pub reset: u64,
}

/// Outcome of one admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allow(Quota),
    Reject { quota: Quota, retry: u64 },
}

impl Verdict {
    pub const LIMIT: &'static str = "x-ratelimit-limit";
    pub const REMAINING: &'static str = "x-ratelimit-remaining";
    pub const RESET: &'static str = "x-ratelimit-reset";
    pub const RETRY_AFTER: &'static str = "retry-after";

    pub fn allowed(&self) -> bool {
        matches!(self, Self::Allow(_))
    }
    pub fn quota(&self) -> Quota {
        match self {
            Self::Allow(quota) => *quota,
            Self::Reject { quota, .. } => *quota,
        }
    }
    /// Seconds until at least one token is available, when rejected.
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Self::Allow(_) => None,
            Self::Reject { retry, .. } => Some(*retry),
        }
    }
    /// Response headers for this outcome. Rejections add `Retry-After`.
    pub fn headers(&self) -> Vec<(&'static str, u64)> {
        let quota = self.quota();
        let mut headers = vec![
            (Self::LIMIT, quota.limit),
            (Self::REMAINING, quota.remaining),
            (Self::RESET, quota.reset),
        ];
        if let Some(retry) = self.retry_after() {
            headers.push((Self::RETRY_AFTER, retry));
        }
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const QUOTA: Quota = Quota {
        limit: 60,
        remaining: 0,
        reset: 1_700_000_060,
    };
    #[test]
    fn allow_carries_three_headers() {
        let verdict = Verdict::Allow(QUOTA);
        assert!(verdict.allowed());
        assert_eq!(verdict.headers().len(), 3);
        assert!(verdict.retry_after().is_none());
    }
    #[test]
    fn reject_adds_retry_after() {
        let verdict = Verdict::Reject {
            quota: QUOTA,
            retry: 1,
        };
        assert!(!verdict.allowed());
        assert!(verdict.headers().contains(&(Verdict::RETRY_AFTER, 1)));
    }
}
