//! # Per-client rate limiting
//!
//! Fixed window per client key (the peer IP). Every `/api` route counts the
//! same, reads and writes alike.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub max_requests: u32,
    pub window: Duration,
}

impl Default for RateLimitPolicy {
    /// 100 requests per 15 minutes.
    fn default() -> Self {
        Self {
            max_requests: 100,
            window: Duration::from_secs(15 * 60),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed { remaining: u32 },
    Limited { retry_after: Duration },
}

struct Window {
    started: Instant,
    count: u32,
}

pub struct RateLimiter {
    policy: RateLimitPolicy,
    windows: DashMap<String, Window>,
}

impl RateLimiter {
    pub fn new(policy: RateLimitPolicy) -> Self {
        Self {
            policy,
            windows: DashMap::new(),
        }
    }

    pub fn policy(&self) -> RateLimitPolicy {
        self.policy
    }

    /// Counts one request for `key` and says whether it may proceed.
    pub fn check(&self, key: &str, now: Instant) -> Decision {
        let mut window = self.windows.entry(key.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });

        let elapsed = now.saturating_duration_since(window.started);
        if elapsed >= self.policy.window {
            window.started = now;
            window.count = 0;
        }

        if window.count >= self.policy.max_requests {
            let retry_after = self
                .policy
                .window
                .saturating_sub(now.saturating_duration_since(window.started));
            return Decision::Limited { retry_after };
        }

        window.count += 1;
        Decision::Allowed {
            remaining: self.policy.max_requests - window.count,
        }
    }

    /// Drops windows that have fully elapsed.
    pub fn sweep(&self, now: Instant) {
        let window = self.policy.window;
        self.windows
            .retain(|_, w| now.saturating_duration_since(w.started) < window);
    }

    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }

    /// Periodically sweeps expired windows. Must be called inside a runtime.
    pub fn spawn_sweeper(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let limiter = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(limiter.policy.window);
            loop {
                interval.tick().await;
                limiter.sweep(Instant::now());
                tracing::debug!(clients = limiter.tracked_clients(), "rate limit windows swept");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max: u32) -> RateLimiter {
        RateLimiter::new(RateLimitPolicy {
            max_requests: max,
            window: Duration::from_secs(60),
        })
    }

    #[test]
    fn allows_up_to_the_ceiling() {
        let limiter = limiter(2);
        let now = Instant::now();
        assert_eq!(limiter.check("1.2.3.4", now), Decision::Allowed { remaining: 1 });
        assert_eq!(limiter.check("1.2.3.4", now), Decision::Allowed { remaining: 0 });
        assert!(matches!(limiter.check("1.2.3.4", now), Decision::Limited { .. }));
    }

    #[test]
    fn clients_are_counted_separately() {
        let limiter = limiter(1);
        let now = Instant::now();
        assert!(matches!(limiter.check("a", now), Decision::Allowed { .. }));
        assert!(matches!(limiter.check("b", now), Decision::Allowed { .. }));
        assert!(matches!(limiter.check("a", now), Decision::Limited { .. }));
    }

    #[test]
    fn window_resets_after_it_elapses() {
        let limiter = limiter(1);
        let start = Instant::now();
        limiter.check("a", start);

        match limiter.check("a", start + Duration::from_secs(20)) {
            Decision::Limited { retry_after } => assert_eq!(retry_after, Duration::from_secs(40)),
            other => panic!("expected limit, got {other:?}"),
        }
        assert!(matches!(
            limiter.check("a", start + Duration::from_secs(61)),
            Decision::Allowed { .. }
        ));
    }

    #[test]
    fn sweep_forgets_expired_clients() {
        let limiter = limiter(5);
        let start = Instant::now();
        limiter.check("old", start);
        limiter.check("new", start + Duration::from_secs(50));

        limiter.sweep(start + Duration::from_secs(70));
        assert_eq!(limiter.tracked_clients(), 1);
    }
}
