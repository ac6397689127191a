//! Lockout after repeated sign-in failures.
//!
//! State is in-memory and per process. Keys are normalized emails. Failures
//! count within a window of one lockout period from the first failure, and
//! stale entries are pruned once the table reaches its size limit.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// Failures within one window that trigger a lockout.
pub const MAX_FAILURES: u32 = 5;
/// How long a locked key stays locked, and the length of the failure window.
pub const LOCKOUT: Duration = Duration::from_secs(15 * 60);
/// Keys tracked at once before new keys stop being counted.
pub const MAX_TRACKED_KEYS: usize = 10_000;

#[derive(Debug, Clone, Copy)]
struct Attempts {
    failures: u32,
    window_start: Instant,
    locked_until: Option<Instant>,
}

impl Attempts {
    fn new(now: Instant) -> Self {
        Self {
            failures: 0,
            window_start: now,
            locked_until: None,
        }
    }

    /// Nothing left to enforce: the lockout ran out, or the window closed.
    fn is_stale(&self, now: Instant, window: Duration) -> bool {
        match self.locked_until {
            Some(until) => until <= now,
            None => now.saturating_duration_since(self.window_start) >= window,
        }
    }
}

/// Tracks failed sign-ins per key.
#[derive(Debug)]
pub struct LoginThrottle {
    max_failures: u32,
    lockout: Duration,
    max_keys: usize,
    attempts: Mutex<HashMap<String, Attempts>>,
}

impl Default for LoginThrottle {
    fn default() -> Self {
        Self::new(MAX_FAILURES, LOCKOUT)
    }
}

impl LoginThrottle {
    pub fn new(max_failures: u32, lockout: Duration) -> Self {
        Self {
            max_failures: max_failures.max(1),
            lockout,
            max_keys: MAX_TRACKED_KEYS,
            attempts: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_max_keys(mut self, max_keys: usize) -> Self {
        self.max_keys = max_keys.max(1);
        self
    }

    /// Time left on the key's lockout, or `None` if it may try again.
    ///
    /// A stale entry is cleared here, so the key starts from zero.
    pub async fn check(&self, key: &str, now: Instant) -> Option<Duration> {
        let mut attempts = self.attempts.lock().await;
        let entry = attempts.get(key)?;
        if entry.is_stale(now, self.lockout) {
            attempts.remove(key);
            return None;
        }
        entry.locked_until.map(|until| until - now)
    }

    /// Count a failure; returns `true` when this failure locked the key.
    pub async fn record_failure(&self, key: &str, now: Instant) -> bool {
        let mut attempts = self.attempts.lock().await;

        if !attempts.contains_key(key) && attempts.len() >= self.max_keys {
            let before = attempts.len();
            attempts.retain(|_, a| !a.is_stale(now, self.lockout));
            tracing::debug!(pruned = before - attempts.len(), "Pruned sign-in throttle");
            if attempts.len() >= self.max_keys {
                tracing::warn!(tracked = attempts.len(), "Sign-in throttle full, failure not counted");
                return false;
            }
        }

        let entry = attempts
            .entry(key.to_string())
            .or_insert_with(|| Attempts::new(now));
        if entry.is_stale(now, self.lockout) {
            *entry = Attempts::new(now);
        }
        entry.failures += 1;
        if entry.failures >= self.max_failures {
            entry.locked_until = Some(now + self.lockout);
            entry.failures = 0;
            tracing::warn!(lockout_secs = self.lockout.as_secs(), "Sign-in locked");
            return true;
        }
        false
    }

    pub async fn record_success(&self, key: &str) {
        self.attempts.lock().await.remove(key);
    }

    /// Number of keys currently held.
    pub async fn tracked_keys(&self) -> usize {
        self.attempts.lock().await.len()
    }
}
