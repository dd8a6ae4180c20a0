//! Login Attempt Tracking
//!
//! Failed logins are counted per identifier-plus-source pair inside a
//! sliding window: every failure restarts the window, so the counter
//! only clears after a quiet period or a successful login. The count
//! feeds the captcha gate.

use std::time::Duration;

use platform::ttl::TtlStore;

/// Sliding-window failed login counter
pub struct LoginAttemptTracker {
    store: TtlStore<u32>,
}

impl LoginAttemptTracker {
    pub fn new(window: Duration) -> Self {
        Self {
            store: TtlStore::new(window),
        }
    }

    /// Tracking key: identifier is case-folded so "Admin" and "admin"
    /// share a counter, while distinct sources stay isolated.
    pub fn key(identifier: &str, source: &str) -> String {
        format!("{}|{}", identifier.to_lowercase(), source)
    }

    /// Current count for the key, zero when absent or expired.
    pub fn attempts(&self, key: &str) -> u32 {
        self.store.get(key).unwrap_or(0)
    }

    /// Record a failure, returning the new count. Restarts the window.
    pub fn record_failure(&self, key: &str) -> u32 {
        self.store.update(key, |cur| cur.copied().unwrap_or(0) + 1)
    }

    /// Clear the counter after a successful login.
    pub fn reset(&self, key: &str) {
        self.store.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_key_is_case_insensitive_for_identifier() {
        assert_eq!(
            LoginAttemptTracker::key("Admin", "10.0.0.1"),
            LoginAttemptTracker::key("admin", "10.0.0.1")
        );
        assert_ne!(
            LoginAttemptTracker::key("admin", "10.0.0.1"),
            LoginAttemptTracker::key("admin", "10.0.0.2")
        );
    }

    #[test]
    fn test_counter_increments_and_resets() {
        let tracker = LoginAttemptTracker::new(Duration::from_secs(60));
        let key = LoginAttemptTracker::key("admin", "10.0.0.1");

        assert_eq!(tracker.attempts(&key), 0);
        assert_eq!(tracker.record_failure(&key), 1);
        assert_eq!(tracker.record_failure(&key), 2);
        assert_eq!(tracker.attempts(&key), 2);

        tracker.reset(&key);
        assert_eq!(tracker.attempts(&key), 0);
    }

    #[test]
    fn test_window_expires_counter() {
        let tracker = LoginAttemptTracker::new(Duration::from_millis(20));
        let key = LoginAttemptTracker::key("admin", "10.0.0.1");

        tracker.record_failure(&key);
        thread::sleep(Duration::from_millis(50));
        assert_eq!(tracker.attempts(&key), 0);
        // And a new failure starts from scratch.
        assert_eq!(tracker.record_failure(&key), 1);
    }
}
