//! Ephemeral TTL Store
//!
//! Process-local key-value store with per-entry expiry. Expiry is lazy:
//! an expired entry is purged the next time it is touched, and a read
//! never returns a value past its deadline. There is no background
//! sweeper; all state is lost on restart.
//!
//! Every operation takes the store lock exactly once, so read-modify-
//! write sequences ([`TtlStore::update`], [`TtlStore::remove_if`]) are
//! atomic with respect to concurrent callers.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> Entry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        now > self.expires_at
    }
}

/// Mutex-guarded map where every entry lives for the store's TTL.
pub struct TtlStore<V> {
    ttl: Duration,
    entries: Mutex<HashMap<String, Entry<V>>>,
}

impl<V: Clone> TtlStore<V> {
    /// Create a store whose entries expire `ttl` after their last write.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Configured time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Store a value, unconditionally overwriting any existing entry and
    /// restarting its TTL window.
    pub fn set(&self, key: impl Into<String>, value: V) {
        let expires_at = Instant::now() + self.ttl;
        self.lock().insert(key.into(), Entry { value, expires_at });
    }

    /// Get the value if present and unexpired. An expired entry is
    /// removed and reported as absent.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if entry.is_expired(now) => {
                entries.remove(key);
                None
            }
            Some(entry) => Some(entry.value.clone()),
            None => None,
        }
    }

    /// Remove the entry. Idempotent.
    pub fn remove(&self, key: &str) {
        self.lock().remove(key);
    }

    /// Atomic read-modify-write: `f` receives the live value (or `None`),
    /// and its result is stored with a fresh TTL window and returned.
    ///
    /// Single lock acquisition, so concurrent updates to the same key
    /// never lose a write.
    pub fn update<F>(&self, key: &str, f: F) -> V
    where
        F: FnOnce(Option<&V>) -> V,
    {
        let now = Instant::now();
        let mut entries = self.lock();

        let current = entries.get(key).filter(|e| !e.is_expired(now));
        let value = f(current.map(|e| &e.value));

        entries.insert(
            key.to_string(),
            Entry {
                value: value.clone(),
                expires_at: now + self.ttl,
            },
        );
        value
    }

    /// Atomic compare-and-consume: runs `pred` against the live value and
    /// removes the entry only when `pred` returns `true`. Returns the
    /// predicate result, or `false` when the entry is absent or expired.
    ///
    /// A `false` predicate leaves the entry untouched.
    pub fn remove_if<F>(&self, key: &str, pred: F) -> bool
    where
        F: FnOnce(&V) -> bool,
    {
        let now = Instant::now();
        let mut entries = self.lock();

        match entries.get(key) {
            Some(entry) if entry.is_expired(now) => {
                entries.remove(key);
                false
            }
            Some(entry) => {
                if pred(&entry.value) {
                    entries.remove(key);
                    true
                } else {
                    false
                }
            }
            None => false,
        }
    }

    /// Number of entries, including any not yet lazily purged.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the store holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry<V>>> {
        // A panic while holding the lock leaves only ephemeral data behind;
        // recover the guard rather than poisoning every later request.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    const SHORT_TTL: Duration = Duration::from_millis(20);

    #[test]
    fn test_set_get_roundtrip() {
        let store = TtlStore::new(Duration::from_secs(60));
        store.set("k", 42);
        assert_eq!(store.get("k"), Some(42));
    }

    #[test]
    fn test_get_absent() {
        let store: TtlStore<i32> = TtlStore::new(Duration::from_secs(60));
        assert_eq!(store.get("missing"), None);
    }

    #[test]
    fn test_set_overwrites() {
        let store = TtlStore::new(Duration::from_secs(60));
        store.set("k", 1);
        store.set("k", 2);
        assert_eq!(store.get("k"), Some(2));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_expired_entry_is_absent_and_purged() {
        let store = TtlStore::new(SHORT_TTL);
        store.set("k", 42);
        thread::sleep(SHORT_TTL * 2);
        assert_eq!(store.get("k"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_restarts_ttl_window() {
        let store = TtlStore::new(SHORT_TTL * 3);
        store.set("k", 1);
        thread::sleep(SHORT_TTL * 2);
        store.set("k", 2);
        thread::sleep(SHORT_TTL * 2);
        // Second write restarted the window, so the entry is still live.
        assert_eq!(store.get("k"), Some(2));
    }

    #[test]
    fn test_remove_idempotent() {
        let store = TtlStore::new(Duration::from_secs(60));
        store.set("k", 1);
        store.remove("k");
        store.remove("k");
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn test_update_counts_from_absent() {
        let store: TtlStore<u32> = TtlStore::new(Duration::from_secs(60));
        let n = store.update("k", |cur| cur.copied().unwrap_or(0) + 1);
        assert_eq!(n, 1);
        let n = store.update("k", |cur| cur.copied().unwrap_or(0) + 1);
        assert_eq!(n, 2);
    }

    #[test]
    fn test_update_ignores_expired_value() {
        let store: TtlStore<u32> = TtlStore::new(SHORT_TTL);
        store.set("k", 5);
        thread::sleep(SHORT_TTL * 2);
        let n = store.update("k", |cur| cur.copied().unwrap_or(0) + 1);
        assert_eq!(n, 1);
    }

    #[test]
    fn test_update_no_lost_increments() {
        use std::sync::Arc;

        let store: Arc<TtlStore<u32>> = Arc::new(TtlStore::new(Duration::from_secs(60)));
        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    store.update("k", |cur| cur.copied().unwrap_or(0) + 1);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.get("k"), Some(800));
    }

    #[test]
    fn test_remove_if_consumes_on_match() {
        let store = TtlStore::new(Duration::from_secs(60));
        store.set("k", "answer".to_string());

        assert!(!store.remove_if("k", |v| v == "wrong"));
        // Failed predicate leaves the entry in place.
        assert_eq!(store.get("k"), Some("answer".to_string()));

        assert!(store.remove_if("k", |v| v == "answer"));
        // Matched predicate consumed it.
        assert!(!store.remove_if("k", |v| v == "answer"));
    }

    #[test]
    fn test_remove_if_expired() {
        let store = TtlStore::new(SHORT_TTL);
        store.set("k", "answer".to_string());
        thread::sleep(SHORT_TTL * 2);
        assert!(!store.remove_if("k", |v| v == "answer"));
        assert!(store.is_empty());
    }
}
