use core::fmt::Debug;
use core::hash::Hash;
use core::num::NonZeroUsize;
use core::time::Duration;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use lru::LruCache;

use super::MetadataCache;
use crate::error::BeanError;

struct Entry<V> {
    value: V,
    last_access: Instant,
}

/// A cache whose entries expire after `ttl` without access.
///
/// With a capacity, inserting into a full cache evicts the entry that was
/// used least recently.
pub struct ExpiringCache<K: Hash + Eq, V> {
    // Every access promotes its entry, so LRU order is also `last_access` order.
    entries: Mutex<LruCache<K, Entry<V>>>,
    ttl: Duration,
    max_entries: Option<usize>,
}

impl<K: Hash + Eq, V> ExpiringCache<K, V> {
    /// Creates a cache with the given time-to-idle and optional capacity.
    ///
    /// A capacity of zero is treated as one.
    pub fn new(ttl: Duration, max_entries: Option<usize>) -> Self {
        let entries = match max_entries {
            Some(max) => LruCache::new(NonZeroUsize::new(max).unwrap_or(NonZeroUsize::MIN)),
            None => LruCache::unbounded(),
        };
        Self {
            entries: Mutex::new(entries),
            ttl,
            max_entries,
        }
    }

    #[inline]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    #[inline]
    pub fn max_entries(&self) -> Option<usize> {
        self.max_entries
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<K, Entry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn purge_expired<K: Hash + Eq, V>(
    entries: &mut LruCache<K, Entry<V>>,
    now: Instant,
    ttl: Duration,
) {
    let mut purged = 0_usize;
    while let Some((_, entry)) = entries.peek_lru() {
        if now.saturating_duration_since(entry.last_access) < ttl {
            break;
        }
        entries.pop_lru();
        purged += 1;
    }
    if purged > 0 {
        log::trace!("metadata cache expired {purged} entries");
    }
}

impl<K, V> MetadataCache<K, V> for ExpiringCache<K, V>
where
    K: Eq + Hash + Debug + Send + Sync,
    V: Clone + Send + Sync,
{
    fn get_or_compute(
        &self,
        key: K,
        loader: &mut dyn FnMut(&K) -> Result<V, BeanError>,
    ) -> Result<V, BeanError> {
        {
            let mut entries = self.lock();
            let now = Instant::now();
            purge_expired(&mut entries, now, self.ttl);
            if let Some(entry) = entries.get_mut(&key) {
                log::trace!("metadata cache hit: {key:?}");
                entry.last_access = now;
                return Ok(entry.value.clone());
            }
        }

        log::trace!("metadata cache miss: {key:?}");
        let value = loader(&key)?;

        let mut entries = self.lock();
        let now = Instant::now();
        if let Some(entry) = entries.get_mut(&key) {
            entry.last_access = now;
            return Ok(entry.value.clone());
        }

        let entry = Entry {
            value: value.clone(),
            last_access: now,
        };
        if let Some((evicted, _)) = entries.push(key, entry) {
            log::trace!("metadata cache evicted: {evicted:?}");
        }
        Ok(value)
    }

    fn len(&self) -> usize {
        let mut entries = self.lock();
        purge_expired(&mut entries, Instant::now(), self.ttl);
        entries.len()
    }

    fn clear(&self) {
        self.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    fn load(calls: &mut u32) -> impl FnMut(&&'static str) -> Result<String, BeanError> + '_ {
        move |key: &&'static str| {
            *calls += 1;
            Ok(key.to_uppercase())
        }
    }

    #[test]
    fn idle_entries_expire() {
        let cache = ExpiringCache::<&'static str, String>::new(Duration::from_millis(20), None);
        let mut calls = 0;

        assert_eq!(cache.get_or_compute("a", &mut load(&mut calls)).unwrap(), "A");
        assert_eq!(cache.get_or_compute("a", &mut load(&mut calls)).unwrap(), "A");
        assert_eq!(calls, 1);

        thread::sleep(Duration::from_millis(60));
        assert_eq!(cache.len(), 0);
        cache.get_or_compute("a", &mut load(&mut calls)).unwrap();
        assert_eq!(calls, 2);
    }

    #[test]
    fn capacity_evicts_least_recently_used() {
        let cache = ExpiringCache::<&'static str, String>::new(Duration::from_secs(3600), Some(2));
        let mut calls = 0;

        cache.get_or_compute("a", &mut load(&mut calls)).unwrap();
        cache.get_or_compute("b", &mut load(&mut calls)).unwrap();
        // Touch `a`, so `b` is now the oldest.
        cache.get_or_compute("a", &mut load(&mut calls)).unwrap();
        cache.get_or_compute("c", &mut load(&mut calls)).unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(calls, 3);

        cache.get_or_compute("a", &mut load(&mut calls)).unwrap();
        assert_eq!(calls, 3);
        cache.get_or_compute("b", &mut load(&mut calls)).unwrap();
        assert_eq!(calls, 4);
    }

    #[test]
    fn zero_capacity_keeps_the_latest_entry() {
        let cache = ExpiringCache::<&'static str, String>::new(Duration::from_secs(3600), Some(0));
        let mut calls = 0;

        cache.get_or_compute("a", &mut load(&mut calls)).unwrap();
        cache.get_or_compute("b", &mut load(&mut calls)).unwrap();
        assert_eq!(cache.len(), 1);
        cache.get_or_compute("b", &mut load(&mut calls)).unwrap();
        assert_eq!(calls, 2);
    }
}
