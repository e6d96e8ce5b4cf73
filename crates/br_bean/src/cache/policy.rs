use alloc::boxed::Box;
use core::fmt::Debug;
use core::hash::Hash;
use core::time::Duration;

use serde::{Deserialize, Serialize};

use super::{ExpiringCache, MetadataCache, UnboundedCache};

/// How long resolved metadata is retained.
///
/// # Examples
///
/// ```
/// use br_bean::cache::CachePolicy;
///
/// let policy: CachePolicy =
///     serde_json::from_str(r#"{ "kind": "expire_after_access", "ttl_ms": 60000 }"#).unwrap();
///
/// assert_eq!(
///     policy,
///     CachePolicy::ExpireAfterAccess { ttl_ms: 60_000, max_entries: None },
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CachePolicy {
    /// Entries live as long as the engine.
    #[default]
    Unbounded,
    /// Entries expire `ttl_ms` milliseconds after their last access.
    ExpireAfterAccess {
        ttl_ms: u64,
        #[serde(default)]
        max_entries: Option<usize>,
    },
}

impl CachePolicy {
    /// Expire-after-access with no capacity bound.
    pub fn expire_after_access(ttl: Duration) -> Self {
        Self::ExpireAfterAccess {
            ttl_ms: u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX),
            max_entries: None,
        }
    }

    /// Builds an empty cache following this policy.
    pub fn build<K, V>(&self) -> Box<dyn MetadataCache<K, V>>
    where
        K: Eq + Hash + Debug + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        match *self {
            Self::Unbounded => Box::new(UnboundedCache::new()),
            Self::ExpireAfterAccess {
                ttl_ms,
                max_entries,
            } => Box::new(ExpiringCache::new(
                Duration::from_millis(ttl_ms),
                max_entries,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_is_the_default() {
        let policy: CachePolicy = serde_json::from_str(r#"{ "kind": "unbounded" }"#).unwrap();
        assert_eq!(policy, CachePolicy::default());

        let cache = policy.build::<u8, u8>();
        assert_eq!(cache.get_or_compute(1, &mut |k| Ok(k + 1)).unwrap(), 2);
    }

    #[test]
    fn expiring_policy_keeps_capacity() {
        let policy = CachePolicy::ExpireAfterAccess {
            ttl_ms: 1_000,
            max_entries: Some(1),
        };
        let json = serde_json::to_string(&policy).unwrap();
        assert_eq!(
            json,
            r#"{"kind":"expire_after_access","ttl_ms":1000,"max_entries":1}"#
        );

        let cache = policy.build::<u8, u8>();
        cache.get_or_compute(1, &mut |k| Ok(*k)).unwrap();
        cache.get_or_compute(2, &mut |k| Ok(*k)).unwrap();
        assert_eq!(cache.len(), 1);

        assert_eq!(
            CachePolicy::expire_after_access(Duration::from_secs(2)),
            CachePolicy::ExpireAfterAccess {
                ttl_ms: 2_000,
                max_entries: None
            }
        );
    }
}
