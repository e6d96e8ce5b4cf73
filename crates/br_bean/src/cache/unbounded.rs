use core::fmt::Debug;
use core::hash::Hash;
use std::sync::{PoisonError, RwLock};

use br_utils::hash::HashMap;

use super::MetadataCache;
use crate::error::BeanError;

/// A cache whose entries are never evicted.
pub struct UnboundedCache<K, V> {
    map: RwLock<HashMap<K, V>>,
}

impl<K, V> UnboundedCache<K, V> {
    #[inline]
    pub fn new() -> Self {
        Self {
            map: RwLock::new(HashMap::default()),
        }
    }
}

impl<K, V> Default for UnboundedCache<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> MetadataCache<K, V> for UnboundedCache<K, V>
where
    K: Eq + Hash + Debug + Send + Sync,
    V: Clone + Send + Sync,
{
    fn get_or_compute(
        &self,
        key: K,
        loader: &mut dyn FnMut(&K) -> Result<V, BeanError>,
    ) -> Result<V, BeanError> {
        if let Some(value) = self
            .map
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            log::trace!("metadata cache hit: {key:?}");
            return Ok(value.clone());
        }

        log::trace!("metadata cache miss: {key:?}");
        let value = loader(&key)?;

        let mut map = self.map.write().unwrap_or_else(PoisonError::into_inner);
        Ok(map.entry(key).or_insert(value).clone())
    }

    fn len(&self) -> usize {
        self.map.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn clear(&self) {
        self.map
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
