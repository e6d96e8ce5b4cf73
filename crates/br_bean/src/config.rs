//! Provide the runtime configuration of a [`BeanRefs`](crate::BeanRefs) engine.

use alloc::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cache::CachePolicy;
use crate::resolver::{CanonicalTypeResolver, FacetsFirst, FirstFacet};

/// Which built-in [`CanonicalTypeResolver`] the engine uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalPolicy {
    /// See [`FacetsFirst`].
    #[default]
    FacetsFirst,
    /// See [`FirstFacet`].
    FirstFacet,
}

impl CanonicalPolicy {
    pub fn resolver(self) -> Arc<dyn CanonicalTypeResolver> {
        match self {
            Self::FacetsFirst => Arc::new(FacetsFirst),
            Self::FirstFacet => Arc::new(FirstFacet),
        }
    }
}

/// Engine settings. Missing fields take their default.
///
/// # Examples
///
/// ```
/// use br_bean::cache::CachePolicy;
/// use br_bean::config::{CanonicalPolicy, EngineConfig};
///
/// let config: EngineConfig = serde_json::from_str(r#"{
///     "cache": { "kind": "expire_after_access", "ttl_ms": 300000, "max_entries": 512 },
///     "canonical": "first_facet"
/// }"#).unwrap();
///
/// assert_eq!(config.canonical, CanonicalPolicy::FirstFacet);
/// assert_eq!(
///     config.cache,
///     CachePolicy::ExpireAfterAccess { ttl_ms: 300_000, max_entries: Some(512) },
/// );
///
/// let config: EngineConfig = serde_json::from_str("{}").unwrap();
/// assert_eq!(config, EngineConfig::default());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Retention of resolved descriptors and property maps.
    pub cache: CachePolicy,
    /// Normalization of synthetic bean types.
    pub canonical: CanonicalPolicy,
}
