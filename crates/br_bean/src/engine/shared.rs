use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::cache::CachePolicy;
use crate::error::Result;
use crate::info::Type;
use crate::path::{Step, parse};
use crate::registry::BeanRegistryArc;
use crate::resolver::{AccessorResolver, CanonicalTypeResolver, Introspector};

/// State shared by an engine handle and every path it creates.
pub(crate) struct Engine {
    introspector: Introspector,
}

impl Engine {
    pub fn new(
        registry: BeanRegistryArc,
        cache: &CachePolicy,
        canonical: Arc<dyn CanonicalTypeResolver>,
    ) -> Self {
        let accessors = AccessorResolver::new(registry, cache);
        Self {
            introspector: Introspector::new(accessors, canonical, cache),
        }
    }

    #[inline]
    pub fn registry(&self) -> &BeanRegistryArc {
        self.introspector.registry()
    }

    #[inline]
    pub fn accessors(&self) -> &AccessorResolver {
        self.introspector.accessors()
    }

    #[inline]
    pub fn introspector(&self) -> &Introspector {
        &self.introspector
    }

    /// Resolves a dotted path starting at the bean type `from`.
    ///
    /// With `expected`, the last property must hold values of that type.
    pub fn resolve_steps(&self, from: Type, path: &str, expected: Option<Type>) -> Result<Vec<Step>> {
        let segments = parse(path)?;

        let mut current = from;
        let mut steps = Vec::with_capacity(segments.len());
        for segment in &segments {
            let entry = if segment.collection {
                self.introspector
                    .resolve_collection_by_name(current, segment.name)?
            } else {
                self.introspector.resolve_by_name(current, segment.name)?
            };
            current = entry.descriptor.value_type();
            steps.push(Step {
                projection: entry.projection,
                descriptor: entry.descriptor,
            });
        }

        if let (Some(expected), Some(last)) = (expected, steps.last()) {
            Introspector::check_assignable(&last.descriptor, expected)?;
        }
        Ok(steps)
    }
}
