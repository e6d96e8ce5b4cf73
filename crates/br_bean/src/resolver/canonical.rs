use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use crate::info::{BeanInfo, Facet, Type};

// Synthetic wrappers nested deeper than this are treated as named types.
const MAX_DEPTH: usize = 16;

// -----------------------------------------------------------------------------
// Projection

/// A chain of facet views from a synthetic wrapper to a named bean.
#[derive(Clone)]
pub struct Projection {
    source: Type,
    facets: Arc<[Facet]>,
}

impl Projection {
    fn extended(source: Type, prefix: Option<&Projection>, facet: &Facet) -> Self {
        let mut facets: Vec<Facet> = match prefix {
            Some(prefix) => prefix.facets.to_vec(),
            None => Vec::with_capacity(1),
        };
        facets.push(facet.clone());
        Self {
            source,
            facets: facets.into(),
        }
    }

    /// The wrapper type the projection starts from.
    #[inline]
    pub fn source(&self) -> Type {
        self.source
    }

    /// The bean type the projection ends at.
    pub fn target(&self) -> Type {
        match self.facets.last() {
            Some(facet) => facet.ty(),
            None => self.source,
        }
    }

    /// Applies every view in order, `None` if `bean` has the wrong type.
    pub fn view<'a>(&self, bean: &'a dyn Any) -> Option<&'a dyn Any> {
        self.facets
            .iter()
            .try_fold(bean, |current, facet| facet.view(current))
    }

    /// Mutable version of [`Projection::view`].
    pub fn view_mut<'a>(&self, bean: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        let mut current = bean;
        for facet in self.facets.iter() {
            current = facet.view_mut(current)?;
        }
        Some(current)
    }
}

impl fmt::Debug for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)?;
        for facet in self.facets.iter() {
            write!(f, " -> {}", facet.ty())?;
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// CanonicalType

/// A named bean type reached from a possibly synthetic type.
#[derive(Clone, Debug)]
pub struct CanonicalType {
    info: &'static BeanInfo,
    projection: Option<Projection>,
}

impl CanonicalType {
    /// The type itself, without projection.
    #[inline]
    pub fn identity(info: &'static BeanInfo) -> Self {
        Self {
            info,
            projection: None,
        }
    }

    #[inline]
    pub fn info(&self) -> &'static BeanInfo {
        self.info
    }

    /// `None` when the canonical type is the type itself.
    #[inline]
    pub fn projection(&self) -> Option<&Projection> {
        self.projection.as_ref()
    }
}

// -----------------------------------------------------------------------------
// CanonicalTypeResolver

/// Maps a bean type to the named types whose properties it exposes.
///
/// Named types map to themselves. Synthetic types (proxies, adapters,
/// anonymous wrappers) map to their facets or their parent.
pub trait CanonicalTypeResolver: Send + Sync {
    /// The canonical types of `info`, in priority order.
    fn canonical_types(&self, info: &'static BeanInfo) -> Vec<CanonicalType>;
}

fn walk(
    info: &'static BeanInfo,
    root: Type,
    prefix: Option<&Projection>,
    all_facets: bool,
    depth: usize,
    out: &mut Vec<CanonicalType>,
) {
    if !info.is_synthetic() || depth >= MAX_DEPTH {
        out.push(CanonicalType {
            info,
            projection: prefix.cloned(),
        });
        return;
    }

    let facets = info.facets();
    let chosen = if all_facets {
        facets
    } else {
        &facets[..facets.len().min(1)]
    };

    if !chosen.is_empty() {
        for facet in chosen {
            let projection = Projection::extended(root, prefix, facet);
            walk(facet.info(), root, Some(&projection), all_facets, depth + 1, out);
        }
    } else if let Some(parent) = info.parent() {
        let projection = Projection::extended(root, prefix, parent);
        walk(parent.info(), root, Some(&projection), all_facets, depth + 1, out);
    } else {
        out.push(CanonicalType {
            info,
            projection: prefix.cloned(),
        });
    }
}

/// The union of every facet, or the parent when there is none.
#[derive(Debug, Default, Clone, Copy)]
pub struct FacetsFirst;

impl CanonicalTypeResolver for FacetsFirst {
    fn canonical_types(&self, info: &'static BeanInfo) -> Vec<CanonicalType> {
        let mut out = Vec::new();
        walk(info, info.ty(), None, true, 0, &mut out);
        out
    }
}

/// Only the first facet, or the parent when there is none.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstFacet;

impl CanonicalTypeResolver for FirstFacet {
    fn canonical_types(&self, info: &'static BeanInfo) -> Vec<CanonicalType> {
        let mut out = Vec::new();
        walk(info, info.ty(), None, false, 0, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::{Bean, NonGenericBeanInfoCell};

    #[derive(Default)]
    struct Named {
        value: u8,
    }

    impl Bean for Named {
        fn bean_info() -> &'static BeanInfo {
            static CELL: NonGenericBeanInfoCell = NonGenericBeanInfoCell::new();
            CELL.get_or_init(BeanInfo::new::<Self>)
        }
    }

    #[derive(Default)]
    struct Other;

    impl Bean for Other {
        fn bean_info() -> &'static BeanInfo {
            static CELL: NonGenericBeanInfoCell = NonGenericBeanInfoCell::new();
            CELL.get_or_init(BeanInfo::new::<Self>)
        }
    }

    #[derive(Default)]
    struct Proxy {
        named: Named,
        other: Other,
    }

    impl Bean for Proxy {
        fn bean_info() -> &'static BeanInfo {
            static CELL: NonGenericBeanInfoCell = NonGenericBeanInfoCell::new();
            CELL.get_or_init(|| {
                BeanInfo::new::<Self>()
                    .synthetic()
                    .with_facet(Facet::new::<Self, Named>(|p| &p.named, |p| &mut p.named))
                    .with_facet(Facet::new::<Self, Other>(|p| &p.other, |p| &mut p.other))
            })
        }
    }

    // A proxy of a proxy, exposing the inner one as its parent.
    #[derive(Default)]
    struct Outer {
        inner: Proxy,
    }

    impl Bean for Outer {
        fn bean_info() -> &'static BeanInfo {
            static CELL: NonGenericBeanInfoCell = NonGenericBeanInfoCell::new();
            CELL.get_or_init(|| {
                BeanInfo::new::<Self>()
                    .synthetic()
                    .with_parent(Facet::new::<Self, Proxy>(|o| &o.inner, |o| &mut o.inner))
            })
        }
    }

    #[test]
    fn named_types_are_canonical() {
        let types = FacetsFirst.canonical_types(Named::bean_info());
        assert_eq!(types.len(), 1);
        assert!(types[0].projection().is_none());
    }

    #[test]
    fn facets_are_unioned_or_first() {
        let all = FacetsFirst.canonical_types(Proxy::bean_info());
        let names: Vec<_> = all.iter().map(|t| t.info().ty().short_name()).collect();
        assert_eq!(names, ["Named", "Other"]);

        let first = FirstFacet.canonical_types(Proxy::bean_info());
        assert_eq!(first.len(), 1);
        assert!(first[0].info().ty().is::<Named>());
    }

    #[test]
    fn projections_chain_through_parents() {
        let types = FacetsFirst.canonical_types(Outer::bean_info());
        let projection = types[0].projection().unwrap();
        assert!(projection.source().is::<Outer>());
        assert!(projection.target().is::<Named>());

        let mut outer = Outer::default();
        outer.inner.named.value = 3;
        let named = projection.view(&outer).unwrap();
        assert_eq!(named.downcast_ref::<Named>().unwrap().value, 3);

        let named = projection.view_mut(&mut outer).unwrap();
        named.downcast_mut::<Named>().unwrap().value = 4;
        assert_eq!(outer.inner.named.value, 4);

        assert!(projection.view(&Named::default()).is_none());
    }
}
