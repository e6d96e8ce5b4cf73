use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::TypeId;

use br_utils::hash::HashMap;

use crate::cache::{CachePolicy, MetadataCache};
use crate::error::{BeanError, Result};
use crate::info::{BeanInfo, Type};
use crate::property::PropertyDescriptor;
use crate::registry::BeanRegistryArc;
use crate::resolver::naming::is_universal_member;
use crate::resolver::{AccessorResolver, CanonicalTypeResolver, Projection, property_name};

// -----------------------------------------------------------------------------
// PropertyMap

/// One introspected property.
#[derive(Clone)]
pub(crate) struct PropertyEntry {
    /// The canonical type declaring the getter.
    pub info: &'static BeanInfo,
    pub member: &'static str,
    pub projection: Option<Projection>,
    pub descriptor: Arc<PropertyDescriptor>,
}

/// Every property of one bean type, in discovery order.
pub(crate) struct PropertyMap {
    entries: Vec<PropertyEntry>,
    index: HashMap<Box<str>, usize>,
}

impl PropertyMap {
    pub fn get(&self, name: &str) -> Option<&PropertyEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    pub fn entries(&self) -> &[PropertyEntry] {
        &self.entries
    }
}

// -----------------------------------------------------------------------------
// Introspector

/// Enumerates the properties of bean types.
///
/// Maps are built once per root type and cached.
pub(crate) struct Introspector {
    maps: Box<dyn MetadataCache<TypeId, Arc<PropertyMap>>>,
    canonical: Arc<dyn CanonicalTypeResolver>,
    accessors: AccessorResolver,
}

impl Introspector {
    pub fn new(
        accessors: AccessorResolver,
        canonical: Arc<dyn CanonicalTypeResolver>,
        policy: &CachePolicy,
    ) -> Self {
        Self {
            maps: policy.build(),
            canonical,
            accessors,
        }
    }

    #[inline]
    pub fn accessors(&self) -> &AccessorResolver {
        &self.accessors
    }

    #[inline]
    pub fn registry(&self) -> &BeanRegistryArc {
        self.accessors.registry()
    }

    /// The registered info of `ty`.
    pub fn info_of(&self, ty: Type) -> Result<&'static BeanInfo> {
        self.registry().read().get(ty.id()).ok_or_else(|| {
            BeanError::illegal_argument(format!("type `{ty}` is not a registered bean"))
        })
    }

    /// All properties of the bean type `ty`.
    pub fn properties(&self, ty: Type) -> Result<Arc<PropertyMap>> {
        let info = self.info_of(ty)?;
        self.maps
            .get_or_compute(ty.id(), &mut |_| self.build(info).map(Arc::new))
    }

    /// The property `name` of `ty`.
    pub fn resolve_by_name(&self, ty: Type, name: &str) -> Result<PropertyEntry> {
        let map = self.properties(ty)?;
        match map.get(name) {
            Some(entry) => Ok(entry.clone()),
            None => Err(BeanError::illegal_argument(format!(
                "property '{name}' does not exist in bean `{ty}`"
            ))),
        }
    }

    /// The property `name` of `ty`, which must have the value type `expected`.
    pub fn resolve_by_name_typed(
        &self,
        ty: Type,
        name: &str,
        expected: Type,
    ) -> Result<PropertyEntry> {
        let entry = self.resolve_by_name(ty, name)?;
        Self::check_assignable(&entry.descriptor, expected)?;
        Ok(entry)
    }

    /// The collection view of the property `name` of `ty`.
    pub fn resolve_collection_by_name(&self, ty: Type, name: &str) -> Result<PropertyEntry> {
        let entry = self.resolve_by_name(ty, name)?;
        let descriptor = self.accessors.member_collection(entry.info, entry.member)?;
        Ok(PropertyEntry {
            descriptor,
            ..entry
        })
    }

    /// Fails unless `descriptor` yields values of type `expected`.
    pub fn check_assignable(descriptor: &PropertyDescriptor, expected: Type) -> Result<()> {
        if descriptor.value_type() == expected {
            Ok(())
        } else {
            Err(BeanError::illegal_argument(format!(
                "wrong type specified for property `{descriptor}`: it holds `{}`, not `{expected}`",
                descriptor.value_type(),
            )))
        }
    }

    fn build(&self, info: &'static BeanInfo) -> Result<PropertyMap> {
        let mut entries = Vec::new();
        let mut index: HashMap<Box<str>, usize> = HashMap::default();

        for canonical in self.canonical.canonical_types(info) {
            let source = canonical.info();
            for member in source.members() {
                if member.as_getter().is_none() || is_universal_member(member.name()) {
                    continue;
                }
                let name = property_name(member.name());
                // The first canonical type declaring a name wins.
                if index.contains_key(&*name) {
                    continue;
                }
                let descriptor = self.accessors.member(source, member.name())?;
                index.insert(Box::from(&*name), entries.len());
                entries.push(PropertyEntry {
                    info: source,
                    member: member.name(),
                    projection: canonical.projection().cloned(),
                    descriptor,
                });
            }
        }

        log::debug!(
            "introspected {} properties of `{}`",
            entries.len(),
            info.ty()
        );
        Ok(PropertyMap { entries, index })
    }
}
