use alloc::sync::Arc;
use core::any::TypeId;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use br_utils::TypeIdMap;
use br_utils::hash::{FixedHashState, HashMap, HashSet};

use crate::info::{Bean, BeanInfo, Constructor};

// -----------------------------------------------------------------------------
// BeanRegistry

/// A registry of bean types.
///
/// The registry is the central store the engine consults to turn a
/// `TypeId`, a type path or a short type name back into a [`BeanInfo`].
/// Name-based path resolution and lazy instantiation both go through it.
///
/// # Example
///
/// ```
/// use core::any::TypeId;
/// use br_bean::{derive::Bean, registry::BeanRegistry};
///
/// #[derive(Bean, Default)]
/// #[bean(default)]
/// struct Address {
///     city: Option<String>,
/// }
///
/// let mut registry = BeanRegistry::empty();
/// registry.register::<Address>();
///
/// assert!(registry.contains(TypeId::of::<Address>()));
/// assert!(registry.get_with_type_name("Address").is_some());
/// assert!(registry.constructor_of(TypeId::of::<Address>()).is_some());
/// ```
pub struct BeanRegistry {
    infos: TypeIdMap<&'static BeanInfo>,
    type_path_to_id: HashMap<&'static str, TypeId>,
    type_name_to_id: HashMap<&'static str, TypeId>,
    ambiguous_names: HashSet<&'static str>,
    auto_registered: bool,
}

impl Default for BeanRegistry {
    /// See [`BeanRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl BeanRegistry {
    /// Create an empty [`BeanRegistry`].
    #[inline]
    pub const fn empty() -> Self {
        Self {
            infos: TypeIdMap::new(),
            type_path_to_id: HashMap::with_hasher(FixedHashState),
            type_name_to_id: HashMap::with_hasher(FixedHashState),
            ambiguous_names: HashSet::with_hasher(FixedHashState),
            auto_registered: false,
        }
    }

    /// Create a registry holding every auto-registered bean.
    ///
    /// See [`BeanRegistry::auto_register`].
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.auto_register();
        registry
    }

    // # Validity
    // The type must **not** already exist.
    fn add_new_type_indices(
        info: &'static BeanInfo,
        type_path_to_id: &mut HashMap<&'static str, TypeId>,
        type_name_to_id: &mut HashMap<&'static str, TypeId>,
        ambiguous_names: &mut HashSet<&'static str>,
    ) {
        let ty = info.ty();
        let type_name = ty.short_name();

        if !ambiguous_names.contains(type_name) {
            if type_name_to_id.contains_key(type_name) {
                log::warn!("bean type name `{type_name}` is ambiguous, use its full path instead");
                type_name_to_id.remove(type_name);
                ambiguous_names.insert(type_name);
            } else {
                type_name_to_id.insert(type_name, ty.id());
            }
        }

        type_path_to_id.insert(ty.name(), ty.id());
    }

    /// Try add or do nothing.
    ///
    /// - Returns `true` if the type was not registered and `info` was inserted.
    /// - Returns `false` if the type already exists; nothing changes.
    ///
    /// Facets and parent are _not_ registered,
    /// use [`register`](Self::register) for that.
    pub fn register_info(&mut self, info: &'static BeanInfo) -> bool {
        let inserted = self.infos.try_insert(info.ty().id(), || {
            Self::add_new_type_indices(
                info,
                &mut self.type_path_to_id,
                &mut self.type_name_to_id,
                &mut self.ambiguous_names,
            );
            info
        });
        if inserted {
            log::debug!("registered bean `{}`", info.ty().name());
        }
        inserted
    }

    /// Registers `T` if it has not been registered already, together with
    /// the beans exposed by its facets and parent, and the bean types of
    /// its properties.
    ///
    /// Dependencies are registered recursively, so a dotted path can be
    /// resolved from `T` through any chain of bean-valued properties.
    pub fn register<T: Bean>(&mut self) {
        self.register_with_dependencies(T::bean_info());
    }

    fn register_with_dependencies(&mut self, info: &'static BeanInfo) {
        if self.register_info(info) {
            for facet in info.facets() {
                self.register_with_dependencies(facet.info());
            }
            if let Some(parent) = info.parent() {
                self.register_with_dependencies(parent.info());
            }
            for member in info.members() {
                if let Some(value) = member.as_getter().and_then(|g| g.value_bean()) {
                    self.register_with_dependencies(value);
                }
            }
        }
    }

    /// Automatically registers all non-generic beans annotated with
    /// `#[bean(auto_register)]`.
    ///
    /// Repeated calls are cheap and will not insert duplicates.
    ///
    /// ## Return Value
    ///
    /// Returns `true` if automatic registration is supported on the
    /// current platform; otherwise, `false`.
    ///
    /// ## Feature Dependency
    ///
    /// This method requires the `auto_register` feature. When disabled,
    /// it does nothing and returns `false`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use core::any::TypeId;
    /// # use br_bean::{derive::Bean, registry::BeanRegistry};
    /// #[derive(Bean)]
    /// #[bean(auto_register)]
    /// struct Phone {
    ///     number: Option<String>,
    /// }
    ///
    /// let mut registry = BeanRegistry::empty();
    /// assert!(registry.auto_register());
    /// assert!(registry.contains(TypeId::of::<Phone>()));
    /// ```
    pub fn auto_register(&mut self) -> bool {
        if !self.auto_registered {
            self.collect_auto_registered();
        }
        self.auto_registered
    }

    #[cfg(feature = "auto_register")]
    fn collect_auto_registered(&mut self) {
        crate::__macro_exports::auto_register::__register_types(self);
    }

    #[cfg(not(feature = "auto_register"))]
    #[inline(always)]
    fn collect_auto_registered(&mut self) {}

    #[cfg(feature = "auto_register")]
    #[inline]
    pub(crate) fn mark_auto_registered(&mut self) {
        self.auto_registered = true;
    }

    /// Whether the type with given [`TypeId`] has been registered.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.infos.contains(&type_id)
    }

    /// Returns the [`BeanInfo`] of the type with the given [`TypeId`].
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&'static BeanInfo> {
        self.infos.get(&type_id).copied()
    }

    /// Returns the [`BeanInfo`] of the type with the given full type path,
    /// e.g. `my_crate::model::Person`.
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&'static BeanInfo> {
        match self.type_path_to_id.get(type_path) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns the [`BeanInfo`] of the type with the given short name,
    /// e.g. `Person`.
    ///
    /// Returns `None` if the name is ambiguous.
    pub fn get_with_type_name(&self, type_name: &str) -> Option<&'static BeanInfo> {
        match self.type_name_to_id.get(type_name) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Looks `name` up as a type path first, then as a short type name.
    pub fn find(&self, name: &str) -> Option<&'static BeanInfo> {
        self.get_with_type_path(name)
            .or_else(|| self.get_with_type_name(name))
    }

    /// Returns `true` if the short type name matches multiple registered types.
    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.ambiguous_names.contains(type_name)
    }

    /// The constructor of the given bean type, if registered and constructible.
    #[inline]
    pub fn constructor_of(&self, type_id: TypeId) -> Option<Constructor> {
        self.get(type_id).and_then(BeanInfo::constructor)
    }

    /// Iterates over the registered infos in arbitrary order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &'static BeanInfo> + '_ {
        self.infos.values().copied()
    }

    /// The number of registered beans.
    #[inline]
    pub fn len(&self) -> usize {
        self.infos.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }
}

// -----------------------------------------------------------------------------
// BeanRegistryArc

/// A shared [`BeanRegistry`] handle.
///
/// Property descriptors keep one to resolve their instantiators lazily.
#[derive(Clone, Default)]
pub struct BeanRegistryArc {
    /// The wrapped [`BeanRegistry`].
    pub internal: Arc<RwLock<BeanRegistry>>,
}

impl BeanRegistryArc {
    /// Wraps `registry`.
    #[inline]
    pub fn new(registry: BeanRegistry) -> Self {
        Self {
            internal: Arc::new(RwLock::new(registry)),
        }
    }

    /// Takes a read lock on the underlying [`BeanRegistry`].
    pub fn read(&self) -> RwLockReadGuard<'_, BeanRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`BeanRegistry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, BeanRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers `T` unless it is already present.
    ///
    /// Only takes the write lock when `T` is missing.
    pub fn ensure<T: Bean>(&self) {
        if !self.read().contains(TypeId::of::<T>()) {
            self.write().register::<T>();
        }
    }
}

impl From<BeanRegistry> for BeanRegistryArc {
    #[inline]
    fn from(registry: BeanRegistry) -> Self {
        Self::new(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::{BeanInfo, Facet, NonGenericBeanInfoCell};

    mod first {
        use crate::info::{Bean, BeanInfo, NonGenericBeanInfoCell};

        pub struct Item;

        impl Bean for Item {
            fn bean_info() -> &'static BeanInfo {
                static CELL: NonGenericBeanInfoCell = NonGenericBeanInfoCell::new();
                CELL.get_or_init(BeanInfo::new::<Self>)
            }
        }
    }

    mod second {
        use crate::info::{Bean, BeanInfo, NonGenericBeanInfoCell};

        pub struct Item;

        impl Bean for Item {
            fn bean_info() -> &'static BeanInfo {
                static CELL: NonGenericBeanInfoCell = NonGenericBeanInfoCell::new();
                CELL.get_or_init(BeanInfo::new::<Self>)
            }
        }
    }

    struct Wrapper {
        inner: first::Item,
    }

    impl Bean for Wrapper {
        fn bean_info() -> &'static BeanInfo {
            static CELL: NonGenericBeanInfoCell = NonGenericBeanInfoCell::new();
            CELL.get_or_init(|| {
                BeanInfo::new::<Self>().synthetic().with_facet(Facet::new::<Self, first::Item>(
                    |w| &w.inner,
                    |w| &mut w.inner,
                ))
            })
        }
    }

    #[test]
    fn ambiguous_short_names() {
        let mut registry = BeanRegistry::empty();
        registry.register::<first::Item>();
        assert!(registry.get_with_type_name("Item").is_some());

        registry.register::<second::Item>();
        assert!(registry.is_ambiguous("Item"));
        assert!(registry.get_with_type_name("Item").is_none());

        let path = first::Item::bean_info().ty().name();
        assert!(registry.get_with_type_path(path).is_some());
        assert!(registry.find(path).is_some());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn register_pulls_in_facets() {
        let mut registry = BeanRegistry::empty();
        registry.register::<Wrapper>();
        assert!(registry.contains(TypeId::of::<Wrapper>()));
        assert!(registry.contains(TypeId::of::<first::Item>()));
        assert!(!registry.register_info(Wrapper::bean_info()));
        assert!(registry.constructor_of(TypeId::of::<Wrapper>()).is_none());
    }

    #[test]
    fn shared_handle_registers_once() {
        let shared = BeanRegistryArc::new(BeanRegistry::empty());
        shared.ensure::<first::Item>();
        shared.ensure::<first::Item>();
        assert_eq!(shared.read().len(), 1);
    }
}
