use alloc::boxed::Box;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use br_utils::TypeIdMap;

use crate::info::BeanInfo;

// -----------------------------------------------------------------------------
// Bean

/// A static accessor to a bean type's [`BeanInfo`].
///
/// Automatically implemented by [`#[derive(Bean)]`](crate::derive::Bean).
///
/// # Manually Impl
///
/// [`NonGenericBeanInfoCell`] and [`GenericBeanInfoCell`] give a `'static`
/// home to hand-built infos. See [`BeanInfo`] for a non-generic example and
/// [`Ref`](crate::info::Ref) for a generic one.
pub trait Bean: Any {
    /// Returns the bean info of this type.
    fn bean_info() -> &'static BeanInfo;
}

// -----------------------------------------------------------------------------
// NonGenericBeanInfoCell

/// A container for the [`BeanInfo`] of a non-generic type.
pub struct NonGenericBeanInfoCell(OnceLock<BeanInfo>);

impl NonGenericBeanInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored info, initializing it with `f` on first use.
    #[inline]
    pub fn get_or_init(&'static self, f: impl FnOnce() -> BeanInfo) -> &'static BeanInfo {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// GenericBeanInfoCell

/// A container for the [`BeanInfo`]s of a generic type.
///
/// A `static` inside a generic function is shared by every instantiation,
/// so infos are keyed by the [`TypeId`] of the concrete type.
pub struct GenericBeanInfoCell(RwLock<TypeIdMap<&'static BeanInfo>>);

impl GenericBeanInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the info stored for `G`, building it with `f` on first use.
    ///
    /// `f` runs without holding the lock, so it may query other cells.
    pub fn get_or_insert<G: Any + ?Sized>(
        &'static self,
        f: impl FnOnce() -> BeanInfo,
    ) -> &'static BeanInfo {
        let type_id = TypeId::of::<G>();

        if let Some(info) = self
            .0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
        {
            return *info;
        }

        let built = f();

        let mut map = self.0.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(info) = map.get(&type_id) {
            return *info;
        }
        let info: &'static BeanInfo = Box::leak(Box::new(built));
        map.insert(type_id, info);
        info
    }
}
