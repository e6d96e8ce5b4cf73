use core::any::Any;

use crate::error::AccessError;
use crate::info::{Bean, BeanInfo, GenericBeanInfoCell, Getter, MemberInfo};

// -----------------------------------------------------------------------------
// Ref

/// A nullable single-value cell.
///
/// `Ref` is the stock example of a wrapper bean with non-canonical
/// accessors: its getter and its setter are both called `get`, so in a
/// path the property is named `get` as well (`status.get.name`).
///
/// # Examples
///
/// ```
/// use br_bean::info::{Bean, Ref};
///
/// let mut cell = Ref::new(5_u32);
/// assert_eq!(Ref::<u32>::GET.get(&cell), Some(&5));
///
/// cell.set(None);
/// assert!(cell.get().is_none());
///
/// let info = Ref::<u32>::bean_info();
/// assert!(info.getter("get").is_some());
/// assert!(info.setter("get").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ref<T>(Option<T>);

impl<T> Ref<T> {
    /// A cell holding `value`.
    #[inline]
    pub const fn new(value: T) -> Self {
        Self(Some(value))
    }

    /// An empty cell.
    #[inline]
    pub const fn empty() -> Self {
        Self(None)
    }

    #[inline]
    pub const fn get(&self) -> Option<&T> {
        self.0.as_ref()
    }

    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.0.as_mut()
    }

    /// Replaces the content, returning the previous one.
    #[inline]
    pub fn set(&mut self, value: Option<T>) -> Option<T> {
        core::mem::replace(&mut self.0, value)
    }

    #[inline]
    pub fn take(&mut self) -> Option<T> {
        self.0.take()
    }
}

impl<T> Default for Ref<T> {
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Option<T>> for Ref<T> {
    #[inline]
    fn from(value: Option<T>) -> Self {
        Self(value)
    }
}

impl<T: Any> Ref<T> {
    /// The non-canonical `get` getter.
    pub const GET: Getter<Self, T> = Getter::<Self, T>::new(
        "get",
        |cell: &Self| cell.0.as_ref(),
        |cell: &mut Self| cell.0.as_mut(),
    );
}

impl<T: Any> Bean for Ref<T> {
    fn bean_info() -> &'static BeanInfo {
        static CELL: GenericBeanInfoCell = GenericBeanInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            BeanInfo::new::<Self>()
                .with_member(MemberInfo::getter(Self::GET))
                .with_member(MemberInfo::setter::<Self, T>(
                    "get",
                    |cell, value| -> Result<(), AccessError> {
                        cell.0 = value;
                        Ok(())
                    },
                ))
                .with_default::<Self>()
        })
    }
}
