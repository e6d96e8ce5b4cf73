use alloc::vec::Vec;
use core::any::Any;
use core::fmt;
use core::marker::PhantomData;

use crate::engine::BeanRefs;
use crate::error::Result;
use crate::info::{Bean, Getter, OrderedCollection, Type};
use crate::path::{BeanPath, Path};

/// An entry point for paths rooted at the bean type `R`.
///
/// ```
/// use br_bean::{BeanRefs, derive::Bean, registry::BeanRegistry};
///
/// #[derive(Bean, Default)]
/// #[bean(default)]
/// struct Phone {
///     number: Option<String>,
///     active: bool,
/// }
///
/// let refs = BeanRefs::new(BeanRegistry::empty());
/// let phone = refs.root::<Phone>();
///
/// let number = phone.then(Phone::NUMBER).unwrap();
/// assert_eq!(number, phone.path("number").unwrap());
///
/// let names: Vec<_> = phone.all().unwrap().iter().map(|p| p.path()).collect();
/// assert_eq!(names, ["number", "active"]);
/// ```
pub struct BeanRoot<R> {
    refs: BeanRefs,
    _marker: PhantomData<fn(&R)>,
}

impl<R: Bean> BeanRoot<R> {
    #[inline]
    pub(crate) fn new(refs: BeanRefs) -> Self {
        Self {
            refs,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn root_type(&self) -> Type {
        Type::of::<R>()
    }

    /// See [`BeanRefs::property`].
    #[inline]
    pub fn then<V: Any>(&self, getter: Getter<R, V>) -> Result<BeanPath<R, V>> {
        self.refs.property(getter)
    }

    /// See [`BeanRefs::collection`].
    #[inline]
    pub fn then_collection<C: OrderedCollection>(
        &self,
        getter: Getter<R, C>,
    ) -> Result<BeanPath<R, C::Item>> {
        self.refs.collection(getter)
    }

    /// See [`BeanRefs::collection_with`].
    #[inline]
    pub fn then_collection_with<C: OrderedCollection>(
        &self,
        getter: Getter<R, C>,
        factory: fn() -> C,
    ) -> Result<BeanPath<R, C::Item>> {
        self.refs.collection_with(getter, factory)
    }

    /// See [`BeanRefs::resolve`].
    #[inline]
    pub fn path(&self, path: &str) -> Result<Path> {
        self.refs.resolve(Type::of::<R>(), path)
    }

    /// See [`BeanRefs::resolve_as`].
    #[inline]
    pub fn path_as<V: Any>(&self, path: &str) -> Result<BeanPath<R, V>> {
        self.refs.resolve_as(path)
    }

    /// See [`BeanRefs::all_properties`].
    #[inline]
    pub fn all(&self) -> Result<Vec<Path>> {
        self.refs.all_properties(Type::of::<R>())
    }
}

impl<R> Clone for BeanRoot<R> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            refs: self.refs.clone(),
            _marker: PhantomData,
        }
    }
}

impl<R> fmt::Debug for BeanRoot<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BeanRoot")
            .field(&core::any::type_name::<R>())
            .finish()
    }
}
