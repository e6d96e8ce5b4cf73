use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

use crate::error::{AccessError, Result};
use crate::info::{Bean, Getter, OrderedCollection, Type};
use crate::path::{Path, PathSpec, Step};
use crate::property::PropertyDescriptor;

/// A typed path from a root bean `R` to a value `V`.
///
/// # Examples
///
/// ```
/// use br_bean::{BeanRefs, derive::Bean, registry::BeanRegistry};
///
/// #[derive(Bean, Default)]
/// #[bean(default)]
/// struct Phone {
///     number: Option<String>,
/// }
///
/// #[derive(Bean, Default)]
/// #[bean(default)]
/// struct Contact {
///     #[bean(collection)]
///     phones: Option<Vec<Phone>>,
/// }
///
/// let refs = BeanRefs::new(BeanRegistry::empty());
/// let number = refs
///     .collection(Contact::PHONES).unwrap()
///     .then(Phone::NUMBER).unwrap();
///
/// let mut contact = Contact::default();
/// number.set(&mut contact, String::from("555-1")).unwrap();
/// assert_eq!(contact.phones.as_ref().map(Vec::len), Some(1));
/// assert_eq!(number.get(&contact).unwrap().map(String::as_str), Some("555-1"));
/// assert_eq!(number.path(), "phones.number");
/// ```
pub struct BeanPath<R, V> {
    path: Path,
    _marker: PhantomData<fn(&R) -> &V>,
}

impl<R, V> BeanPath<R, V> {
    #[inline]
    pub(crate) fn from_path(path: Path) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// The untyped path.
    #[inline]
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn into_path(self) -> Path {
        self.path
    }

    /// The last property.
    #[inline]
    pub fn descriptor(&self) -> &Arc<PropertyDescriptor> {
        self.path.last()
    }

    #[inline]
    pub fn root_type(&self) -> Type {
        self.path.root_type()
    }

    #[inline]
    pub fn value_type(&self) -> Type {
        self.path.value_type()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.path.len()
    }

    #[inline]
    pub fn is_read_only(&self) -> bool {
        self.path.is_read_only()
    }

    /// See [`Path::path`].
    #[inline]
    pub fn path(&self) -> String {
        self.path.path()
    }

    /// See [`Path::path_with_root`].
    #[inline]
    pub fn path_with_root(&self, root: &str) -> String {
        self.path.path_with_root(root)
    }

    #[inline]
    pub fn spec(&self) -> PathSpec {
        self.path.spec()
    }

    /// See [`Path::then_path`].
    #[inline]
    pub fn then_path(&self, path: &str) -> Result<Path> {
        self.path.then_path(path)
    }

    /// See [`Path::all`].
    #[inline]
    pub fn all(&self) -> Result<Vec<Path>> {
        self.path.all()
    }
}

impl<R: Any, V: Any> BeanPath<R, V> {
    /// Reads the value, `None` if it or any intermediate is null.
    pub fn get<'a>(&self, root: &'a R) -> Result<Option<&'a V>> {
        match self.path.get_dyn(root)? {
            Some(value) => match value.downcast_ref::<V>() {
                Some(value) => Ok(Some(value)),
                None => Err(AccessError::type_mismatch::<V>().into()),
            },
            None => Ok(None),
        }
    }

    /// Writes the value, instantiating null intermediates.
    ///
    /// See [`Path::set_dyn`].
    pub fn set(&self, root: &mut R, value: impl Into<Option<V>>) -> Result<()> {
        let value = value.into().map(|value| Box::new(value) as Box<dyn Any>);
        self.path.set_dyn(root, value)
    }

    /// See [`Path::is_complete_dyn`].
    pub fn is_complete(&self, root: &R) -> Result<bool> {
        self.path.is_complete_dyn(root)
    }

    /// Extends the path with a dotted path, checking the value type.
    pub fn then_path_as<W: Any>(&self, path: &str) -> Result<BeanPath<R, W>> {
        let path = self.path.then_path_as(path, Type::of::<W>())?;
        Ok(BeanPath::from_path(path))
    }
}

impl<R: Any, V: Bean> BeanPath<R, V> {
    /// Extends the path with a property of `V`.
    pub fn then<W: Any>(&self, getter: Getter<V, W>) -> Result<BeanPath<R, W>> {
        let descriptor = self.path.engine().accessors().resolve(getter)?;
        Ok(BeanPath::from_path(self.path.extended([Step::direct(descriptor)])))
    }

    /// Extends the path with a collection property of `V`, addressing
    /// its last element.
    pub fn then_collection<C: OrderedCollection>(
        &self,
        getter: Getter<V, C>,
    ) -> Result<BeanPath<R, C::Item>> {
        let descriptor = self
            .path
            .engine()
            .accessors()
            .resolve_collection(getter, None)?;
        Ok(BeanPath::from_path(self.path.extended([Step::direct(descriptor)])))
    }

    /// Like [`then_collection`](Self::then_collection), creating a null
    /// collection with `factory`.
    pub fn then_collection_with<C: OrderedCollection>(
        &self,
        getter: Getter<V, C>,
        factory: fn() -> C,
    ) -> Result<BeanPath<R, C::Item>> {
        let descriptor = self
            .path
            .engine()
            .accessors()
            .resolve_collection(getter, Some(factory))?;
        Ok(BeanPath::from_path(self.path.extended([Step::direct(descriptor)])))
    }
}

impl<R, V> Clone for BeanPath<R, V> {
    #[inline]
    fn clone(&self) -> Self {
        Self::from_path(self.path.clone())
    }
}

impl<R, V> PartialEq for BeanPath<R, V> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl<R, V> Eq for BeanPath<R, V> {}

impl<R, V> PartialEq<Path> for BeanPath<R, V> {
    #[inline]
    fn eq(&self, other: &Path) -> bool {
        &self.path == other
    }
}

impl<R, V> PartialEq<BeanPath<R, V>> for Path {
    #[inline]
    fn eq(&self, other: &BeanPath<R, V>) -> bool {
        self == &other.path
    }
}

impl<R, V> Hash for BeanPath<R, V> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl<R, V> From<BeanPath<R, V>> for Path {
    #[inline]
    fn from(path: BeanPath<R, V>) -> Self {
        path.path
    }
}

impl<R, V> fmt::Display for BeanPath<R, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.path, f)
    }
}

impl<R, V> fmt::Debug for BeanPath<R, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BeanPath").field(&self.path).finish()
    }
}
