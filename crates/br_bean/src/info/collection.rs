use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;
use core::hash::{BuildHasher, Hash};

use indexmap::IndexSet;

use crate::error::AccessError;
use crate::info::Type;

// -----------------------------------------------------------------------------
// OrderedCollection

/// A collection with a defined iteration order, exposed as if it were its
/// last element.
///
/// Reading yields the last element, writing appends, and writing a null
/// value clears the collection. Sorted and hash-based sets have no
/// insertion order and do not implement this trait; [`IndexSet`] is the
/// set to use.
///
/// # Examples
///
/// ```
/// use br_bean::info::OrderedCollection;
///
/// let mut phones = vec!["555-1".to_string()];
/// phones.append_element("555-2".to_string());
/// assert_eq!(phones.last_element().map(String::as_str), Some("555-2"));
///
/// phones.clear_elements();
/// assert!(phones.last_element().is_none());
/// ```
pub trait OrderedCollection: Any {
    /// The element type.
    type Item: Any;

    /// Creates an empty collection, if this type can be materialized
    /// without caller help.
    fn empty() -> Option<Self>
    where
        Self: Sized;

    /// The last element in iteration order.
    fn last_element(&self) -> Option<&Self::Item>;

    /// A mutable borrow of the last element.
    ///
    /// Collections that cannot hand out mutable elements (sets)
    /// return [`AccessError::NotTraversable`].
    fn last_element_mut(&mut self) -> Result<Option<&mut Self::Item>, AccessError>;

    /// Adds `item` at the end.
    fn append_element(&mut self, item: Self::Item);

    /// Removes every element.
    fn clear_elements(&mut self);
}

impl<T: Any> OrderedCollection for Vec<T> {
    type Item = T;

    #[inline]
    fn empty() -> Option<Self> {
        Some(Vec::new())
    }

    #[inline]
    fn last_element(&self) -> Option<&T> {
        self.last()
    }

    #[inline]
    fn last_element_mut(&mut self) -> Result<Option<&mut T>, AccessError> {
        Ok(self.last_mut())
    }

    #[inline]
    fn append_element(&mut self, item: T) {
        self.push(item);
    }

    #[inline]
    fn clear_elements(&mut self) {
        self.clear();
    }
}

impl<T: Any> OrderedCollection for VecDeque<T> {
    type Item = T;

    #[inline]
    fn empty() -> Option<Self> {
        Some(VecDeque::new())
    }

    #[inline]
    fn last_element(&self) -> Option<&T> {
        self.back()
    }

    #[inline]
    fn last_element_mut(&mut self) -> Result<Option<&mut T>, AccessError> {
        Ok(self.back_mut())
    }

    #[inline]
    fn append_element(&mut self, item: T) {
        self.push_back(item);
    }

    #[inline]
    fn clear_elements(&mut self) {
        self.clear();
    }
}

/// Appending an element that is already present moves it to the end, so
/// the element just written is always the one read back.
impl<T, S> OrderedCollection for IndexSet<T, S>
where
    T: Any + Hash + Eq,
    S: BuildHasher + Default + Any,
{
    type Item = T;

    #[inline]
    fn empty() -> Option<Self> {
        Some(IndexSet::with_hasher(S::default()))
    }

    #[inline]
    fn last_element(&self) -> Option<&T> {
        self.last()
    }

    fn last_element_mut(&mut self) -> Result<Option<&mut T>, AccessError> {
        Err(AccessError::not_traversable::<Self>())
    }

    fn append_element(&mut self, item: T) {
        self.shift_remove(&item);
        self.insert(item);
    }

    #[inline]
    fn clear_elements(&mut self) {
        self.clear();
    }
}

// -----------------------------------------------------------------------------
// CollectionOps

/// Type-erased [`OrderedCollection`] operations for one collection type.
#[derive(Clone, Copy)]
pub struct CollectionOps {
    collection: Type,
    element: Type,
    last: for<'a> fn(&'a dyn Any) -> Result<Option<&'a dyn Any>, AccessError>,
    last_mut: for<'a> fn(&'a mut dyn Any) -> Result<Option<&'a mut dyn Any>, AccessError>,
    append: fn(&mut dyn Any, Box<dyn Any>) -> Result<(), AccessError>,
    clear: fn(&mut dyn Any) -> Result<(), AccessError>,
    empty: fn() -> Option<Box<dyn Any>>,
}

fn last_of<C: OrderedCollection>(collection: &dyn Any) -> Result<Option<&dyn Any>, AccessError> {
    let collection = collection
        .downcast_ref::<C>()
        .ok_or_else(AccessError::type_mismatch::<C>)?;
    Ok(collection.last_element().map(|item| item as &dyn Any))
}

fn last_mut_of<C: OrderedCollection>(
    collection: &mut dyn Any,
) -> Result<Option<&mut dyn Any>, AccessError> {
    let collection = collection
        .downcast_mut::<C>()
        .ok_or_else(AccessError::type_mismatch::<C>)?;
    Ok(collection
        .last_element_mut()?
        .map(|item| item as &mut dyn Any))
}

fn append_to<C: OrderedCollection>(
    collection: &mut dyn Any,
    item: Box<dyn Any>,
) -> Result<(), AccessError> {
    let collection = collection
        .downcast_mut::<C>()
        .ok_or_else(AccessError::type_mismatch::<C>)?;
    let item = item
        .downcast::<C::Item>()
        .map_err(|_| AccessError::type_mismatch::<C::Item>())?;
    collection.append_element(*item);
    Ok(())
}

fn clear_of<C: OrderedCollection>(collection: &mut dyn Any) -> Result<(), AccessError> {
    collection
        .downcast_mut::<C>()
        .ok_or_else(AccessError::type_mismatch::<C>)?
        .clear_elements();
    Ok(())
}

fn empty_of<C: OrderedCollection>() -> Option<Box<dyn Any>> {
    C::empty().map(|collection| Box::new(collection) as Box<dyn Any>)
}

impl CollectionOps {
    /// Operations of the collection type `C`.
    pub fn of<C: OrderedCollection>() -> Self {
        Self {
            collection: Type::of::<C>(),
            element: Type::of::<C::Item>(),
            last: last_of::<C>,
            last_mut: last_mut_of::<C>,
            append: append_to::<C>,
            clear: clear_of::<C>,
            empty: empty_of::<C>,
        }
    }

    /// The collection type.
    #[inline(always)]
    pub fn collection_type(&self) -> Type {
        self.collection
    }

    /// The element type.
    #[inline(always)]
    pub fn element_type(&self) -> Type {
        self.element
    }

    #[inline]
    pub fn last<'a>(&self, collection: &'a dyn Any) -> Result<Option<&'a dyn Any>, AccessError> {
        (self.last)(collection)
    }

    #[inline]
    pub fn last_mut<'a>(
        &self,
        collection: &'a mut dyn Any,
    ) -> Result<Option<&'a mut dyn Any>, AccessError> {
        (self.last_mut)(collection)
    }

    #[inline]
    pub fn append(&self, collection: &mut dyn Any, item: Box<dyn Any>) -> Result<(), AccessError> {
        (self.append)(collection, item)
    }

    #[inline]
    pub fn clear(&self, collection: &mut dyn Any) -> Result<(), AccessError> {
        (self.clear)(collection)
    }

    /// A fresh empty collection, see [`OrderedCollection::empty`].
    #[inline]
    pub fn empty(&self) -> Option<Box<dyn Any>> {
        (self.empty)()
    }
}

impl fmt::Debug for CollectionOps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionOps")
            .field("collection", &self.collection)
            .field("element", &self.element)
            .finish()
    }
}
