//! Provide resolved property metadata.
//!
//! A [`PropertyDescriptor`] describes one property of one bean type and
//! carries the erased read, write and instantiate capabilities for it.
//! Descriptors are built by the resolvers, held by the engine caches and
//! never change after construction.
//!
//! Collection descriptors present a collection-valued property as if it
//! were its last element: reading yields the last element, writing
//! appends and writing `None` clears.

// -----------------------------------------------------------------------------
// Modules

mod collection;
mod descriptor;

// -----------------------------------------------------------------------------
// Exports

pub use collection::CollectionFactory;
pub use descriptor::PropertyDescriptor;

pub(crate) use collection::CollectionAccess;
