//! Provide the entry points of the property path engine.
//!
//! A [`BeanRefs`] owns the registry handle and every metadata cache.
//! Handles are cheap to clone and share their caches; separate engines
//! never share anything but the registry they were given.

// -----------------------------------------------------------------------------
// Modules

mod refs;
mod root;
mod shared;

// -----------------------------------------------------------------------------
// Exports

pub use refs::BeanRefs;
pub use root::BeanRoot;

pub(crate) use shared::Engine;
