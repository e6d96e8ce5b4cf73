//! Provide the bean registry for `TypeId` and name based lookups.
//!
//! ## Menu
//!
//! - [`BeanRegistry`]: A container of `&'static BeanInfo`s keyed by `TypeId`,
//!   with type path and short type name indices.
//! - [`BeanRegistryArc`]: A shared, lock-guarded registry handle.
//!
//! ## auto_register
//!
//! See [`BeanRegistry::auto_register`].
//!
//! We use the [`inventory`] crate to implement static registration,
//! not all platforms support it (although major platforms do).
//! If it is not supported, the function returns `false` without error.
//!
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

mod bean_registry;

// -----------------------------------------------------------------------------
// Exports

pub use bean_registry::{BeanRegistry, BeanRegistryArc};
