//! Provide the rules turning bean members into properties.
//!
//! ## Naming
//!
//! A getter member `get_x` or `is_x` (camel case `getX` / `isX` too)
//! defines the property `x`; any other getter defines a property of its
//! own name. The matching setter is `set_x` (`setX`) for canonical
//! getters and a setter of the same name otherwise. A property without a
//! matching setter is read-only.
//!
//! ## Canonical types
//!
//! Introspection runs on named types. A [`CanonicalTypeResolver`] maps a
//! synthetic wrapper to the named beans it exposes, [`FacetsFirst`] by
//! default.

// -----------------------------------------------------------------------------
// Modules

mod accessor;
mod canonical;
mod introspector;
mod naming;

// -----------------------------------------------------------------------------
// Exports

pub use canonical::{CanonicalType, CanonicalTypeResolver, FacetsFirst, FirstFacet, Projection};
pub use naming::{property_name, setter_name};

pub(crate) use accessor::AccessorResolver;
pub(crate) use introspector::{Introspector, PropertyEntry};
