//! Provide property paths.
//!
//! ## Menu
//!
//! - [`Path`]: an untyped chain of properties working on `dyn Any`.
//! - [`BeanPath`]: a [`Path`] typed by its root and value types.
//! - [`PathSpec`]: a serializable root name and dotted path.
//!
//! ## Dotted paths
//!
//! A dotted path is `name(.name)*`, where each name is a property name
//! (`city`, not `get_city`). A trailing `[]` on a segment addresses the
//! last element of a collection property: `contact.phones[].number`.

// -----------------------------------------------------------------------------
// Modules

mod bean_path;
mod parse;
mod path;
mod spec;

// -----------------------------------------------------------------------------
// Exports

pub use bean_path::BeanPath;
pub use path::Path;
pub use spec::PathSpec;

pub(crate) use parse::parse;
pub(crate) use path::Step;
