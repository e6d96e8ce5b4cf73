#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// The derive macro emits `::br_bean::...` paths, which must also resolve
// inside this crate (unit tests and doctests).
extern crate self as br_bean;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;

pub mod cache;
pub mod config;
pub mod engine;
pub mod info;
pub mod path;
pub mod property;
pub mod registry;
pub mod resolver;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use br_bean_derive as derive;
pub use engine::{BeanRefs, BeanRoot};
pub use error::{AccessError, BeanError, IncompletePathError, ReadOnlyError, Result};
pub use path::{BeanPath, Path, PathSpec};
