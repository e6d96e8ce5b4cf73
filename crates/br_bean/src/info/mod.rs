//! Provide static metadata describing beans.
//!
//! ## Menu
//!
//! - [`Type`]: runtime identity of a type (`TypeId` + name).
//! - [`Getter`]: a typed accessor reference, `B -> Option<&V>`.
//! - [`MemberInfo`]: one member of a bean (getter, setter or action).
//! - [`BeanInfo`]: the member table of a bean type, plus constructor, facets and parent.
//! - [`Bean`]: the static accessor to a type's [`BeanInfo`].
//! - [`NonGenericBeanInfoCell`] / [`GenericBeanInfoCell`]: memoize hand-written infos.
//! - [`OrderedCollection`] / [`CollectionOps`]: collections exposed through their last element.
//! - [`Ref`]: a nullable single-value cell bean.
//!
//! Most beans get all of this from [`#[derive(Bean)]`](crate::derive::Bean).

// -----------------------------------------------------------------------------
// Modules

mod bean;
mod bean_info;
mod collection;
mod getter;
mod member;
mod reference;
mod ty;

// -----------------------------------------------------------------------------
// Exports

pub use bean::{Bean, GenericBeanInfoCell, NonGenericBeanInfoCell};
pub use bean_info::{BeanInfo, BeanOrigin, Constructor, Facet};
pub use collection::{CollectionOps, OrderedCollection};
pub use getter::Getter;
pub use member::{GetterInfo, MemberInfo, MemberKind, SetterInfo};
pub use member::{ReadFn, ReadMutFn, WriteFn};
pub use reference::Ref;
pub use ty::Type;
