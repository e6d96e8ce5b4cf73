//! See [`Bean`].
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static BEAN_ATTRIBUTE_NAME: &str = "bean";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Bean Derivation
///
/// `#[derive(Bean)]` implements `Bean` for a struct with named fields and
/// emits one `Getter` constant per property.
///
/// Each field becomes a property named after the field:
///
/// - the getter member is `get_<name>`, or `is_<name>` for `bool` fields;
/// - the setter member is `set_<name>`;
/// - the constant is the field name in upper case (`city` -> `CITY`).
///
/// An `Option<T>` field is a nullable property of type `T`. Any other field
/// is a non-nullable property of its own type: reading it never yields null
/// and writing null to it fails.
///
/// ```rust, ignore
/// #[derive(Bean, Default)]
/// #[bean(default)]
/// struct Contact {
///     email: Option<String>,      // Contact::EMAIL: Getter<Contact, String>
///     verified: bool,             // Contact::VERIFIED, member `is_verified`
/// }
/// ```
///
/// ## Type Attributes
///
/// - `default`: the type implements `Default`, which becomes its constructor.
///   Null intermediates of this type can then be instantiated on write.
/// - `synthetic`: the type is a wrapper. Its properties are those of its
///   facets (or of its parent when it has none).
/// - `auto_register`: collect the type so `BeanRegistry::auto_register`
///   registers it. Ignored on generic types.
///
/// ```rust, ignore
/// #[derive(Bean)]
/// #[bean(default, auto_register)]
/// struct Person { /* ... */ }
/// ```
///
/// ## Field Attributes
///
/// - `skip`: the field is not a property.
/// - `read_only`: no setter is generated.
/// - `rename = "name"`: the property (and its members) use `name`.
/// - `getter = "member"`: a non-canonical member name, shared by the getter
///   and the setter. The property name is derived from it by the usual
///   accessor rules, so `getter = "get"` gives a property named `get`.
/// - `collection`: the field holds an ordered collection (`Vec`, `VecDeque`,
///   `IndexSet`), addressable as `name[]` in dotted paths.
/// - `facet` / `parent`: the field is a bean exposed by this one. It is
///   projected onto rather than read as a property.
///
/// ```rust, ignore
/// #[derive(Bean)]
/// #[bean(synthetic)]
/// struct AuditedContact {
///     #[bean(facet)]
///     contact: Contact,
///     #[bean(skip)]
///     audit: Vec<String>,
/// }
/// ```
///
/// ## Generics
///
/// Generic types are supported; every type parameter must be `'static`.
/// Their infos are stored per instantiation.
#[proc_macro_derive(Bean, attributes(bean))]
pub fn derive_bean(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::BeanStruct::from_derive_input(&ast) {
        Ok(bean) => impls::impl_bean(&bean).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
