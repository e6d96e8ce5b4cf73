//! Paths of the `br_bean` items referred to by expansions.

use proc_macro2::TokenStream;
use quote::quote;

/// Get the correct access path to the `br_bean` crate.
///
/// 1. For crates that depend on `br_bean`, `::br_bean` is returned here.
/// 2. For crates that depend on `beanref`, `::beanref::bean` is returned here.
/// 3. For other situations, `::br_bean` is returned here, but this may be incorrect.
pub(crate) fn br_bean() -> syn::Path {
    br_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("br_bean"))
}

#[inline(always)]
pub(crate) fn bean_(br_bean_path: &syn::Path) -> TokenStream {
    quote! { #br_bean_path::info::Bean }
}

#[inline(always)]
pub(crate) fn bean_info_(br_bean_path: &syn::Path) -> TokenStream {
    quote! { #br_bean_path::info::BeanInfo }
}

#[inline(always)]
pub(crate) fn member_info_(br_bean_path: &syn::Path) -> TokenStream {
    quote! { #br_bean_path::info::MemberInfo }
}

#[inline(always)]
pub(crate) fn getter_(br_bean_path: &syn::Path) -> TokenStream {
    quote! { #br_bean_path::info::Getter }
}

#[inline(always)]
pub(crate) fn facet_(br_bean_path: &syn::Path) -> TokenStream {
    quote! { #br_bean_path::info::Facet }
}

#[inline(always)]
pub(crate) fn ordered_collection_(br_bean_path: &syn::Path) -> TokenStream {
    quote! { #br_bean_path::info::OrderedCollection }
}

#[inline(always)]
pub(crate) fn detect_(br_bean_path: &syn::Path) -> TokenStream {
    quote! { #br_bean_path::__macro_exports::detect }
}

#[inline(always)]
pub(crate) fn access_error_(br_bean_path: &syn::Path) -> TokenStream {
    quote! { #br_bean_path::AccessError }
}

#[inline(always)]
pub(crate) fn non_generic_bean_info_cell_(br_bean_path: &syn::Path) -> TokenStream {
    quote! { #br_bean_path::info::NonGenericBeanInfoCell }
}

#[inline(always)]
pub(crate) fn generic_bean_info_cell_(br_bean_path: &syn::Path) -> TokenStream {
    quote! { #br_bean_path::info::GenericBeanInfoCell }
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(br_bean_path: &syn::Path) -> TokenStream {
    quote! { #br_bean_path::__macro_exports::auto_register }
}

#[inline(always)]
pub(crate) fn any_() -> TokenStream {
    quote! { ::core::any::Any }
}

#[inline(always)]
pub(crate) fn option_() -> TokenStream {
    quote! { ::core::option::Option }
}

#[inline(always)]
pub(crate) fn result_() -> TokenStream {
    quote! { ::core::result::Result }
}
