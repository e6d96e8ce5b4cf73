// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod getter_consts;
mod trait_bean;

// -----------------------------------------------------------------------------
// Internal API

use auto_register::get_auto_register_impl;
use getter_consts::impl_getter_consts;
use trait_bean::impl_trait_bean;

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::BeanStruct;

/// The full expansion of `#[derive(Bean)]`.
pub(crate) fn impl_bean(bean: &BeanStruct) -> TokenStream {
    let getter_consts = impl_getter_consts(bean);
    let trait_bean = impl_trait_bean(bean);
    let auto_register = get_auto_register_impl(bean);

    quote! {
        #getter_consts

        #trait_bean

        #auto_register
    }
}
