use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::BeanStruct;

/// One `Getter` constant per property, in an inherent impl.
///
/// ```ignore
/// impl Contact {
///     pub const EMAIL: Getter<Self, String> = Getter::<Self, String>::new(
///         "get_email",
///         |bean: &Self| bean.email.as_ref(),
///         |bean: &mut Self| bean.email.as_mut(),
///     );
/// }
/// ```
pub(crate) fn impl_getter_consts(bean: &BeanStruct) -> TokenStream {
    if bean.properties.is_empty() {
        return TokenStream::new();
    }

    let getter_ = crate::path::getter_(bean.br_bean_path());
    let option_ = crate::path::option_();
    let vis = bean.vis;

    let consts = bean.properties.iter().map(|property| {
        let field = property.field;
        let const_ident = &property.const_ident;
        let value_ty = property.value_ty;
        let member = &property.getter;
        let doc = format!(" Getter reference to the `{}` field.", field);

        let (read, read_mut) = if property.nullable {
            (
                quote! { bean.#field.as_ref() },
                quote! { bean.#field.as_mut() },
            )
        } else {
            (
                quote! { #option_::Some(&bean.#field) },
                quote! { #option_::Some(&mut bean.#field) },
            )
        };

        quote! {
            #[doc = #doc]
            #[allow(dead_code, reason = "not every property is addressed by getter")]
            #vis const #const_ident: #getter_<Self, #value_ty> = #getter_::<Self, #value_ty>::new(
                #member,
                |bean: &Self| #read,
                |bean: &mut Self| #read_mut,
            );
        }
    });

    let ident = bean.ident;
    let (impl_generics, ty_generics, where_clause) = bean.generics.split_for_impl();

    quote! {
        impl #impl_generics #ident #ty_generics #where_clause {
            #(#consts)*
        }
    }
}
