use proc_macro2::TokenStream;
use quote::quote;
use syn::{WhereClause, parse_quote};

use crate::derive_data::{BeanProjection, BeanProperty, BeanStruct};

/// Generate the `Bean` implementation.
///
/// ```ignore
/// impl Bean for Contact {
///     fn bean_info() -> &'static BeanInfo {
///         static CELL: NonGenericBeanInfoCell = NonGenericBeanInfoCell::new();
///         CELL.get_or_init(|| {
///             BeanInfo::new::<Self>()
///                 .with_member(MemberInfo::getter(Self::EMAIL).with_value_bean(None))
///                 .with_member(MemberInfo::setter::<Self, String>("set_email", ...))
///                 .with_default::<Self>()
///         })
///     }
/// }
/// ```
pub(crate) fn impl_trait_bean(bean: &BeanStruct) -> TokenStream {
    let br_bean_path = bean.br_bean_path();
    let bean_ = crate::path::bean_(br_bean_path);
    let bean_info_ = crate::path::bean_info_(br_bean_path);

    let members = bean
        .properties
        .iter()
        .flat_map(|property| member_tokens(br_bean_path, property));

    let facet_ = crate::path::facet_(br_bean_path);
    let projection = |projection: &BeanProjection| {
        let field = projection.field;
        let ty = projection.ty;
        quote! {
            #facet_::new::<Self, #ty>(|bean: &Self| &bean.#field, |bean: &mut Self| &mut bean.#field)
        }
    };
    let facets = bean.facets.iter().map(projection);
    let parent = bean.parent.as_ref().map(|parent| {
        let parent = projection(parent);
        quote! { .with_parent(#parent) }
    });

    let default = bean
        .attrs
        .default
        .map(|_| quote! { .with_default::<Self>() });
    let synthetic = bean.attrs.synthetic.map(|_| quote! { .synthetic() });

    let build = quote! {
        || {
            #bean_info_::new::<Self>()
                #(.with_member(#members))*
                #(.with_facet(#facets))*
                #parent
                #default
                #synthetic
        }
    };

    let ident = bean.ident;
    let (impl_generics, ty_generics, _) = bean.generics.split_for_impl();

    let body = if bean.is_generic() {
        let cell_ = crate::path::generic_bean_info_cell_(br_bean_path);
        quote! {
            static CELL: #cell_ = #cell_::new();
            CELL.get_or_insert::<Self>(#build)
        }
    } else {
        let cell_ = crate::path::non_generic_bean_info_cell_(br_bean_path);
        quote! {
            static CELL: #cell_ = #cell_::new();
            CELL.get_or_init(#build)
        }
    };

    let where_clause = bean_where_clause(bean);

    quote! {
        impl #impl_generics #bean_ for #ident #ty_generics #where_clause {
            fn bean_info() -> &'static #bean_info_ {
                #body
            }
        }
    }
}

/// The getter member of a property, followed by its setter member.
fn member_tokens(br_bean_path: &syn::Path, property: &BeanProperty) -> Vec<TokenStream> {
    let member_info_ = crate::path::member_info_(br_bean_path);
    let const_ident = &property.const_ident;

    let value_ty = property.value_ty;

    let detect_ = crate::path::detect_(br_bean_path);
    let bean_ty = if property.collection {
        let collection_ = crate::path::ordered_collection_(br_bean_path);
        quote! { <#value_ty as #collection_>::Item }
    } else {
        quote! { #value_ty }
    };
    let value_bean = quote! {
        {
            #[allow(unused_imports)]
            use #detect_::{__ViaAny as _, __ViaBean as _};
            (&&#detect_::DetectBean::<#bean_ty>::new()).__value_bean()
        }
    };

    let getter = if property.collection {
        quote! { #member_info_::collection_getter(Self::#const_ident).with_value_bean(#value_bean) }
    } else {
        quote! { #member_info_::getter(Self::#const_ident).with_value_bean(#value_bean) }
    };

    let Some(setter) = &property.setter else {
        return vec![getter];
    };

    let access_error_ = crate::path::access_error_(br_bean_path);
    let option_ = crate::path::option_();
    let result_ = crate::path::result_();
    let field = property.field;

    let assign = if property.nullable {
        quote! { bean.#field = value; }
    } else {
        quote! { bean.#field = value.ok_or(#access_error_::null_value(#setter))?; }
    };

    let setter = quote! {
        #member_info_::setter::<Self, #value_ty>(
            #setter,
            |bean: &mut Self, value: #option_<#value_ty>| -> #result_<(), #access_error_> {
                #assign
                #result_::Ok(())
            },
        )
    };
    vec![getter, setter]
}

/// The original where clause, plus the bounds the generated members need
/// when the type is generic.
fn bean_where_clause(bean: &BeanStruct) -> Option<WhereClause> {
    if !bean.is_generic() {
        return bean.generics.where_clause.clone();
    }

    let br_bean_path = bean.br_bean_path();
    let any_ = crate::path::any_();
    let bean_ = crate::path::bean_(br_bean_path);
    let collection_ = crate::path::ordered_collection_(br_bean_path);

    let mut where_clause = bean
        .generics
        .where_clause
        .clone()
        .unwrap_or_else(|| parse_quote! { where });

    for param in bean.generics.type_params() {
        let ident = &param.ident;
        where_clause.predicates.push(parse_quote! { #ident: #any_ });
    }
    for property in &bean.properties {
        let value_ty = property.value_ty;
        if property.collection {
            where_clause.predicates.push(parse_quote! { #value_ty: #collection_ });
        } else {
            where_clause.predicates.push(parse_quote! { #value_ty: #any_ });
        }
    }
    for projection in bean.facets.iter().chain(&bean.parent) {
        let ty = projection.ty;
        where_clause.predicates.push(parse_quote! { #ty: #bean_ });
    }
    if bean.attrs.default.is_some() {
        where_clause.predicates.push(parse_quote! { Self: ::core::default::Default });
    }

    Some(where_clause)
}
