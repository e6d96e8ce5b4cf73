use proc_macro2::Span;
use quote::format_ident;
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, GenericArgument, Generics, Ident, LitStr};
use syn::{PathArguments, Type, Visibility};

use super::{FieldAttributes, TypeAttributes};

// -----------------------------------------------------------------------------
// BeanProperty

/// A field exposed as a property.
pub(crate) struct BeanProperty<'a> {
    pub field: &'a Ident,
    /// Name of the emitted `Getter` constant.
    pub const_ident: Ident,
    pub getter: String,
    /// `None` for read-only properties.
    pub setter: Option<String>,
    /// The field type, without `Option`.
    pub value_ty: &'a Type,
    pub nullable: bool,
    pub collection: bool,
}

// -----------------------------------------------------------------------------
// BeanProjection

/// A field marked `facet` or `parent`.
pub(crate) struct BeanProjection<'a> {
    pub field: &'a Ident,
    pub ty: &'a Type,
}

// -----------------------------------------------------------------------------
// BeanStruct

pub(crate) struct BeanStruct<'a> {
    br_bean_path: syn::Path,
    pub ident: &'a Ident,
    pub vis: &'a Visibility,
    pub generics: &'a Generics,
    pub attrs: TypeAttributes,
    pub properties: Vec<BeanProperty<'a>>,
    pub facets: Vec<BeanProjection<'a>>,
    pub parent: Option<BeanProjection<'a>>,
}

impl<'a> BeanStruct<'a> {
    pub fn from_derive_input(ast: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse_attrs(&ast.attrs)?;

        if let Some(lifetime) = ast.generics.lifetimes().next() {
            return Err(syn::Error::new(
                lifetime.span(),
                "beans are `'static`, lifetime parameters are not supported",
            ));
        }

        let fields = match &ast.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(fields) => &fields.named,
                _ => return Err(unsupported(ast.ident.span())),
            },
            _ => return Err(unsupported(ast.ident.span())),
        };

        let mut properties = Vec::new();
        let mut facets = Vec::new();
        let mut parent = None;

        for field in fields {
            let field_attrs = FieldAttributes::parse_attrs(&field.attrs)?;
            // Named fields always carry an ident.
            let Some(ident) = &field.ident else {
                return Err(unsupported(field.span()));
            };

            if field_attrs.skip.is_some() {
                continue;
            }
            if field_attrs.facet.is_some() {
                facets.push(BeanProjection { field: ident, ty: &field.ty });
                continue;
            }
            if let Some(span) = field_attrs.parent {
                if parent.is_some() {
                    return Err(syn::Error::new(span, "a bean has at most one `parent`"));
                }
                parent = Some(BeanProjection { field: ident, ty: &field.ty });
                continue;
            }

            properties.push(BeanProperty::new(ident, &field.ty, &field_attrs));
        }

        Ok(Self {
            br_bean_path: crate::path::br_bean(),
            ident: &ast.ident,
            vis: &ast.vis,
            generics: &ast.generics,
            attrs,
            properties,
            facets,
            parent,
        })
    }

    #[inline]
    pub fn br_bean_path(&self) -> &syn::Path {
        &self.br_bean_path
    }

    #[inline]
    pub fn is_generic(&self) -> bool {
        !self.generics.params.is_empty()
    }
}

fn unsupported(span: Span) -> syn::Error {
    syn::Error::new(span, "`#[derive(Bean)]` only supports structs with named fields")
}

impl<'a> BeanProperty<'a> {
    fn new(field: &'a Ident, ty: &'a Type, attrs: &FieldAttributes) -> Self {
        let (value_ty, nullable) = match option_inner(ty) {
            Some(inner) => (inner, true),
            None => (ty, false),
        };

        let name = field.unraw().to_string();
        let const_ident = format_ident!("{}", name.to_uppercase(), span = field.span());

        let (getter, setter) = match &attrs.getter {
            Some(member) => (member.value(), member.value()),
            None => {
                let name = attrs.rename.as_ref().map_or(name, LitStr::value);
                let prefix = if !nullable && is_bool(value_ty) { "is" } else { "get" };
                (format!("{prefix}_{name}"), format!("set_{name}"))
            }
        };

        Self {
            field,
            const_ident,
            getter,
            setter: attrs.read_only.is_none().then_some(setter),
            value_ty,
            nullable,
            collection: attrs.collection.is_some(),
        }
    }
}

/// `T` if `ty` is spelled `Option<T>` (with any path prefix).
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else { return None };
    if path.qself.is_some() {
        return None;
    }
    let last = path.path.segments.last()?;
    if last.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &last.arguments else {
        return None;
    };
    match args.args.first() {
        Some(GenericArgument::Type(inner)) if args.args.len() == 1 => Some(inner),
        _ => None,
    }
}

fn is_bool(ty: &Type) -> bool {
    matches!(ty, Type::Path(path) if path.qself.is_none() && path.path.is_ident("bool"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(tokens: proc_macro2::TokenStream) -> DeriveInput {
        syn::parse2(tokens).unwrap()
    }

    #[test]
    fn member_names_follow_field_kinds() {
        let ast = parse(quote::quote! {
            struct Phone {
                number: Option<String>,
                active: bool,
                #[bean(read_only)]
                verified: Option<bool>,
                #[bean(rename = "kind")]
                r#type: String,
                #[bean(getter = "get")]
                value: Option<u8>,
                #[bean(skip)]
                cache: Vec<u8>,
            }
        });
        let bean = BeanStruct::from_derive_input(&ast).unwrap();
        let members: Vec<_> = bean
            .properties
            .iter()
            .map(|p| (p.const_ident.to_string(), p.getter.as_str(), p.setter.as_deref(), p.nullable))
            .collect();

        assert_eq!(
            members,
            [
                ("NUMBER".to_string(), "get_number", Some("set_number"), true),
                ("ACTIVE".to_string(), "is_active", Some("set_active"), false),
                ("VERIFIED".to_string(), "get_verified", None, true),
                ("TYPE".to_string(), "get_kind", Some("set_kind"), false),
                ("VALUE".to_string(), "get", Some("get"), true),
            ]
        );
    }

    #[test]
    fn projections_are_not_properties() {
        let ast = parse(quote::quote! {
            struct Proxy {
                #[bean(parent)]
                base: Base,
                #[bean(facet)]
                named: Named,
            }
        });
        let bean = BeanStruct::from_derive_input(&ast).unwrap();
        assert!(bean.properties.is_empty());
        assert_eq!(bean.facets.len(), 1);
        assert!(bean.parent.is_some());
    }

    #[test]
    fn rejected_inputs() {
        let cases = [
            quote::quote! { struct Pair(u8, u8); },
            quote::quote! { enum Kind { A } },
            quote::quote! { struct View<'a> { name: &'a str } },
            quote::quote! { struct A { #[bean(skip, read_only)] x: u8 } },
            quote::quote! { struct A { #[bean(facet, parent)] x: B } },
            quote::quote! { struct A { #[bean(facet, collection)] x: B } },
            quote::quote! { struct A { #[bean(rename = "y", getter = "z")] x: u8 } },
            quote::quote! { struct A { #[bean(parent)] x: B, #[bean(parent)] y: C } },
            quote::quote! { #[bean(default, default)] struct A { x: u8 } },
            quote::quote! { #[bean(unknown)] struct A { x: u8 } },
        ];
        for tokens in cases {
            let ast = parse(tokens);
            assert!(BeanStruct::from_derive_input(&ast).is_err());
        }
    }
}
