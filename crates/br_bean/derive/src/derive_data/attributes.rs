use proc_macro2::Span;
use syn::{Attribute, LitStr, meta::ParseNestedMeta, spanned::Spanned};

use crate::BEAN_ATTRIBUTE_NAME;

fn set_flag(slot: &mut Option<Span>, meta: &ParseNestedMeta) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error("duplicate attribute"));
    }
    *slot = Some(meta.path.span());
    Ok(())
}

fn set_str(slot: &mut Option<LitStr>, meta: &ParseNestedMeta) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error("duplicate attribute"));
    }
    let lit: LitStr = meta.value()?.parse()?;
    if lit.value().is_empty() {
        return Err(syn::Error::new(lit.span(), "expected a non-empty name"));
    }
    *slot = Some(lit);
    Ok(())
}

// -----------------------------------------------------------------------------
// TypeAttributes

/// Attributes placed on the struct: `#[bean(default, synthetic, auto_register)]`.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    pub default: Option<Span>,
    pub synthetic: Option<Span>,
    pub auto_register: Option<Span>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in attrs {
            if !attr.path().is_ident(BEAN_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("default") {
                    set_flag(&mut out.default, &meta)
                } else if meta.path.is_ident("synthetic") {
                    set_flag(&mut out.synthetic, &meta)
                } else if meta.path.is_ident("auto_register") {
                    set_flag(&mut out.auto_register, &meta)
                } else {
                    Err(meta.error(
                        "unknown type attribute, expected `default`, `synthetic` or `auto_register`",
                    ))
                }
            })?;
        }
        Ok(out)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// Attributes placed on a field.
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    pub skip: Option<Span>,
    pub read_only: Option<Span>,
    pub collection: Option<Span>,
    pub facet: Option<Span>,
    pub parent: Option<Span>,
    pub rename: Option<LitStr>,
    pub getter: Option<LitStr>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in attrs {
            if !attr.path().is_ident(BEAN_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    set_flag(&mut out.skip, &meta)
                } else if meta.path.is_ident("read_only") {
                    set_flag(&mut out.read_only, &meta)
                } else if meta.path.is_ident("collection") {
                    set_flag(&mut out.collection, &meta)
                } else if meta.path.is_ident("facet") {
                    set_flag(&mut out.facet, &meta)
                } else if meta.path.is_ident("parent") {
                    set_flag(&mut out.parent, &meta)
                } else if meta.path.is_ident("rename") {
                    set_str(&mut out.rename, &meta)
                } else if meta.path.is_ident("getter") {
                    set_str(&mut out.getter, &meta)
                } else {
                    Err(meta.error("unknown field attribute"))
                }
            })?;
        }
        out.validate()?;
        Ok(out)
    }

    fn property_attribute(&self) -> Option<Span> {
        self.read_only
            .or(self.collection)
            .or(self.rename.as_ref().map(LitStr::span))
            .or(self.getter.as_ref().map(LitStr::span))
    }

    fn validate(&self) -> syn::Result<()> {
        let conflict = |span: Span, message: &str| Err(syn::Error::new(span, message));

        if let Some(skip) = self.skip
            && (self.facet.is_some() || self.parent.is_some() || self.property_attribute().is_some())
        {
            return conflict(skip, "`skip` cannot be combined with other attributes");
        }
        if let (Some(_), Some(parent)) = (self.facet, self.parent) {
            return conflict(parent, "a field is either a `facet` or the `parent`");
        }
        if let Some(projection) = self.facet.or(self.parent)
            && self.property_attribute().is_some()
        {
            return conflict(projection, "a projected field is not a property");
        }
        if let (Some(_), Some(getter)) = (&self.rename, &self.getter) {
            return conflict(getter.span(), "`getter` already names the property, drop `rename`");
        }
        Ok(())
    }
}
