use alloc::borrow::Cow;
use alloc::boxed::Box;
use core::any::Any;
use core::fmt;
use core::hash::{Hash, Hasher};
use std::sync::OnceLock;

use crate::error::{ReadOnlyError, Result};
use crate::info::{Constructor, GetterInfo, ReadFn, ReadMutFn, SetterInfo, Type, WriteFn};
use crate::property::CollectionAccess;
use crate::registry::BeanRegistryArc;

enum Access {
    Plain {
        read: ReadFn,
        read_mut: ReadMutFn,
        write: Option<WriteFn>,
    },
    Collection(CollectionAccess),
}

/// One property of one bean type.
///
/// Equality and hashing only consider the declaring type and the property
/// name, so the plain and the collection descriptor of one property are
/// equal.
pub struct PropertyDescriptor {
    declaring: Type,
    value: Type,
    name: Cow<'static, str>,
    member: &'static str,
    access: Access,
    instantiator: OnceLock<Constructor>,
    registry: BeanRegistryArc,
}

impl PropertyDescriptor {
    pub(crate) fn plain(
        declaring: Type,
        name: Cow<'static, str>,
        member: &'static str,
        getter: &GetterInfo,
        setter: Option<&SetterInfo>,
        registry: BeanRegistryArc,
    ) -> Self {
        Self {
            declaring,
            value: getter.value_type(),
            name,
            member,
            access: Access::Plain {
                read: getter.read().clone(),
                read_mut: getter.read_mut().clone(),
                write: setter.map(|s| s.write().clone()),
            },
            instantiator: OnceLock::new(),
            registry,
        }
    }

    pub(crate) fn collection(
        declaring: Type,
        name: Cow<'static, str>,
        member: &'static str,
        access: CollectionAccess,
        registry: BeanRegistryArc,
    ) -> Self {
        Self {
            declaring,
            value: access.ops.element_type(),
            name,
            member,
            access: Access::Collection(access),
            instantiator: OnceLock::new(),
            registry,
        }
    }

    /// The bean type owning the property.
    #[inline(always)]
    pub fn declaring_type(&self) -> Type {
        self.declaring
    }

    /// The value type, or the element type for collection properties.
    #[inline(always)]
    pub fn value_type(&self) -> Type {
        self.value
    }

    /// The property name, e.g. `city` for `get_city`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The getter member the property was derived from.
    #[inline(always)]
    pub fn member(&self) -> &'static str {
        self.member
    }

    /// Returns `true` if the property has no setter.
    ///
    /// Collection properties are written by appending, so they are never
    /// read-only even if the collection itself cannot be replaced.
    pub fn is_read_only(&self) -> bool {
        match &self.access {
            Access::Plain { write, .. } => write.is_none(),
            Access::Collection(_) => false,
        }
    }

    #[inline]
    pub fn is_collection(&self) -> bool {
        matches!(self.access, Access::Collection(_))
    }

    /// The collection type behind a collection property.
    pub fn collection_type(&self) -> Option<Type> {
        match &self.access {
            Access::Plain { .. } => None,
            Access::Collection(access) => Some(access.ops.collection_type()),
        }
    }

    /// Reads the property of `bean`.
    ///
    /// `Ok(None)` is a null value, or an empty collection.
    pub fn get<'a>(&self, bean: &'a dyn Any) -> Result<Option<&'a dyn Any>> {
        match &self.access {
            Access::Plain { read, .. } => Ok(read(bean)?),
            Access::Collection(access) => access.last(bean),
        }
    }

    /// Mutable version of [`PropertyDescriptor::get`].
    pub fn get_mut<'a>(&self, bean: &'a mut dyn Any) -> Result<Option<&'a mut dyn Any>> {
        match &self.access {
            Access::Plain { read_mut, .. } => Ok(read_mut(bean)?),
            Access::Collection(access) => access.last_mut(bean),
        }
    }

    /// Writes `value` into the property of `bean`.
    ///
    /// For collection properties, `Some` appends and `None` clears.
    pub fn set(&self, bean: &mut dyn Any, value: Option<Box<dyn Any>>) -> Result<()> {
        match &self.access {
            Access::Plain { write: Some(write), .. } => Ok(write(bean, value)?),
            Access::Plain { write: None, .. } => Err(self.read_only_error().into()),
            Access::Collection(access) => {
                access.write(bean, value, self.declaring.short_name(), &self.name)
            }
        }
    }

    /// A factory for default values of [`value_type`](Self::value_type).
    ///
    /// Looked up in the registry on first use and memoized once found.
    /// `None` if the value type is not a registered bean with a constructor.
    pub fn instantiator(&self) -> Option<Constructor> {
        if let Some(constructor) = self.instantiator.get() {
            return Some(*constructor);
        }
        let constructor = self.registry.read().constructor_of(self.value.id())?;
        log::trace!(
            "instantiator of `{}` found for `{}.{}`",
            self.value,
            self.declaring,
            self.name,
        );
        Some(*self.instantiator.get_or_init(|| constructor))
    }

    pub(crate) fn read_only_error(&self) -> ReadOnlyError {
        ReadOnlyError::new(self.declaring.short_name(), self.name.clone())
    }
}

impl PartialEq for PropertyDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.declaring == other.declaring && self.name == other.name
    }
}

impl Eq for PropertyDescriptor {}

impl Hash for PropertyDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.declaring.hash(state);
        self.name.hash(state);
    }
}

impl fmt::Debug for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("declaring", &self.declaring)
            .field("name", &self.name)
            .field("value", &self.value)
            .field("read_only", &self.is_read_only())
            .field("collection", &self.collection_type())
            .finish()
    }
}

impl fmt::Display for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.declaring, self.name)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::*;
    use crate::BeanError;
    use crate::info::{CollectionOps, Getter, MemberInfo};
    use crate::registry::BeanRegistry;

    #[derive(Default)]
    struct Contact {
        email: Option<String>,
        phones: Option<Vec<String>>,
    }

    const EMAIL: Getter<Contact, String> = Getter::new(
        "get_email",
        |c: &Contact| c.email.as_ref(),
        |c: &mut Contact| c.email.as_mut(),
    );

    const PHONES: Getter<Contact, Vec<String>> = Getter::new(
        "get_phones",
        |c: &Contact| c.phones.as_ref(),
        |c: &mut Contact| c.phones.as_mut(),
    );

    fn email(writable: bool) -> PropertyDescriptor {
        let getter = MemberInfo::getter(EMAIL);
        let setter = MemberInfo::setter::<Contact, String>("set_email", |c, v| {
            c.email = v;
            Ok(())
        });
        PropertyDescriptor::plain(
            Type::of::<Contact>(),
            Cow::Borrowed("email"),
            "get_email",
            getter.as_getter().unwrap(),
            if writable { setter.as_setter() } else { None },
            BeanRegistryArc::new(BeanRegistry::empty()),
        )
    }

    fn phones(writable: bool) -> PropertyDescriptor {
        let getter = MemberInfo::getter(PHONES);
        let getter = getter.as_getter().unwrap();
        let setter = MemberInfo::setter::<Contact, Vec<String>>("set_phones", |c, v| {
            c.phones = v;
            Ok(())
        });
        let access = CollectionAccess::new(
            getter.read().clone(),
            getter.read_mut().clone(),
            if writable {
                setter.as_setter().map(|s| s.write().clone())
            } else {
                None
            },
            CollectionOps::of::<Vec<String>>(),
            None,
        );
        PropertyDescriptor::collection(
            Type::of::<Contact>(),
            Cow::Borrowed("phones"),
            "get_phones",
            access,
            BeanRegistryArc::new(BeanRegistry::empty()),
        )
    }

    #[test]
    fn plain_read_write() {
        let descriptor = email(true);
        let mut contact = Contact::default();
        assert!(descriptor.get(&contact).unwrap().is_none());

        descriptor
            .set(&mut contact, Some(Box::new(String::from("a@b.c"))))
            .unwrap();
        let value = descriptor.get(&contact).unwrap().unwrap();
        assert_eq!(value.downcast_ref::<String>().unwrap(), "a@b.c");
        assert!(descriptor.value_type().is::<String>());
        assert!(descriptor.instantiator().is_none());
    }

    #[test]
    fn read_only_rejects_writes() {
        let descriptor = email(false);
        assert!(descriptor.is_read_only());
        let error = descriptor
            .set(&mut Contact::default(), None)
            .unwrap_err();
        match error {
            BeanError::ReadOnly(e) => {
                assert_eq!(e.owner(), "Contact");
                assert_eq!(e.property(), "email");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn collection_last_append_clear() {
        let descriptor = phones(true);
        assert!(!descriptor.is_read_only());
        assert!(descriptor.value_type().is::<String>());

        let mut contact = Contact::default();
        assert!(descriptor.get(&contact).unwrap().is_none());

        descriptor
            .set(&mut contact, Some(Box::new(String::from("555-1"))))
            .unwrap();
        descriptor
            .set(&mut contact, Some(Box::new(String::from("555-2"))))
            .unwrap();
        let last = descriptor.get(&contact).unwrap().unwrap();
        assert_eq!(last.downcast_ref::<String>().unwrap(), "555-2");

        descriptor.set(&mut contact, None).unwrap();
        assert_eq!(contact.phones.as_deref(), Some(&[][..]));
    }

    #[test]
    fn clearing_a_null_collection_materializes_it() {
        let descriptor = phones(true);
        let mut contact = Contact::default();
        descriptor.set(&mut contact, None).unwrap();
        assert_eq!(contact.phones, Some(Vec::new()));
    }

    #[test]
    fn null_read_only_collection_is_incomplete() {
        let descriptor = phones(false);
        let error = descriptor
            .set(&mut Contact::default(), Some(Box::new(String::from("555"))))
            .unwrap_err();
        match error {
            BeanError::IncompletePath(e) => assert!(e.read_only().is_some()),
            other => panic!("unexpected {other:?}"),
        }

        // An existing collection stays appendable.
        let mut contact = Contact {
            phones: Some(Vec::new()),
            ..Contact::default()
        };
        descriptor
            .set(&mut contact, Some(Box::new(String::from("555"))))
            .unwrap();
        assert_eq!(contact.phones.unwrap(), ["555"]);
    }

    #[test]
    fn identity_is_declaring_type_and_name() {
        assert_eq!(email(true), email(false));
        assert_ne!(email(true), phones(true));
        assert_eq!(email(true).to_string(), "Contact.email");
    }
}
