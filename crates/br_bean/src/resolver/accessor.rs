use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::{Any, TypeId};

use crate::cache::{CachePolicy, MetadataCache};
use crate::error::{BeanError, Result};
use crate::info::{Bean, BeanInfo, CollectionOps, Getter, GetterInfo, MemberKind};
use crate::info::{OrderedCollection, Type};
use crate::property::{CollectionAccess, CollectionFactory, PropertyDescriptor};
use crate::registry::BeanRegistryArc;
use crate::resolver::{property_name, setter_name};

/// Cache key of a resolved accessor.
///
/// The typed and the name-based routes to one member produce the same
/// key, so both return the same descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct AccessorKey {
    owner: TypeId,
    member: &'static str,
    collection: bool,
    // Address of the user collection factory, 0 for the default one.
    factory: usize,
}

/// Turns getter references and member names into cached descriptors.
pub(crate) struct AccessorResolver {
    cache: Box<dyn MetadataCache<AccessorKey, Arc<PropertyDescriptor>>>,
    registry: BeanRegistryArc,
}

impl AccessorResolver {
    pub fn new(registry: BeanRegistryArc, policy: &CachePolicy) -> Self {
        Self {
            cache: policy.build(),
            registry,
        }
    }

    #[inline]
    pub fn registry(&self) -> &BeanRegistryArc {
        &self.registry
    }

    #[inline]
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Resolves a typed getter reference.
    pub fn resolve<B: Bean, V: Any>(&self, getter: Getter<B, V>) -> Result<Arc<PropertyDescriptor>> {
        let info = self.declaring::<B>();
        let member = Self::getter_of(info, getter.member())?;
        if member.value_type() != Type::of::<V>() {
            return Err(BeanError::illegal_path(format!(
                "member `{}` of `{}` returns `{}`, not `{}`",
                getter.member(),
                info.ty(),
                member.value_type(),
                Type::of::<V>(),
            )));
        }
        self.member(info, getter.member())
    }

    /// Resolves a typed getter reference to a collection property.
    ///
    /// `factory` creates the collection when it is null; without one the
    /// collection's empty value is used if the property is writable.
    pub fn resolve_collection<B: Bean, C: OrderedCollection>(
        &self,
        getter: Getter<B, C>,
        factory: Option<fn() -> C>,
    ) -> Result<Arc<PropertyDescriptor>> {
        let info = self.declaring::<B>();
        let member = Self::getter_of(info, getter.member())?;
        if member.value_type() != Type::of::<C>() {
            return Err(BeanError::illegal_path(format!(
                "member `{}` of `{}` returns `{}`, not `{}`",
                getter.member(),
                info.ty(),
                member.value_type(),
                Type::of::<C>(),
            )));
        }

        let key = AccessorKey {
            owner: info.ty().id(),
            member: getter.member(),
            collection: true,
            factory: factory.map_or(0, |f| f as usize),
        };
        let erased = factory.map(|f| {
            Arc::new(move || Some(Box::new(f()) as Box<dyn Any>)) as CollectionFactory
        });

        self.cache.get_or_compute(key, &mut |key| {
            self.build_collection(info, key.member, member, CollectionOps::of::<C>(), erased.clone())
        })
    }

    /// Resolves the plain descriptor of a getter member by name.
    pub fn member(&self, info: &'static BeanInfo, member: &'static str) -> Result<Arc<PropertyDescriptor>> {
        let key = AccessorKey {
            owner: info.ty().id(),
            member,
            collection: false,
            factory: 0,
        };
        self.cache.get_or_compute(key, &mut |key| {
            let getter = Self::getter_of(info, key.member)?;
            Ok(Arc::new(self.build_plain(info, key.member, getter)))
        })
    }

    /// Resolves the collection descriptor of a getter member by name,
    /// using the collection operations the member declares.
    pub fn member_collection(
        &self,
        info: &'static BeanInfo,
        member: &'static str,
    ) -> Result<Arc<PropertyDescriptor>> {
        let key = AccessorKey {
            owner: info.ty().id(),
            member,
            collection: true,
            factory: 0,
        };
        self.cache.get_or_compute(key, &mut |key| {
            let getter = Self::getter_of(info, key.member)?;
            let Some(ops) = getter.collection() else {
                return Err(BeanError::illegal_argument(format!(
                    "cannot determine the element type of `{}` in `{}`, \
                     its value `{}` is not a declared collection",
                    key.member,
                    info.ty(),
                    getter.value_type(),
                )));
            };
            self.build_collection(info, key.member, getter, *ops, None)
        })
    }

    fn declaring<B: Bean>(&self) -> &'static BeanInfo {
        self.registry.ensure::<B>();
        B::bean_info()
    }

    /// The getter declared as `member`, or why `member` is not one.
    fn getter_of(info: &'static BeanInfo, member: &str) -> Result<&'static GetterInfo> {
        if let Some(getter) = info.getter(member) {
            return Ok(getter);
        }
        let reason = match info.members_named(member).next().map(|m| m.kind()) {
            Some(MemberKind::Setter(_)) => "takes parameters",
            Some(MemberKind::Action) => "returns no value",
            Some(MemberKind::Getter(_)) | None => "is not a declared member",
        };
        Err(BeanError::illegal_path(format!(
            "`{member}` of `{}` {reason}",
            info.ty()
        )))
    }

    fn build_plain(
        &self,
        info: &'static BeanInfo,
        member: &'static str,
        getter: &'static GetterInfo,
    ) -> PropertyDescriptor {
        let name = property_name(member);
        let setter = info
            .setter(&setter_name(member))
            .filter(|setter| setter.value_type() == getter.value_type());
        log::debug!(
            "resolved property `{name}` of `{}` from `{member}` ({})",
            info.ty(),
            if setter.is_some() { "writable" } else { "read-only" },
        );
        PropertyDescriptor::plain(
            info.ty(),
            name,
            member,
            getter,
            setter,
            self.registry.clone(),
        )
    }

    fn build_collection(
        &self,
        info: &'static BeanInfo,
        member: &'static str,
        getter: &'static GetterInfo,
        ops: CollectionOps,
        factory: Option<CollectionFactory>,
    ) -> Result<Arc<PropertyDescriptor>> {
        if ops.collection_type() != getter.value_type() {
            return Err(BeanError::illegal_argument(format!(
                "`{member}` of `{}` returns `{}`, which is not `{}`",
                info.ty(),
                getter.value_type(),
                ops.collection_type(),
            )));
        }
        let name = property_name(member);
        let write = info
            .setter(&setter_name(member))
            .filter(|setter| setter.value_type() == getter.value_type())
            .map(|setter| setter.write().clone());
        log::debug!(
            "resolved collection property `{name}` of `{}` with elements `{}`",
            info.ty(),
            ops.element_type(),
        );
        let access = CollectionAccess::new(
            getter.read().clone(),
            getter.read_mut().clone(),
            write,
            ops,
            factory,
        );
        Ok(Arc::new(PropertyDescriptor::collection(
            info.ty(),
            name,
            member,
            access,
            self.registry.clone(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::*;
    use crate::AccessError;
    use crate::info::{MemberInfo, NonGenericBeanInfoCell};
    use crate::registry::BeanRegistry;

    #[derive(Default)]
    struct Contact {
        email: Option<String>,
        phones: Option<Vec<String>>,
        id: u32,
    }

    impl Contact {
        const EMAIL: Getter<Self, String> = Getter::new(
            "get_email",
            |c: &Self| c.email.as_ref(),
            |c: &mut Self| c.email.as_mut(),
        );
        const PHONES: Getter<Self, Vec<String>> = Getter::new(
            "get_phones",
            |c: &Self| c.phones.as_ref(),
            |c: &mut Self| c.phones.as_mut(),
        );
        const ID: Getter<Self, u32> =
            Getter::new("id", |c: &Self| Some(&c.id), |c: &mut Self| Some(&mut c.id));
        // Declared with the wrong value type.
        const BAD_ID: Getter<Self, u64> = Getter::new("id", |_| None, |_| None);
        const RESET: Getter<Self, u32> = Getter::new("reset", |_| None, |_| None);
        const SET_EMAIL: Getter<Self, String> = Getter::new("set_email", |_| None, |_| None);
    }

    impl Bean for Contact {
        fn bean_info() -> &'static BeanInfo {
            static CELL: NonGenericBeanInfoCell = NonGenericBeanInfoCell::new();
            CELL.get_or_init(|| {
                BeanInfo::new::<Self>()
                    .with_member(MemberInfo::getter(Self::EMAIL))
                    .with_member(MemberInfo::setter::<Self, String>("set_email", |c, v| {
                        c.email = v;
                        Ok(())
                    }))
                    .with_member(MemberInfo::collection_getter(Self::PHONES))
                    .with_member(MemberInfo::setter::<Self, Vec<String>>("set_phones", |c, v| {
                        c.phones = v;
                        Ok(())
                    }))
                    .with_member(MemberInfo::getter(Self::ID))
                    .with_member(MemberInfo::setter::<Self, u32>("id", |c, v| {
                        c.id = v.ok_or(AccessError::null_value("id"))?;
                        Ok(())
                    }))
                    .with_member(MemberInfo::action("reset"))
                    .with_default::<Self>()
            })
        }
    }

    fn resolver() -> AccessorResolver {
        AccessorResolver::new(
            BeanRegistryArc::new(BeanRegistry::empty()),
            &CachePolicy::Unbounded,
        )
    }

    #[test]
    fn same_reference_same_descriptor() {
        let resolver = resolver();
        let first = resolver.resolve(Contact::EMAIL).unwrap();
        let second = resolver.resolve(Contact::EMAIL).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.name(), "email");
        assert!(!first.is_read_only());

        let by_name = resolver.member(Contact::bean_info(), "get_email").unwrap();
        assert!(Arc::ptr_eq(&first, &by_name));
        assert!(resolver.registry().read().contains(TypeId::of::<Contact>()));
    }

    #[test]
    fn non_canonical_member_pairs_with_same_name() {
        let descriptor = resolver().resolve(Contact::ID).unwrap();
        assert_eq!(descriptor.name(), "id");
        assert!(!descriptor.is_read_only());
    }

    #[test]
    fn illegal_references() {
        let resolver = resolver();
        let message = |e: BeanError| match e {
            BeanError::IllegalPath(message) => message,
            other => panic!("unexpected {other:?}"),
        };

        let e = resolver.resolve(Contact::RESET).unwrap_err();
        assert!(message(e).ends_with("returns no value"));
        let e = resolver.resolve(Contact::SET_EMAIL).unwrap_err();
        assert!(message(e).ends_with("takes parameters"));
        let e = resolver.resolve(Contact::BAD_ID).unwrap_err();
        assert!(message(e).contains("returns `u32`"));
        let e = resolver.member(Contact::bean_info(), "get_fax").unwrap_err();
        assert!(message(e).ends_with("is not a declared member"));
    }

    #[test]
    fn collection_routes_share_descriptors() {
        let resolver = resolver();
        let typed = resolver.resolve_collection(Contact::PHONES, None).unwrap();
        let named = resolver
            .member_collection(Contact::bean_info(), "get_phones")
            .unwrap();
        assert!(Arc::ptr_eq(&typed, &named));
        assert!(typed.value_type().is::<String>());

        let custom = resolver
            .resolve_collection(Contact::PHONES, Some(Vec::new))
            .unwrap();
        assert!(!Arc::ptr_eq(&typed, &custom));
        assert_eq!(typed, custom);

        let e = resolver
            .member_collection(Contact::bean_info(), "get_email")
            .unwrap_err();
        assert!(matches!(e, BeanError::IllegalArgument(_)));
    }
}
