use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::Any;
use core::fmt;

use crate::error::AccessError;
use crate::info::{BeanInfo, CollectionOps, Getter, OrderedCollection, Type};

// -----------------------------------------------------------------------------
// Erased accessors

/// A type-erased getter: `&B -> Option<&V>`.
pub type ReadFn =
    Arc<dyn for<'a> Fn(&'a dyn Any) -> Result<Option<&'a dyn Any>, AccessError> + Send + Sync>;

/// A type-erased mutable getter: `&mut B -> Option<&mut V>`.
pub type ReadMutFn = Arc<
    dyn for<'a> Fn(&'a mut dyn Any) -> Result<Option<&'a mut dyn Any>, AccessError> + Send + Sync,
>;

/// A type-erased setter: `(&mut B, Option<V>)`.
pub type WriteFn =
    Arc<dyn Fn(&mut dyn Any, Option<Box<dyn Any>>) -> Result<(), AccessError> + Send + Sync>;

#[inline(always)]
fn read_fn<F>(f: F) -> ReadFn
where
    F: for<'a> Fn(&'a dyn Any) -> Result<Option<&'a dyn Any>, AccessError> + Send + Sync + 'static,
{
    Arc::new(f)
}

#[inline(always)]
fn read_mut_fn<F>(f: F) -> ReadMutFn
where
    F: for<'a> Fn(&'a mut dyn Any) -> Result<Option<&'a mut dyn Any>, AccessError>
        + Send
        + Sync
        + 'static,
{
    Arc::new(f)
}

#[inline(always)]
fn write_fn<F>(f: F) -> WriteFn
where
    F: Fn(&mut dyn Any, Option<Box<dyn Any>>) -> Result<(), AccessError> + Send + Sync + 'static,
{
    Arc::new(f)
}

// -----------------------------------------------------------------------------
// MemberInfo

/// A zero-argument member that returns a value.
#[derive(Clone)]
pub struct GetterInfo {
    value: Type,
    read: ReadFn,
    read_mut: ReadMutFn,
    collection: Option<CollectionOps>,
    value_bean: Option<fn() -> &'static BeanInfo>,
}

impl GetterInfo {
    /// The declared value type.
    #[inline(always)]
    pub fn value_type(&self) -> Type {
        self.value
    }

    #[inline(always)]
    pub fn read(&self) -> &ReadFn {
        &self.read
    }

    #[inline(always)]
    pub fn read_mut(&self) -> &ReadMutFn {
        &self.read_mut
    }

    /// Element access, if the value type is an [`OrderedCollection`].
    #[inline(always)]
    pub fn collection(&self) -> Option<&CollectionOps> {
        self.collection.as_ref()
    }

    /// The bean info of the value type, or of the element type for
    /// collection getters, if that type is a bean.
    #[inline]
    pub fn value_bean(&self) -> Option<&'static BeanInfo> {
        self.value_bean.map(|info| info())
    }
}

/// A member taking exactly one argument of the value type.
#[derive(Clone)]
pub struct SetterInfo {
    value: Type,
    write: WriteFn,
}

impl SetterInfo {
    /// The declared parameter type.
    #[inline(always)]
    pub fn value_type(&self) -> Type {
        self.value
    }

    #[inline(always)]
    pub fn write(&self) -> &WriteFn {
        &self.write
    }
}

/// The shape of a [`MemberInfo`].
#[derive(Clone)]
pub enum MemberKind {
    Getter(GetterInfo),
    Setter(SetterInfo),
    /// A member that takes no argument and returns nothing.
    Action,
}

/// One member of a bean's member table.
///
/// A bean may declare a getter and a setter under the same name, which is
/// how non-canonical accessors such as [`Ref::get`](crate::info::Ref) pair up.
#[derive(Clone)]
pub struct MemberInfo {
    name: &'static str,
    kind: MemberKind,
}

impl MemberInfo {
    /// Creates a getter member from a typed [`Getter`] reference.
    pub fn getter<B: Any, V: Any>(getter: Getter<B, V>) -> Self {
        let read = getter.read_fn();
        let read_mut = getter.read_mut_fn();
        Self {
            name: getter.member(),
            kind: MemberKind::Getter(GetterInfo {
                value: Type::of::<V>(),
                read: read_fn(move |bean| {
                    let bean = bean
                        .downcast_ref::<B>()
                        .ok_or_else(AccessError::type_mismatch::<B>)?;
                    Ok(read(bean).map(|value| value as &dyn Any))
                }),
                read_mut: read_mut_fn(move |bean| {
                    let bean = bean
                        .downcast_mut::<B>()
                        .ok_or_else(AccessError::type_mismatch::<B>)?;
                    Ok(read_mut(bean).map(|value| value as &mut dyn Any))
                }),
                collection: None,
                value_bean: None,
            }),
        }
    }

    /// Creates a getter member whose value is an [`OrderedCollection`],
    /// so it can be addressed as `name[]` in dotted paths.
    pub fn collection_getter<B: Any, C: OrderedCollection>(getter: Getter<B, C>) -> Self {
        let mut member = Self::getter(getter);
        if let MemberKind::Getter(info) = &mut member.kind {
            info.collection = Some(CollectionOps::of::<C>());
        }
        member
    }

    /// Records the bean info of the getter's value type, or of the element
    /// type for a collection getter.
    ///
    /// [`BeanRegistry::register`](crate::registry::BeanRegistry::register)
    /// registers these beans along with the declaring one. Other members
    /// are returned unchanged.
    pub fn with_value_bean(mut self, info: Option<fn() -> &'static BeanInfo>) -> Self {
        if let MemberKind::Getter(getter) = &mut self.kind {
            getter.value_bean = info;
        }
        self
    }

    /// Creates a setter member.
    ///
    /// `write` receives `None` when a null value is written; setters of
    /// non-nullable members reject it with [`AccessError::NullValue`].
    pub fn setter<B: Any, V: Any>(
        name: &'static str,
        write: fn(&mut B, Option<V>) -> Result<(), AccessError>,
    ) -> Self {
        Self {
            name,
            kind: MemberKind::Setter(SetterInfo {
                value: Type::of::<V>(),
                write: write_fn(move |bean, value| {
                    let bean = bean
                        .downcast_mut::<B>()
                        .ok_or_else(AccessError::type_mismatch::<B>)?;
                    let value = match value {
                        Some(value) => Some(
                            *value
                                .downcast::<V>()
                                .map_err(|_| AccessError::type_mismatch::<V>())?,
                        ),
                        None => None,
                    };
                    write(bean, value)
                }),
            }),
        }
    }

    /// Creates an action member.
    #[inline]
    pub const fn action(name: &'static str) -> Self {
        Self {
            name,
            kind: MemberKind::Action,
        }
    }

    /// The member name.
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline(always)]
    pub const fn kind(&self) -> &MemberKind {
        &self.kind
    }

    /// Returns the getter shape, if this is a getter.
    #[inline]
    pub const fn as_getter(&self) -> Option<&GetterInfo> {
        match &self.kind {
            MemberKind::Getter(info) => Some(info),
            _ => None,
        }
    }

    /// Returns the setter shape, if this is a setter.
    #[inline]
    pub const fn as_setter(&self) -> Option<&SetterInfo> {
        match &self.kind {
            MemberKind::Setter(info) => Some(info),
            _ => None,
        }
    }
}

impl fmt::Debug for MemberInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            MemberKind::Getter(info) => write!(f, "{}() -> {:?}", self.name, info.value),
            MemberKind::Setter(info) => write!(f, "{}({:?})", self.name, info.value),
            MemberKind::Action => write!(f, "{}()", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct City {
        name: Option<String>,
    }

    const NAME: Getter<City, String> = Getter::new(
        "get_name",
        |city: &City| city.name.as_ref(),
        |city: &mut City| city.name.as_mut(),
    );

    #[test]
    fn erased_getter_round_trip() {
        let member = MemberInfo::getter(NAME);
        let getter = member.as_getter().unwrap();
        assert!(getter.value_type().is::<String>());

        let mut city = City {
            name: Some("Noville".into()),
        };
        let value = (getter.read())(&city).unwrap().unwrap();
        assert_eq!(value.downcast_ref::<String>().unwrap(), "Noville");

        let value = (getter.read_mut())(&mut city).unwrap().unwrap();
        *value.downcast_mut::<String>().unwrap() = "Smallville".into();
        assert_eq!(city.name.as_deref(), Some("Smallville"));

        assert!(matches!(
            (getter.read())(&1_u8),
            Err(AccessError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn erased_setter_checks_types() {
        let member = MemberInfo::setter::<City, String>("set_name", |city, value| {
            city.name = value;
            Ok(())
        });
        let setter = member.as_setter().unwrap();
        let mut city = City { name: None };

        (setter.write())(&mut city, Some(Box::new(String::from("Noville")))).unwrap();
        assert_eq!(city.name.as_deref(), Some("Noville"));

        (setter.write())(&mut city, None).unwrap();
        assert_eq!(city.name, None);

        let wrong = (setter.write())(&mut city, Some(Box::new(7_u32)));
        assert!(matches!(wrong, Err(AccessError::TypeMismatch { .. })));
    }
}
