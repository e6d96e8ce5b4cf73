use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use crate::error::AccessError;
use crate::info::{Bean, GetterInfo, MemberInfo, SetterInfo, Type};

// -----------------------------------------------------------------------------
// Constructor

/// A zero-argument factory producing a default instance of a bean.
pub type Constructor = fn() -> Result<Box<dyn Any>, AccessError>;

fn construct_default<T: Default + Any>() -> Result<Box<dyn Any>, AccessError> {
    Ok(Box::new(T::default()))
}

// -----------------------------------------------------------------------------
// BeanOrigin

/// Whether a bean type is a named record or a synthetic wrapper.
///
/// Synthetic beans (proxies, adapters, anonymous wrappers) are never
/// introspected directly: their properties are those of their facets,
/// or of their parent when they have no facet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BeanOrigin {
    #[default]
    Named,
    Synthetic,
}

// -----------------------------------------------------------------------------
// Facet

type ViewFn = Arc<dyn for<'a> Fn(&'a dyn Any) -> Option<&'a dyn Any> + Send + Sync>;
type ViewMutFn = Arc<dyn for<'a> Fn(&'a mut dyn Any) -> Option<&'a mut dyn Any> + Send + Sync>;

#[inline(always)]
fn view_fn<F>(f: F) -> ViewFn
where
    F: for<'a> Fn(&'a dyn Any) -> Option<&'a dyn Any> + Send + Sync + 'static,
{
    Arc::new(f)
}

#[inline(always)]
fn view_mut_fn<F>(f: F) -> ViewMutFn
where
    F: for<'a> Fn(&'a mut dyn Any) -> Option<&'a mut dyn Any> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A projection from a wrapper bean onto another bean it exposes.
///
/// Facets play the part of implemented interfaces, the parent plays the
/// part of a superclass.
#[derive(Clone)]
pub struct Facet {
    ty: Type,
    info: fn() -> &'static BeanInfo,
    view: ViewFn,
    view_mut: ViewMutFn,
}

impl Facet {
    /// Creates a facet of `B` exposing `F` through the given projections.
    pub fn new<B: Any, F: Bean>(view: fn(&B) -> &F, view_mut: fn(&mut B) -> &mut F) -> Self {
        Self {
            ty: Type::of::<F>(),
            info: F::bean_info,
            view: view_fn(move |bean| {
                bean.downcast_ref::<B>()
                    .map(|bean| view(bean) as &dyn Any)
            }),
            view_mut: view_mut_fn(move |bean| {
                bean.downcast_mut::<B>()
                    .map(|bean| view_mut(bean) as &mut dyn Any)
            }),
        }
    }

    /// The exposed bean type.
    #[inline(always)]
    pub fn ty(&self) -> Type {
        self.ty
    }

    /// The exposed bean's info.
    #[inline]
    pub fn info(&self) -> &'static BeanInfo {
        (self.info)()
    }

    /// Projects a wrapper onto the facet, `None` if `bean` is not the wrapper type.
    #[inline]
    pub fn view<'a>(&self, bean: &'a dyn Any) -> Option<&'a dyn Any> {
        (self.view)(bean)
    }

    /// Mutable version of [`Facet::view`].
    #[inline]
    pub fn view_mut<'a>(&self, bean: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        (self.view_mut)(bean)
    }
}

impl fmt::Debug for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Facet").field(&self.ty).finish()
    }
}

// -----------------------------------------------------------------------------
// BeanInfo

/// The static description of a bean type.
///
/// # Examples
///
/// A hand-written bean:
///
/// ```
/// use br_bean::AccessError;
/// use br_bean::info::{Bean, BeanInfo, Getter, MemberInfo, NonGenericBeanInfoCell};
///
/// #[derive(Default)]
/// struct Counter {
///     hits: u64,
/// }
///
/// impl Counter {
///     const HITS: Getter<Self, u64> =
///         Getter::new("hits", |c: &Self| Some(&c.hits), |c: &mut Self| Some(&mut c.hits));
/// }
///
/// impl Bean for Counter {
///     fn bean_info() -> &'static BeanInfo {
///         static CELL: NonGenericBeanInfoCell = NonGenericBeanInfoCell::new();
///         CELL.get_or_init(|| {
///             BeanInfo::new::<Self>()
///                 .with_member(MemberInfo::getter(Self::HITS))
///                 .with_member(MemberInfo::setter::<Self, u64>("hits", |c, v| {
///                     c.hits = v.ok_or(AccessError::null_value("hits"))?;
///                     Ok(())
///                 }))
///                 .with_default::<Self>()
///         })
///     }
/// }
///
/// let info = Counter::bean_info();
/// assert_eq!(info.ty().short_name(), "Counter");
/// assert!(info.getter("hits").is_some());
/// assert!(info.setter("hits").is_some());
/// assert!(info.constructor().is_some());
/// ```
pub struct BeanInfo {
    ty: Type,
    members: Vec<MemberInfo>,
    constructor: Option<Constructor>,
    origin: BeanOrigin,
    facets: Vec<Facet>,
    parent: Option<Facet>,
}

impl BeanInfo {
    /// Creates an empty named bean info for `T`.
    pub fn new<T: Any>() -> Self {
        Self {
            ty: Type::of::<T>(),
            members: Vec::new(),
            constructor: None,
            origin: BeanOrigin::Named,
            facets: Vec::new(),
            parent: None,
        }
    }

    /// Appends a member.
    #[inline]
    pub fn with_member(mut self, member: MemberInfo) -> Self {
        self.members.push(member);
        self
    }

    /// Appends members.
    #[inline]
    pub fn with_members(mut self, members: impl IntoIterator<Item = MemberInfo>) -> Self {
        self.members.extend(members);
        self
    }

    /// Sets the constructor.
    #[inline]
    pub fn with_constructor(mut self, constructor: Constructor) -> Self {
        self.constructor = Some(constructor);
        self
    }

    /// Uses `T::default` as the constructor.
    #[inline]
    pub fn with_default<T: Default + Any>(self) -> Self {
        self.with_constructor(construct_default::<T>)
    }

    /// Marks the bean as synthetic.
    #[inline]
    pub fn synthetic(mut self) -> Self {
        self.origin = BeanOrigin::Synthetic;
        self
    }

    /// Appends a facet.
    #[inline]
    pub fn with_facet(mut self, facet: Facet) -> Self {
        self.facets.push(facet);
        self
    }

    /// Sets the parent.
    #[inline]
    pub fn with_parent(mut self, parent: Facet) -> Self {
        self.parent = Some(parent);
        self
    }

    #[inline(always)]
    pub fn ty(&self) -> Type {
        self.ty
    }

    /// Members in declaration order.
    #[inline(always)]
    pub fn members(&self) -> &[MemberInfo] {
        &self.members
    }

    #[inline(always)]
    pub fn constructor(&self) -> Option<Constructor> {
        self.constructor
    }

    #[inline(always)]
    pub fn origin(&self) -> BeanOrigin {
        self.origin
    }

    #[inline(always)]
    pub fn is_synthetic(&self) -> bool {
        self.origin == BeanOrigin::Synthetic
    }

    #[inline(always)]
    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    #[inline(always)]
    pub fn parent(&self) -> Option<&Facet> {
        self.parent.as_ref()
    }

    /// Every member declared under `name`.
    pub fn members_named<'a, 'n>(&'a self, name: &'n str) -> impl Iterator<Item = &'a MemberInfo> + use<'a, 'n> {
        self.members.iter().filter(move |member| member.name() == name)
    }

    /// The getter declared under `name`.
    pub fn getter(&self, name: &str) -> Option<&GetterInfo> {
        self.members_named(name).find_map(MemberInfo::as_getter)
    }

    /// The setter declared under `name`.
    pub fn setter(&self, name: &str) -> Option<&SetterInfo> {
        self.members_named(name).find_map(MemberInfo::as_setter)
    }
}

impl fmt::Debug for BeanInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanInfo")
            .field("ty", &self.ty)
            .field("origin", &self.origin)
            .field("members", &self.members)
            .field("facets", &self.facets)
            .field("parent", &self.parent)
            .finish_non_exhaustive()
    }
}
