use core::any::{Any, TypeId, type_name};
use core::fmt;
use core::hash::{Hash, Hasher};

// -----------------------------------------------------------------------------
// Type

/// The runtime identity of a type: its [`TypeId`] and its [`type_name`].
///
/// Equality and hashing only consider the `TypeId`.
///
/// # Examples
///
/// ```
/// use br_bean::info::Type;
///
/// let ty = Type::of::<Vec<String>>();
/// assert!(ty.is::<Vec<String>>());
/// assert_eq!(ty.short_name(), "Vec<alloc::string::String>");
/// ```
#[derive(Clone, Copy)]
pub struct Type {
    id: TypeId,
    name: &'static str,
}

impl Type {
    /// Returns the `Type` of `T`.
    #[inline]
    pub fn of<T: Any + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// The [`TypeId`] of the type.
    #[inline(always)]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// The full type path, e.g. `my_crate::model::Person`.
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The type name without its module path, e.g. `Person`.
    ///
    /// Generic arguments are kept verbatim.
    pub fn short_name(&self) -> &'static str {
        let name = self.name;
        let head = match name.find('<') {
            Some(index) => &name[..index],
            None => name,
        };
        match head.rfind("::") {
            Some(index) => &name[index + 2..],
            None => name,
        }
    }

    /// Returns `true` if this is the type `T`.
    #[inline]
    pub fn is<T: Any + ?Sized>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl Hash for Type {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}
