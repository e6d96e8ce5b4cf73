use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::String;
use core::any::type_name;
use core::error::Error as StdError;

use thiserror::Error;

// -----------------------------------------------------------------------------
// Result

/// Alias of `core::result::Result<T, BeanError>`.
pub type Result<T, E = BeanError> = core::result::Result<T, E>;

// -----------------------------------------------------------------------------
// BeanError

/// Every failure surfaced by descriptor resolution, path construction
/// and path evaluation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BeanError {
    /// A getter reference or dotted path does not denote a readable member.
    #[error("illegal bean path: {0}")]
    IllegalPath(String),

    /// A property name is unknown, a declared type does not match,
    /// or a collection element type cannot be determined.
    #[error("illegal argument: {0}")]
    IllegalArgument(String),

    #[error(transparent)]
    ReadOnly(#[from] ReadOnlyError),

    #[error(transparent)]
    IncompletePath(#[from] IncompletePathError),

    #[error(transparent)]
    Access(#[from] AccessError),
}

impl BeanError {
    #[inline]
    pub(crate) fn illegal_path(message: impl Into<String>) -> Self {
        Self::IllegalPath(message.into())
    }

    #[inline]
    pub(crate) fn illegal_argument(message: impl Into<String>) -> Self {
        Self::IllegalArgument(message.into())
    }

    /// Returns `true` for [`BeanError::ReadOnly`].
    #[inline]
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::ReadOnly(_))
    }

    /// Returns `true` for [`BeanError::IncompletePath`].
    #[inline]
    pub fn is_incomplete_path(&self) -> bool {
        matches!(self, Self::IncompletePath(_))
    }
}

// -----------------------------------------------------------------------------
// ReadOnlyError

/// A write was attempted on a property without a setter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("property `{property}` of `{owner}` is read-only")]
pub struct ReadOnlyError {
    owner: &'static str,
    property: Cow<'static, str>,
}

impl ReadOnlyError {
    #[inline]
    pub(crate) fn new(owner: &'static str, property: Cow<'static, str>) -> Self {
        Self { owner, property }
    }

    /// The short type name of the bean declaring the property.
    #[inline]
    pub fn owner(&self) -> &'static str {
        self.owner
    }

    /// The property name.
    #[inline]
    pub fn property(&self) -> &str {
        &self.property
    }
}

// -----------------------------------------------------------------------------
// IncompletePathError

/// A write could not reach its target because an intermediate value is
/// missing and cannot be materialized.
///
/// When the intermediate exists but its property is read-only, the
/// [`ReadOnlyError`] is kept as the cause.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct IncompletePathError {
    message: String,
    #[source]
    cause: Option<Box<BeanError>>,
}

impl IncompletePathError {
    #[inline]
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    #[inline]
    pub(crate) fn caused_by(message: impl Into<String>, cause: BeanError) -> Self {
        Self {
            message: message.into(),
            cause: Some(Box::new(cause)),
        }
    }

    /// The error that stopped materialization, if any.
    #[inline]
    pub fn cause(&self) -> Option<&BeanError> {
        self.cause.as_deref()
    }

    /// Returns the wrapped [`ReadOnlyError`] if materialization failed
    /// on a read-only property.
    pub fn read_only(&self) -> Option<&ReadOnlyError> {
        match self.cause.as_deref() {
            Some(BeanError::ReadOnly(e)) => Some(e),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// AccessError

/// A failure raised by an accessor while reading, writing or constructing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AccessError {
    #[error("expected a value of type `{expected}`")]
    TypeMismatch { expected: &'static str },

    #[error("member `{member}` does not accept a null value")]
    NullValue { member: &'static str },

    #[error("collection `{collection}` does not give mutable access to its elements")]
    NotTraversable { collection: &'static str },

    #[error(transparent)]
    Failed(Box<dyn StdError + Send + Sync>),
}

impl AccessError {
    /// A value was not of type `T`.
    #[inline]
    pub fn type_mismatch<T: ?Sized>() -> Self {
        Self::TypeMismatch {
            expected: type_name::<T>(),
        }
    }

    /// A setter for a non-nullable member received `None`.
    #[inline]
    pub const fn null_value(member: &'static str) -> Self {
        Self::NullValue { member }
    }

    /// Elements of collection `C` cannot be borrowed mutably.
    #[inline]
    pub fn not_traversable<C: ?Sized>() -> Self {
        Self::NotTraversable {
            collection: type_name::<C>(),
        }
    }

    /// Wraps a user error raised by an accessor.
    ///
    /// An `AccessError` passed in is returned as is rather than nested.
    ///
    /// ```
    /// use br_bean::AccessError;
    ///
    /// let inner = AccessError::null_value("set_city");
    /// assert!(matches!(AccessError::failed(inner), AccessError::NullValue { .. }));
    /// ```
    pub fn failed<E: StdError + Send + Sync + 'static>(error: E) -> Self {
        let boxed: Box<dyn StdError + Send + Sync> = Box::new(error);
        match boxed.downcast::<AccessError>() {
            Ok(access) => *access,
            Err(other) => Self::Failed(other),
        }
    }
}
