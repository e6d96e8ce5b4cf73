use core::fmt;

// -----------------------------------------------------------------------------
// Getter

/// A typed reference to a zero-argument getter of bean `B` returning `V`.
///
/// `None` models a null value. The reference carries the member name it
/// was declared under, so an engine can recover the declaring type, the
/// value type and the property name without any string at the call site.
///
/// `#[derive(Bean)]` emits one `Getter` constant per property:
///
/// ```
/// use br_bean::derive::Bean;
///
/// #[derive(Bean)]
/// struct Phone {
///     number: Option<String>,
///     active: bool,
/// }
///
/// let phone = Phone { number: Some("555-2".into()), active: true };
///
/// assert_eq!(Phone::NUMBER.member(), "get_number");
/// assert_eq!(Phone::ACTIVE.member(), "is_active");
/// assert_eq!(Phone::NUMBER.get(&phone).map(String::as_str), Some("555-2"));
/// assert_eq!(Phone::ACTIVE.get(&phone), Some(&true));
/// ```
///
/// Hand-written getters use [`Getter::new`] with non-capturing closures.
///
/// ```
/// use br_bean::info::Getter;
///
/// struct Celsius(f64);
///
/// const DEGREES: Getter<Celsius, f64> =
///     Getter::new("degrees", |c: &Celsius| Some(&c.0), |c: &mut Celsius| Some(&mut c.0));
///
/// assert_eq!(DEGREES.get(&Celsius(21.5)), Some(&21.5));
/// ```
pub struct Getter<B, V> {
    member: &'static str,
    read: fn(&B) -> Option<&V>,
    read_mut: fn(&mut B) -> Option<&mut V>,
}

impl<B, V> Getter<B, V> {
    /// Creates a getter reference for the member `member`.
    #[inline]
    pub const fn new(
        member: &'static str,
        read: fn(&B) -> Option<&V>,
        read_mut: fn(&mut B) -> Option<&mut V>,
    ) -> Self {
        Self {
            member,
            read,
            read_mut,
        }
    }

    /// The name of the getter member, e.g. `get_city`.
    #[inline(always)]
    pub const fn member(&self) -> &'static str {
        self.member
    }

    /// Invokes the getter.
    #[inline]
    pub fn get<'a>(&self, bean: &'a B) -> Option<&'a V> {
        (self.read)(bean)
    }

    /// Invokes the getter for a mutable borrow of the value.
    #[inline]
    pub fn get_mut<'a>(&self, bean: &'a mut B) -> Option<&'a mut V> {
        (self.read_mut)(bean)
    }

    #[inline(always)]
    pub(crate) fn read_fn(&self) -> fn(&B) -> Option<&V> {
        self.read
    }

    #[inline(always)]
    pub(crate) fn read_mut_fn(&self) -> fn(&mut B) -> Option<&mut V> {
        self.read_mut
    }
}

impl<B, V> Clone for Getter<B, V> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<B, V> Copy for Getter<B, V> {}

impl<B, V> fmt::Debug for Getter<B, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Getter").field(&self.member).finish()
    }
}
