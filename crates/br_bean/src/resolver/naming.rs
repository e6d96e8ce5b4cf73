use alloc::borrow::Cow;
use alloc::string::String;

/// A getter member name split into its accessor prefix and the rest.
enum Accessor<'a> {
    /// `get_city`, `is_active`.
    Snake(&'a str),
    /// `getCity`, `isActive`.
    Camel(&'a str),
    /// Any other name, used verbatim.
    Plain,
}

fn classify(member: &str) -> Accessor<'_> {
    for prefix in ["get_", "is_"] {
        if let Some(rest) = member.strip_prefix(prefix)
            && !rest.is_empty()
        {
            return Accessor::Snake(rest);
        }
    }
    for prefix in ["get", "is"] {
        if let Some(rest) = member.strip_prefix(prefix)
            && rest.starts_with(char::is_uppercase)
        {
            return Accessor::Camel(rest);
        }
    }
    Accessor::Plain
}

/// Lowercases the first character.
fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(name.len());
            out.extend(first.to_lowercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// The property name of a getter member.
///
/// # Examples
///
/// ```
/// use br_bean::resolver::property_name;
///
/// assert_eq!(property_name("get_city"), "city");
/// assert_eq!(property_name("is_active"), "active");
/// assert_eq!(property_name("getPostCode"), "postCode");
/// assert_eq!(property_name("getURL"), "uRL");
/// assert_eq!(property_name("get"), "get");
/// assert_eq!(property_name("len"), "len");
/// ```
pub fn property_name(member: &'static str) -> Cow<'static, str> {
    match classify(member) {
        Accessor::Snake(rest) => Cow::Borrowed(rest),
        Accessor::Camel(rest) => Cow::Owned(decapitalize(rest)),
        Accessor::Plain => Cow::Borrowed(member),
    }
}

/// The setter member paired with a getter member.
///
/// Canonical getters pair with `set_` + property (`setX` for camel case);
/// any other getter pairs with a setter of the same name.
///
/// ```
/// use br_bean::resolver::setter_name;
///
/// assert_eq!(setter_name("get_city"), "set_city");
/// assert_eq!(setter_name("isActive"), "setActive");
/// assert_eq!(setter_name("get"), "get");
/// ```
pub fn setter_name(member: &'static str) -> Cow<'static, str> {
    match classify(member) {
        Accessor::Snake(rest) => Cow::Owned(format!("set_{rest}")),
        Accessor::Camel(rest) => Cow::Owned(format!("set{rest}")),
        Accessor::Plain => Cow::Borrowed(member),
    }
}

/// Members every type carries, never exposed as properties.
const UNIVERSAL_MEMBERS: &[&str] = &[
    "clone",
    "to_owned",
    "to_string",
    "hash",
    "type_id",
    "fmt",
    "eq",
    "ne",
    "cmp",
    "partial_cmp",
    "default",
    "into",
    "from",
];

/// Returns `true` if `member` is a universal member.
#[inline]
pub(crate) fn is_universal_member(member: &str) -> bool {
    UNIVERSAL_MEMBERS.contains(&member)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_need_a_remainder() {
        assert_eq!(property_name("get_"), "get_");
        assert_eq!(property_name("is"), "is");
        assert_eq!(property_name("issue"), "issue");
        assert_eq!(property_name("getter"), "getter");
        assert_eq!(setter_name("issue"), "issue");
    }

    #[test]
    fn camel_case_lowercases_the_first_letter() {
        assert_eq!(property_name("getX"), "x");
        assert_eq!(property_name("getURL"), "uRL");
        assert_eq!(property_name("isHTTPS"), "hTTPS");
        assert_eq!(property_name("getÉtat"), "état");
        assert_eq!(setter_name("getÉtat"), "setÉtat");
        assert_eq!(property_name("getétat"), "getétat");
    }

    #[test]
    fn universal_members() {
        assert!(is_universal_member("to_string"));
        assert!(!is_universal_member("get_name"));
    }
}
