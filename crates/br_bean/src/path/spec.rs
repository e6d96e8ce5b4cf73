use alloc::string::String;

use serde::{Deserialize, Serialize};

/// A path captured by its root type name and dotted string.
///
/// `root` is the full type path of the root bean, `path` uses `[]` to
/// mark collection properties. Resolving a spec again goes through the
/// registry, so the root type must be registered.
///
/// ```
/// use br_bean::PathSpec;
///
/// let spec: PathSpec = serde_json::from_str(
///     r#"{ "root": "app::Person", "path": "contact.phones[].number" }"#,
/// ).unwrap();
/// assert_eq!(spec.path, "contact.phones[].number");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathSpec {
    pub root: String,
    pub path: String,
}
