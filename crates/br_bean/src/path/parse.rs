use alloc::borrow::Cow;
use alloc::vec::Vec;
use core::fmt;

use crate::error::BeanError;

/// One `.`-separated segment of a dotted path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Segment<'a> {
    pub name: &'a str,
    /// The segment ends with `[]`.
    pub collection: bool,
}

/// A malformed dotted path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParseError<'a> {
    pub offset: usize,
    pub path: &'a str,
    pub error: Cow<'static, str>,
}

impl fmt::Display for ParseError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Encountered an error at offset {} while parsing `{}`: {}",
            self.offset, self.path, self.error,
        )
    }
}

impl From<ParseError<'_>> for BeanError {
    fn from(error: ParseError<'_>) -> Self {
        BeanError::illegal_path(error.to_string())
    }
}

const COLLECTION_MARKER: &str = "[]";

/// Splits `name(.name)*` into segments. Any segment may end with `[]`.
pub(crate) fn parse(path: &str) -> Result<Vec<Segment<'_>>, ParseError<'_>> {
    let error = |offset: usize, error: &'static str| ParseError {
        offset,
        path,
        error: Cow::Borrowed(error),
    };

    if path.is_empty() {
        return Err(error(0, "empty path"));
    }

    let mut segments = Vec::new();
    let mut offset = 0;
    for raw in path.split('.') {
        let (name, collection) = match raw.strip_suffix(COLLECTION_MARKER) {
            Some(name) => (name, true),
            None => (raw, false),
        };

        if name.is_empty() {
            return Err(error(offset, "expected a property name"));
        }
        if let Some(index) = name.find(|c: char| !(c.is_alphanumeric() || c == '_')) {
            return Err(error(offset + index, "unexpected character"));
        }
        if name.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(error(offset, "a property name cannot begin with a number"));
        }

        segments.push(Segment {
            name,
            collection,
        });
        offset += raw.len() + 1;
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(path: &str) -> Vec<(&str, bool)> {
        parse(path)
            .unwrap()
            .into_iter()
            .map(|s| (s.name, s.collection))
            .collect()
    }

    #[test]
    fn dotted_segments() {
        assert_eq!(names("city"), [("city", false)]);
        assert_eq!(
            names("contact.phones[].number"),
            [("contact", false), ("phones", true), ("number", false)]
        );
        assert_eq!(names("status.get.name")[1], ("get", false));
    }

    #[test]
    fn malformed_paths_report_offsets() {
        assert_eq!(parse("").unwrap_err().offset, 0);
        assert_eq!(parse("contact..city").unwrap_err().offset, 8);
        assert_eq!(parse("contact.ci ty").unwrap_err().offset, 10);
        assert_eq!(parse("phones[0]").unwrap_err().offset, 6);
        assert_eq!(parse("contact.1st").unwrap_err().offset, 8);

        let error = BeanError::from(parse("a.").unwrap_err());
        assert_eq!(
            error.to_string(),
            "illegal bean path: Encountered an error at offset 2 while parsing `a.`: \
             expected a property name"
        );
    }
}
