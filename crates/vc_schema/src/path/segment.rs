use alloc::vec::Vec;

/// The segment delimiter of a path.
pub const SEPARATOR: char = '.';

/// One step of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSegment<'a> {
    /// A field alias.
    Alias(&'a str),
    /// A base-10 list index. Values beyond `usize` saturate.
    Index { index: usize, raw: &'a str },
}

impl<'a> PathSegment<'a> {
    fn parse(raw: &'a str) -> Self {
        if raw.bytes().all(|b| b.is_ascii_digit()) {
            let index = raw.bytes().fold(0_usize, |acc, b| {
                acc.saturating_mul(10).saturating_add(usize::from(b - b'0'))
            });
            Self::Index { index, raw }
        } else {
            Self::Alias(raw)
        }
    }

    /// The segment as written.
    #[inline]
    pub fn as_str(&self) -> &'a str {
        match *self {
            Self::Alias(raw) | Self::Index { raw, .. } => raw,
        }
    }
}

/// Splits `key` into segments, or returns `None` if any segment is empty.
///
/// # Examples
///
/// ```
/// use vc_schema::path::{PathSegment, parse_path};
///
/// let path = parse_path("items.2.name").unwrap();
/// assert_eq!(path[0], PathSegment::Alias("items"));
/// assert_eq!(path[1], PathSegment::Index { index: 2, raw: "2" });
///
/// assert!(parse_path("items..name").is_none());
/// assert!(parse_path("").is_none());
/// ```
pub fn parse_path(key: &str) -> Option<Vec<PathSegment<'_>>> {
    key.split(SEPARATOR)
        .map(|raw| (!raw.is_empty()).then(|| PathSegment::parse(raw)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturating_index() {
        let path = parse_path("a.99999999999999999999999999").unwrap();
        assert!(matches!(path[1], PathSegment::Index { index: usize::MAX, .. }));
    }

    #[test]
    fn mixed_segments() {
        let path = parse_path("a1.0.x_y").unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], PathSegment::Alias("a1"));
        assert_eq!(path[1].as_str(), "0");
        assert_eq!(path[2], PathSegment::Alias("x_y"));
    }

    #[test]
    fn empty_segments() {
        assert!(parse_path(".a").is_none());
        assert!(parse_path("a.").is_none());
        assert!(parse_path("a").is_some());
    }
}
