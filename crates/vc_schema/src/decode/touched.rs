use alloc::collections::BTreeMap;
use alloc::string::String;
use core::ops::Bound;

use crate::path::SEPARATOR;

/// Canonical paths reached by input keys during one call, with whether any
/// of them carried a usable value.
#[derive(Debug, Default)]
pub(super) struct Touched(BTreeMap<String, bool>);

impl Touched {
    pub fn mark(&mut self, canonical: String, filled: bool) {
        *self.0.entry(canonical).or_insert(false) |= filled;
    }

    /// Flags of `canonical` itself and of every path nested under it.
    fn covered<'a>(&'a self, canonical: &'a str) -> impl Iterator<Item = bool> + 'a {
        self.0
            .range::<str, _>((Bound::Included(canonical), Bound::Unbounded))
            .take_while(move |(key, _)| key.starts_with(canonical))
            .filter(move |(key, _)| {
                key.len() == canonical.len()
                    || key[canonical.len()..].starts_with(SEPARATOR)
            })
            .map(|(_, &filled)| filled)
    }

    /// Whether any key reached `canonical` or a location inside it.
    pub fn is_touched(&self, canonical: &str) -> bool {
        self.covered(canonical).next().is_some()
    }

    /// Whether such a key also carried a usable value.
    pub fn is_filled(&self, canonical: &str) -> bool {
        self.covered(canonical).any(|filled| filled)
    }
}

#[cfg(test)]
mod tests {
    use super::Touched;

    #[test]
    fn nested_paths_count() {
        let mut touched = Touched::default();
        touched.mark("a.b".into(), false);
        touched.mark("a-b".into(), true);
        touched.mark("ab".into(), true);
        touched.mark("c.0.d".into(), true);

        assert!(touched.is_touched("a"));
        assert!(!touched.is_filled("a"));
        assert!(touched.is_filled("c"));
        assert!(touched.is_filled("c.0"));
        assert!(!touched.is_touched("c.1"));
        assert!(!touched.is_touched("x"));

        touched.mark("a.b".into(), true);
        touched.mark("a.b".into(), false);
        assert!(touched.is_filled("a"));
    }
}
