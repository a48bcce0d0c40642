//! Field tag parsing.
//!
//! A tag is a comma separated string such as `"name,omitempty,default:a|b"`.
//! The first segment is the alias, the rest are options kept verbatim.
//!
//! - An empty alias means "use the declared field name".
//! - The alias `-` excludes the field from decoding and encoding.
//! - `default:<raw>` keeps everything after the first colon, so values like
//!   `default:http://localhost:8080` survive intact.
//!
//! Commas cannot be escaped.

use alloc::vec::Vec;

/// The tag key used when no other key is selected.
pub const DEFAULT_TAG: &str = "schema";

const OPT_REQUIRED: &str = "required";
const OPT_OMIT_EMPTY: &str = "omitempty";
const OPT_DEFAULT: &str = "default:";

// -----------------------------------------------------------------------------
// FieldTag

/// A parsed field tag.
///
/// # Examples
///
/// ```
/// use vc_schema::tag::FieldTag;
///
/// let tag = FieldTag::parse("url,omitempty,default:http://localhost:8080");
/// assert_eq!(tag.alias(), "url");
/// assert!(tag.options().omit_empty());
/// assert_eq!(tag.options().default_value(), Some("http://localhost:8080"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldTag<'a> {
    alias: &'a str,
    options: TagOptions<'a>,
}

impl<'a> FieldTag<'a> {
    /// Splits `tag` into its alias and options.
    pub fn parse(tag: &'a str) -> Self {
        let (alias, rest) = match tag.split_once(',') {
            Some((alias, rest)) => (alias, Some(rest)),
            None => (tag, None),
        };

        Self {
            alias,
            options: TagOptions { raw: rest },
        }
    }

    /// The alias segment, possibly empty.
    #[inline]
    pub const fn alias(&self) -> &'a str {
        self.alias
    }

    /// Whether the tag excludes its field entirely.
    #[inline]
    pub fn is_excluded(&self) -> bool {
        self.alias == "-"
    }

    /// Returns the alias, or `fallback` when the alias segment is empty.
    #[inline]
    pub fn alias_or(&self, fallback: &'a str) -> &'a str {
        if self.alias.is_empty() {
            fallback
        } else {
            self.alias
        }
    }

    #[inline]
    pub const fn options(&self) -> TagOptions<'a> {
        self.options
    }
}

// -----------------------------------------------------------------------------
// TagOptions

/// The option segments that follow the alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TagOptions<'a> {
    raw: Option<&'a str>,
}

impl<'a> TagOptions<'a> {
    /// Iterates over the options in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        self.raw.into_iter().flat_map(|raw| raw.split(','))
    }

    /// Whether the option `name` is present. Unknown options are kept but
    /// carry no meaning.
    pub fn contains(&self, name: &str) -> bool {
        self.iter().any(|opt| opt == name)
    }

    #[inline]
    pub fn required(&self) -> bool {
        self.contains(OPT_REQUIRED)
    }

    #[inline]
    pub fn omit_empty(&self) -> bool {
        self.contains(OPT_OMIT_EMPTY)
    }

    /// The raw value of the first `default:` option.
    pub fn default_value(&self) -> Option<&'a str> {
        self.iter().find_map(|opt| opt.strip_prefix(OPT_DEFAULT))
    }

    /// Collects the options into a vector.
    pub fn to_vec(&self) -> Vec<&'a str> {
        self.iter().collect()
    }
}

// -----------------------------------------------------------------------------
// Tests
