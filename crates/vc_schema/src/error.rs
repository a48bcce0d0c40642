//! Errors reported by decoding and encoding.
//!
//! Every failure is keyed by a path and collected into one [`MultiError`]
//! per call; a single bad key never stops the others.

use alloc::collections::BTreeMap;
use alloc::collections::btree_map;
use alloc::string::String;
use core::{error, fmt};

use thiserror::Error;

// -----------------------------------------------------------------------------
// SchemaError

/// A failure tied to one path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SchemaError {
    /// The path does not name a field.
    #[error("schema: invalid path \"{key}\"")]
    UnknownKey { key: String },

    /// The path names a field promoted from two embedded records at the same
    /// depth.
    #[error("schema: ambiguous path \"{key}\"")]
    AmbiguousKey { key: String },

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// A required field received no usable value.
    #[error("{key} is empty")]
    EmptyField { key: String },

    #[error("schema: slice index {index} is larger than the configured max index {max}")]
    IndexTooLarge { index: usize, max: usize },

    /// No registered converter, text codec or built-in conversion applies.
    #[error("schema: converter not found for {ty}")]
    ConverterNotFound { ty: &'static str },

    #[error("schema: encoder not found for {ty}")]
    EncoderNotFound { ty: &'static str },

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A side table key resolved to a field that cannot hold attachments.
    #[error("schema: \"{key}\" is not an attachment field")]
    NotAnAttachment { key: String },

    /// User code panicked while this key was processed.
    #[error("schema: panic while decoding: {cause}")]
    Panicked { cause: String },
}

// -----------------------------------------------------------------------------
// ConversionError

/// A value was present but could not be converted to the field type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionError {
    /// The input path.
    pub key: String,
    /// Short name of the target type.
    pub ty: &'static str,
    /// The failing element, for list fields.
    pub index: Option<usize>,
    /// The underlying parser message, if any.
    pub cause: Option<String>,
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(
                f,
                "schema: error converting value for index {index} of \"{}\"",
                self.key
            )?,
            None => write!(f, "schema: error converting value for \"{}\"", self.key)?,
        }
        if let Some(cause) = &self.cause {
            write!(f, ". Details: {cause}")?;
        }
        Ok(())
    }
}

impl error::Error for ConversionError {}

// -----------------------------------------------------------------------------
// ConfigError

/// A field tag that cannot be honored, whatever the input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("required fields cannot have a default value")]
    RequiredWithDefault,

    #[error(
        "default option is supported only on: bool, float variants, string, unit variants types or their corresponding pointers or slices"
    )]
    UnsupportedDefault,

    #[error("failed setting default: {value} is not compatible with field {field} type")]
    IncompatibleDefault { value: String, field: &'static str },
}

// -----------------------------------------------------------------------------
// MultiError

/// Every failure of one decode or encode call, keyed by path.
///
/// # Examples
///
/// ```
/// use vc_schema::{MultiError, SchemaError};
///
/// let mut errors = MultiError::new();
/// errors.insert("a", SchemaError::EmptyField { key: "a".into() });
/// errors.insert("b", SchemaError::UnknownKey { key: "b".into() });
///
/// assert_eq!(errors.to_string(), "a is empty (and 1 other error)");
/// assert!(matches!(errors.get("b"), Some(SchemaError::UnknownKey { .. })));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiError(BTreeMap<String, SchemaError>);

impl MultiError {
    #[inline]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Records `error` under `key`, replacing any earlier error for it.
    pub fn insert(&mut self, key: impl Into<String>, error: SchemaError) {
        self.0.insert(key.into(), error);
    }

    /// Records `error` under `key` unless one is already recorded.
    pub(crate) fn insert_first(&mut self, key: &str, error: SchemaError) {
        if !self.0.contains_key(key) {
            self.0.insert(key.into(), error);
        }
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&SchemaError> {
        self.0.get(key)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(path, error)` pairs in path order.
    #[inline]
    pub fn iter(&self) -> btree_map::Iter<'_, String, SchemaError> {
        self.0.iter()
    }

    /// Moves every error of `other` into `self`.
    pub fn merge(&mut self, other: MultiError) {
        self.0.extend(other.0);
    }

    #[inline]
    pub fn into_inner(self) -> BTreeMap<String, SchemaError> {
        self.0
    }

    /// `Ok(())` when empty, `Err(self)` otherwise.
    #[inline]
    pub fn into_result(self) -> Result<(), MultiError> {
        if self.0.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for MultiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(first) = self.0.values().next() else {
            return f.write_str("(0 errors)");
        };

        fmt::Display::fmt(first, f)?;
        match self.0.len() {
            1 => Ok(()),
            2 => f.write_str(" (and 1 other error)"),
            n => write!(f, " (and {} other errors)", n - 1),
        }
    }
}

impl error::Error for MultiError {}

impl IntoIterator for MultiError {
    type Item = (String, SchemaError);
    type IntoIter = btree_map::IntoIter<String, SchemaError>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a MultiError {
    type Item = (&'a String, &'a SchemaError);
    type IntoIter = btree_map::Iter<'a, String, SchemaError>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
