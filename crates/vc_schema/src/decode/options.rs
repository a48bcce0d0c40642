use alloc::string::String;

use crate::tag::DEFAULT_TAG;

/// Configuration of a [`Decoder`](crate::Decoder).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderOptions {
    /// The tag key field aliases are read from.
    pub tag: String,
    /// The largest list index a path may use.
    pub max_index: usize,
    /// Drop unknown and ambiguous paths instead of reporting them.
    pub ignore_unknown_keys: bool,
    /// Reset fields to their zero value on an empty input string instead of
    /// leaving them untouched.
    pub zero_empty: bool,
}

impl DecoderOptions {
    pub const DEFAULT_MAX_INDEX: usize = 1000;
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            tag: String::from(DEFAULT_TAG),
            max_index: Self::DEFAULT_MAX_INDEX,
            ignore_unknown_keys: false,
            zero_empty: false,
        }
    }
}
