use alloc::string::String;

use crate::tag::DEFAULT_TAG;

/// Configuration of an [`Encoder`](crate::Encoder).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderOptions {
    /// The tag key field aliases are read from.
    pub tag: String,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            tag: String::from(DEFAULT_TAG),
        }
    }
}
