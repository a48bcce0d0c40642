//! Decoding of flat multi-value maps into records.
//!
//! Decoding is best-effort and total: every key is processed, failures are
//! collected into one [`MultiError`](crate::MultiError), and a panic raised
//! by user code is contained to the key that caused it.
//!
//! After every key, defaults are applied to untouched zero fields and
//! required fields are checked.

// -----------------------------------------------------------------------------
// Modules

mod decoder;
mod defaults;
mod leaf;
mod options;
mod required;
mod touched;

// -----------------------------------------------------------------------------
// Exports

pub use decoder::Decoder;
pub use options::DecoderOptions;
