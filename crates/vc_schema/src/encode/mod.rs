//! Encoding of records into flat multi-value maps.

// -----------------------------------------------------------------------------
// Modules

mod encoder;
mod options;

// -----------------------------------------------------------------------------
// Exports

pub use encoder::{Encoder, NULL};
pub use options::EncoderOptions;
