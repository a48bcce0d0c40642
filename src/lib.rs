#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use vc_schema as schema;

pub use vc_schema::{
    Attachment, Attachments, Decoder, DecoderOptions, Encoder, EncoderOptions, MultiError,
    SchemaError, Values,
};

#[cfg(feature = "derive")]
pub use vc_schema::Schema;
