//! Binary attachments bound by path, such as uploaded files.
//!
//! Attachments travel in a side table next to the string values and never
//! pass through text conversion. A field receives them when its type is one
//! of:
//!
//! - `Attachment` or `Option<Attachment>`: the first handle.
//! - `Vec<Attachment>`: every handle.
//! - `Option<Vec<Attachment>>`: every handle, left `None` for an empty list.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::Reflect;
use crate::info::TypeInfo;

/// An opaque binary payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub content_type: Option<String>,
    pub content: Vec<u8>,
}

impl Attachment {
    pub fn new(filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            content_type: None,
            content: content.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// The side table: path to attachment handles, in upload order.
pub type Attachments = BTreeMap<String, Vec<Attachment>>;

/// Stores `handles` into `field`.
///
/// Returns `false`, leaving `field` untouched, if it is not an attachment
/// field.
pub(crate) fn assign(field: &mut dyn Reflect, handles: &[Attachment]) -> bool {
    let field = field.as_reflect_mut();

    if let Some(slot) = field.downcast_mut::<Attachment>() {
        if let Some(first) = handles.first() {
            *slot = first.clone();
        }
        return true;
    }
    if let Some(slot) = field.downcast_mut::<Option<Attachment>>() {
        if let Some(first) = handles.first() {
            *slot = Some(first.clone());
        }
        return true;
    }
    if let Some(slot) = field.downcast_mut::<Vec<Attachment>>() {
        *slot = handles.to_vec();
        return true;
    }
    if let Some(slot) = field.downcast_mut::<Option<Vec<Attachment>>>() {
        if !handles.is_empty() {
            *slot = Some(handles.to_vec());
        }
        return true;
    }

    false
}

/// Whether values of the type described by `info` are filled from the side
/// table.
pub(crate) fn is_attachment_type(info: &TypeInfo) -> bool {
    info.is::<Attachment>()
        || info.is::<Option<Attachment>>()
        || info.is::<Vec<Attachment>>()
        || info.is::<Option<Vec<Attachment>>>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Typed;
    use alloc::vec;

    fn files() -> Vec<Attachment> {
        vec![
            Attachment::new("a.txt", "aaa").with_content_type("text/plain"),
            Attachment::new("b.bin", [1_u8, 2]),
        ]
    }

    #[test]
    fn single_takes_first() {
        let mut one: Option<Attachment> = None;
        assert!(assign(&mut one, &files()));
        assert_eq!(one.map(|a| a.filename), Some(String::from("a.txt")));

        let mut one: Option<Attachment> = None;
        assert!(assign(&mut one, &[]));
        assert!(one.is_none());
    }

    #[test]
    fn lists_take_all() {
        let mut all: Vec<Attachment> = Vec::new();
        assert!(assign(&mut all, &files()));
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].content, [1, 2]);

        let mut maybe: Option<Vec<Attachment>> = None;
        assert!(assign(&mut maybe, &[]));
        assert!(maybe.is_none());
        assert!(assign(&mut maybe, &files()));
        assert_eq!(maybe.map(|v| v.len()), Some(2));
    }

    #[test]
    fn other_types_refused() {
        let mut s = String::new();
        assert!(!assign(&mut s, &files()));
        assert!(s.is_empty());
        assert!(!is_attachment_type(String::type_info()));
        assert!(is_attachment_type(<Option<Vec<Attachment>>>::type_info()));
    }
}
