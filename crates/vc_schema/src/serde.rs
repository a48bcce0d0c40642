//! `Serialize` for [`MultiError`], as a map from path to message.

use serde_core::ser::SerializeMap;
use serde_core::{Serialize, Serializer};

use crate::error::{MultiError, SchemaError};

/// Serializes an error as its `Display` text.
struct Message<'a>(&'a SchemaError);

impl Serialize for Message<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self.0)
    }
}

impl Serialize for MultiError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_map(Some(self.len()))?;
        for (path, error) in self.iter() {
            state.serialize_entry(path, &Message(error))?;
        }
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use crate::{MultiError, SchemaError};

    #[test]
    fn as_json_object() {
        let mut errors = MultiError::new();
        errors.insert("b.0", SchemaError::IndexTooLarge { index: 5, max: 1 });
        errors.insert("a", SchemaError::EmptyField { key: "a".into() });

        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(
            json,
            r#"{"a":"a is empty","b.0":"schema: slice index 5 is larger than the configured max index 1"}"#
        );
    }
}
