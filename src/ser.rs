use crate::keyword::Keyword;
use serde::ser::{Error as _, SerializeMap, Serializer};

///
/// Writes keywords as their bare text, either as a JSON string value or as
/// the field name of the object currently being written.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeywordSerializer {
    write_field_name: bool,
}

impl KeywordSerializer {
    #[inline]
    pub fn new(write_field_name: bool) -> Self {
        Self { write_field_name }
    }

    #[inline]
    pub fn writes_field_name(&self) -> bool {
        self.write_field_name
    }

    /// Writes `value` as a standalone string.
    ///
    /// A field name needs an enclosing object, so in field-name mode this
    /// fails; use [`emit`](KeywordSerializer::emit) instead.
    pub fn serialize<S>(&self, value: &Keyword, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.write_field_name {
            Err(S::Error::custom(format_args!(
                "keyword {} written as a field name outside of an object",
                value
            )))
        } else {
            serializer.serialize_str(value.as_str())
        }
    }

    /// Writes `value` into an open object: as the next field name in
    /// field-name mode (the caller writes the value next), otherwise as the
    /// value of the pending field.
    pub fn emit<M>(&self, value: &Keyword, map: &mut M) -> Result<(), M::Error>
    where
        M: SerializeMap,
    {
        if self.write_field_name {
            map.serialize_key(value.as_str())
        } else {
            map.serialize_value(value.as_str())
        }
    }
}
