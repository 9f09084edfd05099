use crate::{
    error::Error,
    keyword::Keyword,
    mapper::Mapper,
    value::{Key, Number, Value},
};
use serde::de::{self, DeserializeSeed, Error as _, MapAccess, SeqAccess, Visitor};
use std::{collections::BTreeMap, fmt};

///
/// Turns a raw object field name into a [`Key`](Key).
///
/// The text handed in is already unescaped by the JSON parser.
///
pub trait KeyDeserializer: Send + Sync {
    fn deserialize_key(&self, raw: &str) -> Result<Key, Error>;
}

/// Interns every field name as a keyword.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordKeyDeserializer;

impl KeyDeserializer for KeywordKeyDeserializer {
    #[inline]
    fn deserialize_key(&self, raw: &str) -> Result<Key, Error> {
        Ok(Key::Keyword(Keyword::intern(raw)))
    }
}

/// Keeps field names as plain strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringKeyDeserializer;

impl KeyDeserializer for StringKeyDeserializer {
    #[inline]
    fn deserialize_key(&self, raw: &str) -> Result<Key, Error> {
        Ok(Key::String(String::from(raw)))
    }
}

/// Builds a [`Value`](Value), routing object keys through the mapper.
#[derive(Clone, Copy)]
pub(crate) struct ValueSeed<'m> {
    pub mapper: &'m Mapper,
}

impl<'de, 'm> DeserializeSeed<'de> for ValueSeed<'m> {
    type Value = Value;

    #[inline]
    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de, 'm> Visitor<'de> for ValueSeed<'m> {
    type Value = Value;

    fn expecting(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "any JSON value")
    }

    #[inline]
    fn visit_unit<E>(self) -> Result<Self::Value, E> {
        Ok(Value::Nil)
    }

    #[inline]
    fn visit_none<E>(self) -> Result<Self::Value, E> {
        Ok(Value::Nil)
    }

    #[inline]
    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        self.deserialize(deserializer)
    }

    #[inline]
    fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Value::Bool(v))
    }

    #[inline]
    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Value::Number(Number::Integer(v)))
    }

    #[inline]
    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Value::from(v))
    }

    #[inline]
    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Value::Number(Number::Double(v)))
    }

    #[inline]
    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Value::String(String::from(v)))
    }

    #[inline]
    fn visit_string<E>(self, v: String) -> Result<Self::Value, E> {
        Ok(Value::String(v))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element_seed(self)? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut object = BTreeMap::new();
        while let Some(raw) = map.next_key::<String>()? {
            let key = self
                .mapper
                .key_deserializer()
                .deserialize_key(&raw)
                .map_err(A::Error::custom)?;
            let value = map.next_value_seed(self)?;
            object.insert(key, value);
        }
        Ok(Value::Object(object))
    }
}

#[cfg(test)]
mod test {
    use super::{KeyDeserializer, KeywordKeyDeserializer, StringKeyDeserializer};
    use crate::{keyword::Keyword, value::Key};
    use proptest::prelude::*;

    #[test]
    fn test_keyword_key() {
        let key = KeywordKeyDeserializer.deserialize_key("bar").unwrap();
        assert_eq!(key, Key::Keyword(Keyword::intern("bar")));
    }

    #[test]
    fn test_string_key() {
        let key = StringKeyDeserializer.deserialize_key("bar").unwrap();
        assert_eq!(key, Key::String(String::from("bar")));
    }

    #[test]
    fn test_empty_and_odd_keys() {
        for raw in &["", "a b", "ns/name", "\u{1F600}", "\"quoted\""] {
            let key = KeywordKeyDeserializer.deserialize_key(raw).unwrap();
            assert_eq!(key.as_str(), *raw);
        }
    }

    proptest! {
        #[test]
        fn prop_keys_are_interned(raw in ".*") {
            let a = KeywordKeyDeserializer.deserialize_key(&raw).unwrap();
            let b = KeywordKeyDeserializer.deserialize_key(&raw).unwrap();
            prop_assert_eq!(&a, &b);
            prop_assert_eq!(a, Key::Keyword(Keyword::intern(&raw)));
        }
    }
}
