use crate::{keyword::Keyword, mapper::Mapper};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{collections::BTreeMap, fmt, time::SystemTime};

///
/// Number sum types.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    /// only used above `i64::MAX`
    Unsigned(u64),
    Double(f64),
}

///
/// Object keys.
///
/// Keys read back from JSON are keywords or plain strings depending on the
/// key deserializer of the [`Mapper`](crate::Mapper).
///
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Keyword(Keyword),
    String(String),
}

impl Key {
    #[inline]
    pub fn as_str(&self) -> &str {
        match self {
            Key::Keyword(k) => k.as_str(),
            Key::String(s) => s,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Key::Keyword(k) => fmt::Display::fmt(k, fmt),
            Key::String(s) => write!(fmt, "{:?}", s),
        }
    }
}

impl From<Keyword> for Key {
    #[inline]
    fn from(k: Keyword) -> Self {
        Key::Keyword(k)
    }
}

impl From<String> for Key {
    #[inline]
    fn from(s: String) -> Self {
        Key::String(s)
    }
}

impl From<&str> for Key {
    #[inline]
    fn from(s: &str) -> Self {
        Key::String(String::from(s))
    }
}

///
/// Document tree carrying keywords and dates next to the plain JSON types.
///
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(Number),
    String(String),
    Keyword(Keyword),
    Date(DateTime<Utc>),
    Array(Vec<Value>),
    Object(BTreeMap<Key, Value>),
}

impl Value {
    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_keyword(&self) -> Option<&Keyword> {
        match self {
            Value::Keyword(k) => Some(k),
            _ => None,
        }
    }

    #[inline]
    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::Date(d) => Some(d),
            _ => None,
        }
    }

    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Number(Number::Integer(v)) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Number(Number::Double(v)) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object(&self) -> Option<&BTreeMap<Key, Value>> {
        match self {
            Value::Object(m) => Some(m),
            _ => None,
        }
    }

    /// Object lookup, `None` for anything that isn't an object.
    pub fn get<K>(&self, key: K) -> Option<&Value>
    where
        K: Into<Key>,
    {
        self.as_object().and_then(|m| m.get(&key.into()))
    }
}

impl Default for Value {
    #[inline]
    fn default() -> Self {
        Value::Nil
    }
}

macro_rules! from_number {
    ($($ty:ty => $variant:ident),*) => {
        $(impl From<$ty> for Value {
            #[inline]
            fn from(v: $ty) -> Self {
                Value::Number(Number::$variant(v.into()))
            }
        })*
    };
}

from_number! {
    i8 => Integer, i16 => Integer, i32 => Integer, i64 => Integer,
    u8 => Integer, u16 => Integer, u32 => Integer,
    f32 => Double, f64 => Double
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        if v <= i64::MAX as u64 {
            Value::Number(Number::Integer(v as i64))
        } else {
            Value::Number(Number::Unsigned(v))
        }
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<String> for Value {
    #[inline]
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(v: &str) -> Self {
        Value::String(String::from(v))
    }
}

impl From<Keyword> for Value {
    #[inline]
    fn from(v: Keyword) -> Self {
        Value::Keyword(v)
    }
}

impl From<DateTime<Utc>> for Value {
    #[inline]
    fn from(v: DateTime<Utc>) -> Self {
        Value::Date(v)
    }
}

impl From<SystemTime> for Value {
    #[inline]
    fn from(v: SystemTime) -> Self {
        Value::Date(DateTime::<Utc>::from(v))
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    #[inline]
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Nil)
    }
}

impl<T> From<Vec<T>> for Value
where
    T: Into<Value>,
{
    #[inline]
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<K, V> std::iter::FromIterator<(K, V)> for Value
where
    K: Into<Key>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Object(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Serializes with the default [`Mapper`](crate::Mapper) handlers.
impl Serialize for Value {
    #[inline]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Mapper::shared().encode(self).serialize(serializer)
    }
}

/// Deserializes with the default [`Mapper`](crate::Mapper), keys become keywords.
impl<'de> Deserialize<'de> for Value {
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Mapper::shared().decode(deserializer)
    }
}

#[cfg(test)]
mod test {
    use super::{Key, Number, Value};
    use crate::keyword::Keyword;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_conversions() {
        assert_eq!(Value::from(3u8), Value::Number(Number::Integer(3)));
        assert_eq!(Value::from(u64::MAX), Value::Number(Number::Unsigned(u64::MAX)));
        assert_eq!(Value::from(None::<i32>), Value::Nil);
        assert_eq!(
            Value::from(vec!["a", "b"]).as_array().map(|v| v.len()),
            Some(2)
        );
    }

    #[test]
    fn test_object_lookup() {
        let v = vec![
            (Key::from(Keyword::intern("id")), Value::from(7)),
            (Key::from("name"), Value::from("seven")),
        ]
        .into_iter()
        .collect::<Value>();

        assert_eq!(v.get(Keyword::intern("id")).and_then(Value::as_int), Some(7));
        assert_eq!(v.get("name").and_then(Value::as_str), Some("seven"));
        // keyword and string keys never collide
        assert!(v.get("id").is_none());
        assert!(Value::Nil.get("id").is_none());
    }

    #[test]
    fn test_serde_through_default_mapper() {
        let v = vec![
            (Keyword::intern("at"), Value::from(Utc.timestamp_opt(0, 0).unwrap())),
            (Keyword::intern("kind"), Value::from(Keyword::intern("event"))),
        ]
        .into_iter()
        .collect::<Value>();

        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, r#"{"at":"1970-01-01T00:00:00Z","kind":"event"}"#);

        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            back.get(Keyword::intern("kind")).and_then(Value::as_str),
            Some("event")
        );
    }
}
