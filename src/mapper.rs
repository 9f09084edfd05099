//!
//! Mapper.
//!
//! A [`Mapper`](Mapper) is the registration table of the crate: it holds one
//! handler per value type and dispatches on the kind of every [`Value`](Value)
//! it walks.
//!
//! | value kind      | handler                                      |
//! |-----------------|----------------------------------------------|
//! | date            | [`DateSerializer`](crate::DateSerializer)    |
//! | keyword value   | [`KeywordSerializer`](crate::KeywordSerializer) in value mode |
//! | keyword key     | [`KeywordSerializer`](crate::KeywordSerializer) in field-name mode |
//! | object key (in) | [`KeyDeserializer`](crate::KeyDeserializer)  |
//!
//! Everything else is handed to `serde_json` untouched.
//!
use crate::{
    date::DateSerializer,
    de::{KeyDeserializer, KeywordKeyDeserializer, StringKeyDeserializer, ValueSeed},
    error::Error,
    keyword::Keyword,
    options::Options,
    ser::KeywordSerializer,
    value::{Key, Number, Value},
};
use log::debug;
use once_cell::sync::Lazy;
use serde::{
    de::DeserializeSeed,
    ser::{Error as _, Serialize, SerializeMap, SerializeSeq, Serializer},
    Deserializer,
};
use std::{collections::BTreeMap, fmt, io};

static SHARED: Lazy<Mapper> = Lazy::new(Mapper::default);

pub struct Mapper {
    dates: DateSerializer,
    keyword_values: KeywordSerializer,
    keyword_fields: KeywordSerializer,
    keys: Box<dyn KeyDeserializer>,
    pretty: bool,
}

impl Mapper {
    pub fn new(options: Options) -> Result<Self, Error> {
        let dates = DateSerializer::new(&options.date_format)?;
        let keys: Box<dyn KeyDeserializer> = if options.keyword_keys {
            Box::new(KeywordKeyDeserializer)
        } else {
            Box::new(StringKeyDeserializer)
        };

        debug!(
            "mapper built with date format {:?}, keyword keys: {}",
            options.date_format, options.keyword_keys
        );

        Ok(Self {
            dates,
            keyword_values: KeywordSerializer::new(false),
            keyword_fields: KeywordSerializer::new(true),
            keys,
            pretty: options.pretty,
        })
    }

    /// Replaces the handler used for object keys on input.
    pub fn with_key_deserializer<K>(mut self, keys: K) -> Self
    where
        K: KeyDeserializer + 'static,
    {
        self.keys = Box::new(keys);
        self
    }

    /// Process-wide mapper with default options.
    #[inline]
    pub fn shared() -> &'static Mapper {
        &SHARED
    }

    #[inline]
    pub fn date_serializer(&self) -> &DateSerializer {
        &self.dates
    }

    #[inline]
    pub fn key_deserializer(&self) -> &dyn KeyDeserializer {
        self.keys.as_ref()
    }

    /// A `Serialize` view of `value` that uses this mapper's handlers.
    #[inline]
    pub fn encode<'a>(&'a self, value: &'a Value) -> Encoded<'a> {
        Encoded {
            mapper: self,
            value,
        }
    }

    /// Deserializes a [`Value`](Value) from any serde deserializer.
    #[inline]
    pub fn decode<'de, D>(&self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        ValueSeed { mapper: self }.deserialize(deserializer)
    }

    pub fn to_writer<W>(&self, writer: W, value: &Value) -> Result<(), Error>
    where
        W: io::Write,
    {
        if self.pretty {
            serde_json::to_writer_pretty(writer, &self.encode(value))?;
        } else {
            serde_json::to_writer(writer, &self.encode(value))?;
        }
        Ok(())
    }

    pub fn to_vec(&self, value: &Value) -> Result<Vec<u8>, Error> {
        let mut out = Vec::with_capacity(128);
        self.to_writer(&mut out, value)?;
        Ok(out)
    }

    pub fn to_string(&self, value: &Value) -> Result<String, Error> {
        let out = self.to_vec(value)?;
        // serde_json only emits valid UTF-8
        String::from_utf8(out).map_err(|e| Error::CustomError(e.to_string()))
    }

    pub fn from_str(&self, raw: &str) -> Result<Value, Error> {
        let mut de = serde_json::Deserializer::from_str(raw);
        let value = self.decode(&mut de)?;
        de.end()?;
        Ok(value)
    }

    pub fn from_slice(&self, raw: &[u8]) -> Result<Value, Error> {
        let mut de = serde_json::Deserializer::from_slice(raw);
        let value = self.decode(&mut de)?;
        de.end()?;
        Ok(value)
    }

    pub fn from_reader<R>(&self, reader: R) -> Result<Value, Error>
    where
        R: io::Read,
    {
        let mut de = serde_json::Deserializer::from_reader(reader);
        let value = self.decode(&mut de)?;
        de.end()?;
        Ok(value)
    }
}

impl Default for Mapper {
    fn default() -> Self {
        Self {
            dates: DateSerializer::default(),
            keyword_values: KeywordSerializer::new(false),
            keyword_fields: KeywordSerializer::new(true),
            keys: Box::new(KeywordKeyDeserializer),
            pretty: false,
        }
    }
}

impl fmt::Debug for Mapper {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Mapper")
            .field("date_format", &self.dates.pattern().as_str())
            .field("pretty", &self.pretty)
            .finish()
    }
}

/// See [`Mapper::encode`](Mapper::encode).
pub struct Encoded<'a> {
    mapper: &'a Mapper,
    value: &'a Value,
}

impl<'a> Encoded<'a> {
    #[inline]
    fn nested(&self, value: &'a Value) -> Self {
        Encoded {
            mapper: self.mapper,
            value,
        }
    }
}

impl<'a> Serialize for Encoded<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mapper = self.mapper;

        match self.value {
            Value::Nil => serializer.serialize_unit(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Number(Number::Integer(v)) => serializer.serialize_i64(*v),
            Value::Number(Number::Unsigned(v)) => serializer.serialize_u64(*v),
            Value::Number(Number::Double(v)) => serializer.serialize_f64(*v),
            Value::String(s) => serializer.serialize_str(s),
            Value::Keyword(k) => mapper.keyword_values.serialize(k, serializer),
            Value::Date(d) => mapper.dates.serialize(d, serializer),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&self.nested(item))?;
                }
                seq.end()
            }
            Value::Object(entries) => {
                if let Some(name) = clashing_field_name(entries) {
                    return Err(S::Error::custom(format_args!(
                        "field name {:?} is used by both a keyword and a string key",
                        name
                    )));
                }

                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    match key {
                        Key::Keyword(k) => mapper.keyword_fields.emit(k, &mut map)?,
                        Key::String(s) => map.serialize_key(s)?,
                    }
                    map.serialize_value(&self.nested(value))?;
                }
                map.end()
            }
        }
    }
}

// :a and "a" are distinct keys but share the field name "a"
fn clashing_field_name(entries: &BTreeMap<Key, Value>) -> Option<&str> {
    entries.keys().find_map(|key| match key {
        Key::String(s) => Keyword::find(s)
            .filter(|k| entries.contains_key(&Key::Keyword(k.clone())))
            .map(|_| s.as_str()),
        Key::Keyword(_) => None,
    })
}
