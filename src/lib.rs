//!
//! Keyword and date aware JSON mapping on top of `serde_json`.
//!
//! - dates are written as UTC strings laid out by a configurable pattern,
//!   `yyyy-MM-dd'T'HH:mm:ss'Z'` unless told otherwise,
//! - [`Keyword`](Keyword)s are written as their bare text, either as string
//!   values or as object field names,
//! - object field names read back from JSON are interned as keywords.
//!
//! ```
//! use kwjson::{Keyword, Mapper, Value};
//!
//! let mapper = Mapper::default();
//! let value = mapper.from_str(r#"{"role":"admin"}"#).unwrap();
//! assert_eq!(
//!     value.get(Keyword::intern("role")).and_then(Value::as_str),
//!     Some("admin")
//! );
//! assert_eq!(mapper.to_string(&value).unwrap(), r#"{"role":"admin"}"#);
//! ```
//!
pub mod date;
pub mod de;
pub mod error;
pub mod keyword;
pub mod mapper;
pub mod options;
pub mod pattern;
pub mod ser;
pub mod value;

pub use crate::{
    date::{DateSerializer, DEFAULT_FORMAT},
    de::{KeyDeserializer, KeywordKeyDeserializer, StringKeyDeserializer},
    error::{Error, PatternError},
    keyword::Keyword,
    mapper::{Encoded, Mapper},
    options::{Options, OptionsBuilder},
    ser::KeywordSerializer,
    value::{Key, Number, Value},
};
