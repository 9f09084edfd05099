use crate::{error::PatternError, pattern::Pattern};
use chrono::{DateTime, TimeZone, Utc};
use serde::Serializer;

/// ISO-8601 with seconds precision, e.g. `2024-06-01T12:00:00Z`.
pub const DEFAULT_FORMAT: &str = "yyyy-MM-dd'T'HH:mm:ss'Z'";

///
/// Writes dates as JSON strings laid out by a fixed pattern, always in UTC.
///
/// The pattern is compiled when the serializer is built, so a malformed
/// layout is reported there and never while serializing. Every call renders
/// into its own buffer; one instance can be shared between threads without
/// locking.
///
#[derive(Debug, Clone)]
pub struct DateSerializer {
    pattern: Pattern,
}

impl DateSerializer {
    #[inline]
    pub fn new(format: &str) -> Result<Self, PatternError> {
        Ok(Self {
            pattern: Pattern::compile(format)?,
        })
    }

    #[inline]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn format<Tz>(&self, value: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
    {
        let mut out = String::with_capacity(24);
        self.pattern.render(&value.with_timezone(&Utc), &mut out);
        out
    }

    #[inline]
    pub fn serialize<Tz, S>(&self, value: &DateTime<Tz>, serializer: S) -> Result<S::Ok, S::Error>
    where
        Tz: TimeZone,
        S: Serializer,
    {
        serializer.serialize_str(&self.format(value))
    }
}

impl Default for DateSerializer {
    fn default() -> Self {
        Self {
            pattern: Pattern::default(),
        }
    }
}

///
/// Field attribute helpers using [`DEFAULT_FORMAT`](DEFAULT_FORMAT):
///
/// ```
/// use chrono::{DateTime, Utc};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Event {
///     #[serde(with = "kwjson::date::iso")]
///     at: DateTime<Utc>,
/// }
/// ```
///
pub mod iso {
    use super::DateSerializer;
    use chrono::{DateTime, TimeZone, Utc};
    use once_cell::sync::Lazy;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    static DEFAULT: Lazy<DateSerializer> = Lazy::new(DateSerializer::default);

    pub fn serialize<Tz, S>(value: &DateTime<Tz>, serializer: S) -> Result<S::Ok, S::Error>
    where
        Tz: TimeZone,
        S: Serializer,
    {
        DEFAULT.serialize(value, serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|v| v.with_timezone(&Utc))
            .map_err(D::Error::custom)
    }
}
