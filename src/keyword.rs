//!
//! Interned keywords.
//!
//! A [`Keyword`](Keyword) is a symbolic identifier whose text lives exactly once
//! per process. Interning goes through a global table that only ever grows, so
//! two keywords with the same text always share the same allocation and
//! equality is a pointer comparison.
//!
use log::trace;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::{
    de::{self, Deserialize, Deserializer, Visitor},
    ser::{Serialize, Serializer},
};
use std::{
    cmp::Ordering,
    collections::HashSet,
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
    sync::Arc,
};

static TABLE: Lazy<RwLock<HashSet<Arc<str>>>> = Lazy::new(|| RwLock::new(HashSet::new()));

#[derive(Clone)]
pub struct Keyword {
    inner: Arc<str>,
}

impl Keyword {
    /// Returns the canonical keyword for `text`, registering it on first use.
    pub fn intern(text: &str) -> Self {
        if let Some(inner) = TABLE.read().get(text) {
            return Self {
                inner: inner.clone(),
            };
        }

        let mut table = TABLE.write();
        // another thread may have won the race between both locks
        if let Some(inner) = table.get(text) {
            return Self {
                inner: inner.clone(),
            };
        }

        let inner: Arc<str> = Arc::from(text);
        table.insert(inner.clone());
        trace!("interned keyword :{} ({} entries)", text, table.len());

        Self { inner }
    }

    /// Lookup without registering.
    pub fn find(text: &str) -> Option<Self> {
        TABLE.read().get(text).map(|inner| Self {
            inner: inner.clone(),
        })
    }

    /// Full textual form, without the `:` sigil.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    #[inline]
    pub fn namespace(&self) -> Option<&str> {
        self.split().map(|(ns, _)| ns)
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.split().map(|(_, name)| name).unwrap_or(self.as_str())
    }

    // only the exact text "/" has no namespace, "/foo" has an empty one
    fn split(&self) -> Option<(&str, &str)> {
        if self.as_str() == "/" {
            return None;
        }
        self.inner
            .find('/')
            .map(|idx| (&self.inner[..idx], &self.inner[idx + 1..]))
    }
}

impl PartialEq for Keyword {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Keyword {}

impl Hash for Keyword {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state)
    }
}

impl PartialOrd for Keyword {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Keyword {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl fmt::Display for Keyword {
    #[inline]
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, ":{}", self.as_str())
    }
}

impl fmt::Debug for Keyword {
    #[inline]
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, fmt)
    }
}

impl From<&str> for Keyword {
    #[inline]
    fn from(text: &str) -> Self {
        Self::intern(text)
    }
}

impl FromStr for Keyword {
    type Err = std::convert::Infallible;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::intern(s))
    }
}

impl Serialize for Keyword {
    #[inline]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

struct KeywordVisitor;

impl<'de> Visitor<'de> for KeywordVisitor {
    type Value = Keyword;

    fn expecting(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "a keyword name")
    }

    #[inline]
    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Keyword::intern(v))
    }
}

impl<'de> Deserialize<'de> for Keyword {
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(KeywordVisitor)
    }
}

#[cfg(test)]
mod test {
    use super::Keyword;
    use std::{collections::HashMap, thread};

    #[test]
    fn test_intern_shares_instance() {
        let a = Keyword::intern("shared");
        let b = Keyword::intern(&String::from("shared"));
        assert_eq!(a, b);
        assert!(std::ptr::eq(a.as_str(), b.as_str()));
        assert_ne!(a, Keyword::intern("other"));
    }

    #[test]
    fn test_find_does_not_register() {
        assert!(Keyword::find("never-interned-anywhere").is_none());
        let k = Keyword::intern("interned-once");
        assert_eq!(Keyword::find("interned-once"), Some(k));
    }

    #[test]
    fn test_namespace_split() {
        let k = Keyword::intern("user/name");
        assert_eq!(k.namespace(), Some("user"));
        assert_eq!(k.name(), "name");
        assert_eq!(k.as_str(), "user/name");

        let plain = Keyword::intern("plain");
        assert_eq!(plain.namespace(), None);
        assert_eq!(plain.name(), "plain");

        let slash = Keyword::intern("/");
        assert_eq!(slash.namespace(), None);
        assert_eq!(slash.name(), "/");

        let leading = Keyword::intern("/foo");
        assert_eq!(leading.namespace(), Some(""));
        assert_eq!(leading.name(), "foo");

        let trailing = Keyword::intern("ns/");
        assert_eq!(trailing.namespace(), Some("ns"));
        assert_eq!(trailing.name(), "");

        let nested = Keyword::intern("a/b/c");
        assert_eq!(nested.namespace(), Some("a"));
        assert_eq!(nested.name(), "b/c");
    }

    #[test]
    fn test_display_has_sigil() {
        assert_eq!(Keyword::intern("foo").to_string(), ":foo");
    }

    #[test]
    fn test_serde_value_and_key() {
        let k = Keyword::intern("foo");
        assert_eq!(serde_json::to_string(&k).unwrap(), "\"foo\"");

        let parsed: Keyword = serde_json::from_str("\"foo\"").unwrap();
        assert_eq!(parsed, k);

        let map: HashMap<Keyword, i32> = serde_json::from_str(r#"{"bar":1}"#).unwrap();
        assert_eq!(map.get(&Keyword::intern("bar")), Some(&1));
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"bar":1}"#);
    }

    #[test]
    fn test_concurrent_intern() {
        let handles = (0..8)
            .map(|_| thread::spawn(|| Keyword::intern("contended")))
            .collect::<Vec<_>>();

        let first = Keyword::intern("contended");
        for handle in handles {
            assert_eq!(handle.join().unwrap(), first);
        }
    }
}
