//!
//! Mapper options.
//!
//! Options can be modified through [`OptionsBuilder`](OptionsBuilder):
//!
//! - date format, layout used for every date (see [`pattern`](crate::pattern)),
//! - keyword keys, whether object keys read back from JSON are interned as
//!   keywords or kept as plain strings,
//! - pretty, indent output.
//!
use crate::date::DEFAULT_FORMAT;
use derive_builder::Builder;

#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(setter(into))]
pub struct Options {
    #[builder(default = "String::from(DEFAULT_FORMAT)")]
    pub date_format: String,
    #[builder(default = "true")]
    pub keyword_keys: bool,
    #[builder(default)]
    pub pretty: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            date_format: String::from(DEFAULT_FORMAT),
            keyword_keys: true,
            pretty: false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Options, OptionsBuilder};

    #[test]
    fn test_options_builder() {
        let r = OptionsBuilder::default()
            .date_format("yyyy-MM-dd")
            .keyword_keys(false)
            .build();

        assert!(r.is_ok());
        let options = r.unwrap();
        assert_eq!(options.date_format, "yyyy-MM-dd");
        assert!(!options.keyword_keys);
        assert!(!options.pretty);
    }

    #[test]
    fn test_builder_defaults() {
        assert_eq!(OptionsBuilder::default().build().unwrap(), Options::default());
    }
}
