//! Tolerant field decoders for Crowdin JSON.
//!
//! The v1 API is inconsistent about scalar types: the same counter comes back
//! as `"12"` from one endpoint and `12` from another, and absent values are
//! sometimes `null` or `""`. These helpers are used with
//! `#[serde(deserialize_with = ...)]` on envelope fields.

use serde::de::{self, Deserializer, Visitor};
use std::fmt;

/// Decode a number, a numeric string, `""` or `null` into `u64`.
pub fn u64_value<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    struct U64Visitor;

    impl<'de> Visitor<'de> for U64Visitor {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an unsigned integer or a numeric string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
            u64::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<u64, E> {
            if v >= 0.0 && v.fract() == 0.0 {
                Ok(v as u64)
            } else {
                Err(E::invalid_value(de::Unexpected::Float(v), &self))
            }
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                return Ok(0);
            }
            trimmed
                .parse()
                .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<u64, E> {
            Ok(u64::from(v))
        }

        fn visit_unit<E: de::Error>(self) -> Result<u64, E> {
            Ok(0)
        }

        fn visit_none<E: de::Error>(self) -> Result<u64, E> {
            Ok(0)
        }

        fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<u64, D2::Error> {
            d.deserialize_any(self)
        }
    }

    deserializer.deserialize_any(U64Visitor)
}

/// Decode a string, number, boolean or `null` into `String`.
pub fn string_value<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringVisitor;

    impl<'de> Visitor<'de> for StringVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string or a scalar")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_unit<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<String, D2::Error> {
            d.deserialize_any(self)
        }
    }

    deserializer.deserialize_any(StringVisitor)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Counters {
        #[serde(default, deserialize_with = "super::u64_value")]
        count: u64,
        #[serde(default, deserialize_with = "super::string_value")]
        label: String,
    }

    fn parse(json: &str) -> Counters {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn numbers_and_numeric_strings_decode_alike() {
        assert_eq!(parse(r#"{"count":12}"#).count, 12);
        assert_eq!(parse(r#"{"count":"12"}"#).count, 12);
        assert_eq!(parse(r#"{"count":""}"#).count, 0);
        assert_eq!(parse(r#"{"count":null}"#).count, 0);
        assert_eq!(parse(r#"{}"#).count, 0);
    }

    #[test]
    fn non_numeric_string_is_rejected() {
        assert!(serde_json::from_str::<Counters>(r#"{"count":"many"}"#).is_err());
    }

    #[test]
    fn scalars_decode_into_strings() {
        assert_eq!(parse(r#"{"label":"open"}"#).label, "open");
        assert_eq!(parse(r#"{"label":7}"#).label, "7");
        assert_eq!(parse(r#"{"label":true}"#).label, "true");
        assert_eq!(parse(r#"{"label":null}"#).label, "");
    }
}
