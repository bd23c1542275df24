//! Loading of JSON documents from the database directory.
//!
//! Every decoder in this crate walks maps in document order, so documents are
//! parsed with `serde_json`'s `preserve_order` feature enabled. The
//! [`DocumentSource`] trait is the seam through which all JSON files are read;
//! tests substitute their own source to count or intercept loads.
//!
//! An object that repeats a key is rejected. Column numbering and device
//! order both depend on every key appearing exactly once, and a parsed
//! [`Value`] can no longer tell a repeated key apart.

use crate::error::{DbError, DbResult};
use serde::de::{self, DeserializeOwned, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// Loads a JSON document by path.
pub trait DocumentSource: Send + Sync {
    /// Reads and parses the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::FileNotFound`] or [`DbError::Io`] if the file cannot
    /// be read, and [`DbError::Parse`] if it is not valid JSON.
    fn load(&self, path: &Path) -> DbResult<Value>;
}

/// Reads documents from the filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFileSource;

impl DocumentSource for JsonFileSource {
    fn load(&self, path: &Path) -> DbResult<Value> {
        let content = std::fs::read_to_string(path).map_err(|e| DbError::from_io(path, e))?;
        parse_document(&content).map_err(|e| DbError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

/// Parses JSON text, rejecting any object with a repeated key.
pub fn parse_document(text: &str) -> serde_json::Result<Value> {
    serde_json::from_str::<UniqueKeys>(text)?;
    serde_json::from_str(text)
}

/// Walks a JSON value, failing on the first object that repeats a key.
struct UniqueKeys;

impl<'de> Deserialize<'de> for UniqueKeys {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(UniqueKeysVisitor)
    }
}

struct UniqueKeysVisitor;

impl<'de> Visitor<'de> for UniqueKeysVisitor {
    type Value = UniqueKeys;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON value")
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<UniqueKeys, E> {
        Ok(UniqueKeys)
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<UniqueKeys, E> {
        Ok(UniqueKeys)
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<UniqueKeys, E> {
        Ok(UniqueKeys)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<UniqueKeys, E> {
        Ok(UniqueKeys)
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<UniqueKeys, E> {
        Ok(UniqueKeys)
    }

    fn visit_unit<E: de::Error>(self) -> Result<UniqueKeys, E> {
        Ok(UniqueKeys)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<UniqueKeys, A::Error> {
        while seq.next_element::<UniqueKeys>()?.is_some() {}
        Ok(UniqueKeys)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<UniqueKeys, A::Error> {
        let mut seen = HashSet::new();
        while let Some(key) = map.next_key::<String>()? {
            if seen.contains(&key) {
                return Err(de::Error::custom(format!("duplicate key `{key}`")));
            }
            map.next_value::<UniqueKeys>()?;
            seen.insert(key);
        }
        Ok(UniqueKeys)
    }
}

/// Deserializes a typed view of `value`, reporting failures against `context`.
pub(crate) fn decode<T: DeserializeOwned>(value: &Value, context: &str) -> DbResult<T> {
    T::deserialize(value).map_err(|e| DbError::schema(context, e.to_string()))
}
