use core::fmt;

use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::SnowflakeId;

/// Serialized as a decimal string so 64-bit values survive JavaScript
/// consumers. Deserializes from that string, a bare integer, or decimal
/// bytes.
impl Serialize for SnowflakeId {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SnowflakeId {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        d.deserialize_any(IdVisitor)
    }
}

struct IdVisitor;

impl Visitor<'_> for IdVisitor {
    type Value = SnowflakeId;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a snowflake id as a decimal string or integer")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        SnowflakeId::parse(v).map_err(E::custom)
    }

    fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        SnowflakeId::from_binary(v).map_err(E::custom)
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(SnowflakeId::from_raw(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        i64::try_from(v)
            .map(SnowflakeId::from_raw)
            .map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
    }
}

/// `#[serde(with = "as_native")]`: encode an ID as a plain integer.
pub mod as_native {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::SnowflakeId;

    /// Serialize an ID as its native integer representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(id: &SnowflakeId, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        id.to_raw().serialize(s)
    }

    /// Deserialize an ID from its native integer representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails or the value is
    /// not an `i64`.
    pub fn deserialize<'de, D>(d: D) -> Result<SnowflakeId, D::Error>
    where
        D: Deserializer<'de>,
    {
        i64::deserialize(d).map(SnowflakeId::from_raw)
    }
}
