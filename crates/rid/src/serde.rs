//! Serde support for [`Rid`].
//!
//! By default a [`Rid`] serializes as its 20-character compact string and
//! deserializes from a string (compact or numeral form) or from bytes (raw 12
//! bytes or either text form). Use [`as_numeral`] with `#[serde(with = ...)]`
//! to store the 36-digit numeral form instead.

use crate::Rid;
use ::serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use core::fmt;

impl Serialize for Rid {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut buf = [0_u8; crate::ENCODED_LEN];
        self.encode_to_buf(&mut buf);
        // The compact form is always ASCII.
        s.serialize_str(core::str::from_utf8(&buf).map_err(::serde::ser::Error::custom)?)
    }
}

impl<'de> Deserialize<'de> for Rid {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        d.deserialize_str(RidVisitor)
    }
}

struct RidVisitor;

impl de::Visitor<'_> for RidVisitor {
    type Value = Rid;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a 20-character rid, a 36-digit numeral rid, or 12 raw bytes")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Rid::parse(v).map_err(E::custom)
    }

    fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Rid::try_from(v).map_err(E::custom)
    }
}

/// Stores a [`Rid`] as its 36-digit numeral form.
pub mod as_numeral {
    use super::*;

    pub fn serialize<S>(id: &Rid, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&id.to_numeral())
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Rid, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NumeralVisitor;

        impl de::Visitor<'_> for NumeralVisitor {
            type Value = Rid;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a 36-digit numeral rid")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Rid::decode_numeral(v).map_err(E::custom)
            }
        }

        d.deserialize_str(NumeralVisitor)
    }
}
