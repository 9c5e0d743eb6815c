//! serde helpers for the JSON form of the wire messages.
//!
//! Enum fields are `i32` on the wire; JSON carries their canonical names but
//! still accepts raw integers so that unknown values survive decoding and can
//! be reported by the validator instead of failing the parse.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serializer};

/// A wire enum with canonical names.
pub trait WireEnum: Copy + Into<i32> + TryFrom<i32> {
    fn name(self) -> &'static str;
    fn from_name(name: &str) -> Option<Self>;
}

pub fn serialize_enum<E, S>(value: &i32, serializer: S) -> Result<S::Ok, S::Error>
where
    E: WireEnum,
    S: Serializer,
{
    match E::try_from(*value) {
        Ok(e) => serializer.serialize_str(e.name()),
        Err(_) => serializer.serialize_i32(*value),
    }
}

pub fn deserialize_enum<'de, E, D>(deserializer: D) -> Result<i32, D::Error>
where
    E: WireEnum,
    D: Deserializer<'de>,
{
    struct EnumVisitor<E>(PhantomData<E>);

    impl<E: WireEnum> Visitor<'_> for EnumVisitor<E> {
        type Value = i32;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an enum name or integer tag")
        }

        fn visit_str<Er: de::Error>(self, v: &str) -> Result<i32, Er> {
            E::from_name(v)
                .map(Into::into)
                .ok_or_else(|| Er::custom(format!("unknown enum name '{}'", v)))
        }

        fn visit_i64<Er: de::Error>(self, v: i64) -> Result<i32, Er> {
            i32::try_from(v).map_err(|_| Er::custom(format!("enum tag {} out of range", v)))
        }

        fn visit_u64<Er: de::Error>(self, v: u64) -> Result<i32, Er> {
            i32::try_from(v).map_err(|_| Er::custom(format!("enum tag {} out of range", v)))
        }
    }

    deserializer.deserialize_any(EnumVisitor::<E>(PhantomData))
}

/// Deserialize a string-keyed map, rejecting repeated keys instead of letting
/// the last occurrence win.
pub fn unique_keys<'de, D, V>(deserializer: D) -> Result<BTreeMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    struct UniqueKeys<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for UniqueKeys<V> {
        type Value = BTreeMap<String, V>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map with unique keys")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut out = BTreeMap::new();
            while let Some((key, value)) = map.next_entry::<String, V>()? {
                if out.contains_key(&key) {
                    return Err(de::Error::custom(format!("duplicate key '{}'", key)));
                }
                out.insert(key, value);
            }
            Ok(out)
        }
    }

    deserializer.deserialize_map(UniqueKeys(PhantomData))
}
