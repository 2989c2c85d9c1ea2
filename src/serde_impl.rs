use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::AvlTreeMap;

impl<K: Serialize, V: Serialize> Serialize for AvlTreeMap<K, V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct AvlTreeMapVisitor<K, V> {
    marker: PhantomData<fn() -> AvlTreeMap<K, V>>,
}

impl<'de, K, V> Visitor<'de> for AvlTreeMapVisitor<K, V>
where
    K: Deserialize<'de> + PartialOrd,
    V: Deserialize<'de>,
{
    type Value = AvlTreeMap<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = AvlTreeMap::new();
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value).map_err(de::Error::custom)?;
        }
        Ok(map)
    }
}

impl<'de, K, V> Deserialize<'de> for AvlTreeMap<K, V>
where
    K: Deserialize<'de> + PartialOrd,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(AvlTreeMapVisitor {
            marker: PhantomData,
        })
    }
}
