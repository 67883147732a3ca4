//! serde support. An [`OrderedMap`] goes out as a map in key order and comes
//! back in through `set`, so a repeated key keeps its first position and its
//! last value.

use std::{fmt, marker::PhantomData};

use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::{OrderedMap, Value};

impl<K, V> Serialize for OrderedMap<K, V>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;

        for (k, v) in self {
            map.serialize_entry(k, v)?;
        }

        map.end()
    }
}

struct OrderedMapVisitor<K, V> {
    marker: PhantomData<fn() -> OrderedMap<K, V>>,
}

impl<'de, K, V> Visitor<'de> for OrderedMapVisitor<K, V>
where
    K: Deserialize<'de> + PartialEq,
    V: Deserialize<'de>,
{
    type Value = OrderedMap<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut map = OrderedMap::with_capacity(access.size_hint().unwrap_or(0));

        while let Some((k, v)) = access.next_entry()? {
            map.set(k, v);
        }

        Ok(map)
    }
}

impl<'de, K, V> Deserialize<'de> for OrderedMap<K, V>
where
    K: Deserialize<'de> + PartialEq,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedMapVisitor {
            marker: PhantomData,
        })
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Raw(j) => j.serialize(serializer),
            Value::Map(m) => m.serialize(serializer),
            Value::List(l) => l.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    /// Always converts nested objects and arrays.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let json = serde_json::Value::deserialize(deserializer)?;
        Ok(Value::from_json(json, true))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{OrderedMap, Value, ValueMap};

    #[test]
    fn serializes_in_key_order() {
        let mut m = OrderedMap::new();
        m.set("zebra", 1).set("apple", 2).set("mango", 3);

        assert_eq!(
            r#"{"zebra":1,"apple":2,"mango":3}"#,
            serde_json::to_string(&m).unwrap()
        );
    }

    #[test]
    fn duplicate_keys_resolve_like_set() {
        let m: OrderedMap<String, u32> =
            serde_json::from_str(r#"{"a": 1, "b": 2, "a": 3}"#).unwrap();

        assert_eq!(&["a", "b"], m.keys());
        assert_eq!(&[3, 2], m.values());
    }

    #[test]
    fn values_deserialize_converted() {
        let m: ValueMap = serde_json::from_str(r#"{"o": {"p": [1, {"q": 2}]}}"#).unwrap();

        let o = m.get(&"o".to_string()).and_then(Value::as_map).unwrap();
        assert!(matches!(o.get(&"p".to_string()), Some(Value::List(_))));

        assert_eq!(
            json!({"o": {"p": [1, {"q": 2}]}}),
            serde_json::to_value(&m).unwrap()
        );
    }

    #[test]
    fn rejects_non_maps() {
        assert!(serde_json::from_str::<OrderedMap<String, u8>>("[1]").is_err());
    }
}
