//! A JSON-shaped tree whose objects are [`OrderedMap`]s.

use serde_json::Value as JsonValue;

use crate::OrderedMap;

/// The map type JSON objects load into.
pub type ValueMap = OrderedMap<String, Value>;

/// A value that can hold nested maps.
///
/// `Raw` is JSON stored as-is. That's every scalar, and also objects and
/// arrays which were loaded without nested conversion. `Map` and `List` are
/// the converted forms.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Raw(JsonValue),
    Map(OrderedMap<String, Value>),
    List(Vec<Value>),
}

impl Value {
    /// Wraps a JSON value. With `convert_nested`, objects become
    /// [`Value::Map`] and arrays become [`Value::List`] all the way down;
    /// without it the JSON is kept whole in a [`Value::Raw`].
    pub fn from_json(json: JsonValue, convert_nested: bool) -> Self {
        if !convert_nested {
            return Value::Raw(json);
        }

        match json {
            JsonValue::Object(object) => {
                let mut map = OrderedMap::with_capacity(object.len());
                for (k, v) in object {
                    map.set(k, Value::from_json(v, true));
                }
                Value::Map(map)
            }
            JsonValue::Array(items) => Value::List(
                items
                    .into_iter()
                    .map(|v| Value::from_json(v, true))
                    .collect(),
            ),
            scalar => Value::Raw(scalar),
        }
    }

    pub fn as_map(&self) -> Option<&OrderedMap<String, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut OrderedMap<String, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&JsonValue> {
        match self {
            Value::Raw(j) => Some(j),
            _ => None,
        }
    }

    /// Whether this is a raw JSON `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Raw(JsonValue::Null))
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Raw(JsonValue::Null)
    }
}

impl From<JsonValue> for Value {
    /// Converts nested objects and arrays, same as deserializing.
    fn from(json: JsonValue) -> Self {
        Value::from_json(json, true)
    }
}

impl From<OrderedMap<String, Value>> for Value {
    fn from(map: OrderedMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

impl From<Vec<Value>> for Value {
    fn from(list: Vec<Value>) -> Self {
        Value::List(list)
    }
}

macro_rules! raw_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Raw(JsonValue::from(v))
                }
            }
        )*
    };
}

raw_from!(bool, i32, i64, u32, u64, f64, String, &str);

/// Unwraps a value into plain JSON for output. Containers recurse: maps
/// become objects, sequences map element-wise, scalars come out unchanged.
pub trait ToJson {
    fn to_json(&self) -> JsonValue;
}

impl ToJson for Value {
    fn to_json(&self) -> JsonValue {
        match self {
            Value::Raw(j) => j.clone(),
            Value::Map(m) => m.to_json(),
            Value::List(l) => l.to_json(),
        }
    }
}

impl ToJson for JsonValue {
    fn to_json(&self) -> JsonValue {
        self.clone()
    }
}

impl<T> ToJson for Vec<T>
where
    T: ToJson,
{
    fn to_json(&self) -> JsonValue {
        JsonValue::Array(self.iter().map(ToJson::to_json).collect())
    }
}

impl<T> ToJson for Option<T>
where
    T: ToJson,
{
    fn to_json(&self) -> JsonValue {
        match self {
            Some(v) => v.to_json(),
            None => JsonValue::Null,
        }
    }
}

macro_rules! scalar_to_json {
    ($($t:ty),*) => {
        $(
            impl ToJson for $t {
                fn to_json(&self) -> JsonValue {
                    JsonValue::from(self.clone())
                }
            }
        )*
    };
}

scalar_to_json!(bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, String);

impl ToJson for &str {
    fn to_json(&self) -> JsonValue {
        JsonValue::from(*self)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{ToJson, Value};

    #[test]
    fn without_conversion_everything_stays_raw() {
        let v = Value::from_json(json!({"a": {"b": 1}}), false);
        assert_eq!(Some(&json!({"a": {"b": 1}})), v.as_json());
    }

    #[test]
    fn conversion_reaches_arrays_of_objects() {
        let v = Value::from_json(json!([{"a": 1}, 2, [{"b": null}]]), true);
        let list = v.as_list().unwrap();

        assert_eq!(
            Some(&Value::Raw(json!(1))),
            list[0].as_map().unwrap().get(&"a".to_string())
        );
        assert_eq!(Value::Raw(json!(2)), list[1]);

        let inner = list[2].as_list().unwrap()[0].as_map().unwrap();
        assert!(inner.get(&"b".to_string()).unwrap().is_null());
    }

    #[test]
    fn unwraps_nested_values() {
        let v = Value::from(json!({"x": [1, {"y": "z"}]}));
        assert_eq!(json!({"x": [1, {"y": "z"}]}), v.to_json());
    }

    #[test]
    fn scalars_and_options_unwrap() {
        assert_eq!(json!(3), 3u8.to_json());
        assert_eq!(json!(null), None::<i32>.to_json());
        assert_eq!(json!(["a", "b"]), vec!["a", "b"].to_json());
    }
}
