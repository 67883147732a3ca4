//! Moving [`OrderedMap`]s in and out of JSON, and reaching into nested ones.

use std::fmt::Display;

use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::{
    error::{json_kind, Error, Result},
    OrderedMap, ToJson, Value,
};

impl<K, V> OrderedMap<K, V>
where
    K: Display,
    V: ToJson,
{
    /// A JSON object with the map's keys as text, in the map's order. Nested
    /// maps and sequences are unwrapped all the way down.
    pub fn to_json(&self) -> JsonValue {
        let mut object = JsonMap::new();
        for (k, v) in self {
            object.insert(k.to_string(), v.to_json());
        }
        JsonValue::Object(object)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_json())?)
    }

    pub fn to_json_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_json())?)
    }
}

impl<K, V> ToJson for OrderedMap<K, V>
where
    K: Display,
    V: ToJson,
{
    fn to_json(&self) -> JsonValue {
        OrderedMap::to_json(self)
    }
}

impl OrderedMap<String, Value> {
    /// Loads every property of `object` into this map with `set`, so existing
    /// keys are overwritten in place and new ones appended in the object's
    /// order. See [`Value::from_json`] for what `convert_nested` does.
    pub fn from_json(&mut self, object: &JsonMap<String, JsonValue>, convert_nested: bool) -> &mut Self {
        tracing::debug!(properties = object.len(), convert_nested, "loading JSON object");

        for (k, v) in object {
            self.set(k.clone(), Value::from_json(v.clone(), convert_nested));
        }

        self
    }

    /// Parses `text` and loads it into a fresh map. The top level has to be
    /// an object.
    pub fn from_json_str(text: &str, convert_nested: bool) -> Result<Self> {
        let json: JsonValue = serde_json::from_str(text)?;
        match json {
            JsonValue::Object(object) => {
                let mut map = Self::with_capacity(object.len());
                map.from_json(&object, convert_nested);
                Ok(map)
            }
            other => Err(Error::NotAnObject {
                found: json_kind(&other),
            }),
        }
    }

    /// Follows `path` down through nested values.
    ///
    /// Maps (converted or raw objects) are indexed by key, lists (converted or
    /// raw arrays) by the segment read as a decimal index. Anything missing,
    /// a JSON `null`, or an attempt to step into a scalar gives `None`. An
    /// empty path also gives `None`.
    pub fn deep_get<S>(&self, path: &[S]) -> Option<Node<'_>>
    where
        S: AsRef<str>,
    {
        let (first, rest) = path.split_first()?;

        let mut node = Node::Value(self.get_str(first.as_ref())?);
        for (depth, segment) in rest.iter().enumerate() {
            if node.is_null() {
                return None;
            }
            node = match node.child(segment.as_ref()) {
                Some(child) => child,
                None => {
                    tracing::trace!(depth = depth + 1, "deep_get miss");
                    return None;
                }
            };
        }

        (!node.is_null()).then_some(node)
    }

    /// [`OrderedMap::deep_get`] with the path written as an RFC 6901 JSON
    /// pointer, e.g. `/x/y/0`. The empty pointer is the empty path.
    pub fn deep_get_pointer(&self, pointer: &str) -> Result<Option<Node<'_>>> {
        let path = parse_pointer(pointer)?;
        Ok(self.deep_get(&path))
    }

    /// [`OrderedMap::get`] for a `&str`, so path segments can be looked up
    /// without allocating a `String` for each one.
    fn get_str(&self, k: &str) -> Option<&Value> {
        self.keys
            .iter()
            .position(|key| key == k)
            .map(|i| &self.values[i])
    }
}

/// Something [`OrderedMap::deep_get`] found: either one of the map's own
/// values, or a piece of raw JSON stored inside one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Node<'a> {
    Value(&'a Value),
    Json(&'a JsonValue),
}

impl<'a> Node<'a> {
    fn child(self, segment: &str) -> Option<Node<'a>> {
        match self {
            Node::Value(Value::Map(m)) => m.get_str(segment).map(Node::Value),
            Node::Value(Value::List(l)) => l.get(parse_index(segment)?).map(Node::Value),
            Node::Value(Value::Raw(j)) | Node::Json(j) => match j {
                JsonValue::Object(o) => o.get(segment).map(Node::Json),
                JsonValue::Array(a) => a.get(parse_index(segment)?).map(Node::Json),
                _ => None,
            },
        }
    }

    fn is_null(&self) -> bool {
        match self {
            Node::Value(v) => v.is_null(),
            Node::Json(j) => j.is_null(),
        }
    }

    /// The raw JSON at this node, if it is raw JSON.
    pub fn as_json(&self) -> Option<&'a JsonValue> {
        match *self {
            Node::Value(v) => v.as_json(),
            Node::Json(j) => Some(j),
        }
    }

    /// The converted value at this node, if it is one.
    pub fn as_value(&self) -> Option<&'a Value> {
        match *self {
            Node::Value(v) => Some(v),
            Node::Json(_) => None,
        }
    }

    /// Plain JSON for whatever was found.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Node::Value(v) => v.to_json(),
            Node::Json(j) => (*j).clone(),
        }
    }
}

/// Array indices are plain decimal: no sign, no leading zeros.
fn parse_index(segment: &str) -> Option<usize> {
    if segment.is_empty()
        || !segment.bytes().all(|b| b.is_ascii_digit())
        || (segment.len() > 1 && segment.starts_with('0'))
    {
        return None;
    }
    segment.parse().ok()
}

fn parse_pointer(pointer: &str) -> Result<Vec<String>> {
    if pointer.is_empty() {
        return Ok(Vec::new());
    }
    if !pointer.starts_with('/') {
        return Err(Error::InvalidPointer(pointer.to_string()));
    }
    Ok(pointer
        .split('/')
        .skip(1)
        .map(|c| c.replace("~1", "/").replace("~0", "~"))
        .collect())
}
