//! An insertion-ordered map with JSON in and out, deep-path lookups, and a
//! sorted-insert mode.
//!
//! ```
//! use ordered_map::OrderedMap;
//!
//! let mut m = OrderedMap::new();
//! m.set("a", 1).set("b", 2).set("a", 3);
//!
//! assert_eq!(&["a", "b"], m.keys());
//! assert_eq!(Some(&3), m.get(&"a"));
//! ```
//!
//! Lookups scan the keys, so this is meant for small maps where order
//! matters more than speed.

mod error;
mod json;
mod ordered_map;
mod serde_impl;
#[cfg(feature = "shared")]
mod shared;
mod sorted;
mod value;

pub use error::{Error, Result};
pub use json::Node;
pub use ordered_map::{IntoIter, Iter, OrderedMap};
#[cfg(feature = "shared")]
pub use shared::SharedOrderedMap;
pub use value::{ToJson, Value, ValueMap};

/// Sends log output from the crate to the test harness. Safe to call from
/// every test; only the first call installs anything.
#[cfg(test)]
pub(crate) fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{OrderedMap, Value, ValueMap};

    #[test]
    fn readme_snippet() {
        crate::init_test_tracing();

        let mut m = OrderedMap::new();
        m.set("a", 1).set("b", 2).set("a", 3);
        assert_eq!(&["a", "b"], m.keys());
        assert_eq!(Some(&3), m.get(&"a"));
        assert_eq!(2, m.size());

        assert!(m.delete(&"b"));
        assert_eq!(&["a"], m.keys());
        assert!(!m.delete(&"b"));

        let mut sorted = OrderedMap::new();
        sorted.sorted_set(5, "x").sorted_set(1, "y").sorted_set(9, "z");
        assert_eq!(&[1, 5, 9], sorted.keys());

        let mut tree = ValueMap::new();
        if let serde_json::Value::Object(o) = json!({"a": 1, "b": {"c": 2}}) {
            tree.from_json(&o, true);
        }
        let b = tree.get(&"b".to_string()).and_then(Value::as_map).unwrap();
        assert_eq!(Some(&Value::from(2)), b.get(&"c".to_string()));
        assert_eq!(json!({"a": 1, "b": {"c": 2}}), tree.to_json());

        let x = ValueMap::from(vec![("x".to_string(), Value::Raw(json!({"y": 1})))]);
        assert_eq!(json!(1), x.deep_get(&["x", "y"]).unwrap().to_json());
        assert!(x.deep_get(&["x", "z"]).is_none());
        assert!(x.deep_get(&["q", "r"]).is_none());
    }
}
