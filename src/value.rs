//! Dynamically-typed runtime values.
//!
//! A `Value` is anything reachable from JSON-like data plus named-class
//! instances, functions and positional argument bundles. The matcher only ever
//! reads these; nothing in the crate mutates a value it is handed.
use std::sync::Arc;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// Ordered key → value mapping backing plain objects and instance fields.
pub type Map = IndexMap<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    /// Array-like positional argument bundle (indexable, but not an `Array`).
    Arguments(Vec<Value>),
    /// Plain object: no nominal type beyond the base object kind.
    Object(Map),
    Instance(Instance),
    Function(Function),
}

// ————————————————————————————————————————————————————————————————————————————
// NOMINAL TYPES
// ————————————————————————————————————————————————————————————————————————————

/// A named type that instances are constructed by.
///
/// Identity is the `Arc` allocation, not the name: two classes that happen to
/// share a name are still different types.
#[derive(Debug)]
pub struct Class {
    name: String,
    parent: Option<Arc<Class>>,
}

impl Class {
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self { name: name.into(), parent: None })
    }

    pub fn extends(name: impl Into<String>, parent: &Arc<Class>) -> Arc<Self> {
        Arc::new(Self { name: name.into(), parent: Some(Arc::clone(parent)) })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Arc<Class>> {
        self.parent.as_ref()
    }
}

#[derive(Debug, Clone)]
pub struct Instance {
    class: Arc<Class>,
    fields: Map,
}

impl Instance {
    pub fn new(class: &Arc<Class>) -> Self {
        Self { class: Arc::clone(class), fields: Map::new() }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn class(&self) -> &Arc<Class> {
        &self.class
    }

    pub fn fields(&self) -> &Map {
        &self.fields
    }

    /// Walks the parent chain looking for `class`.
    pub fn is_instance_of(&self, class: &Arc<Class>) -> bool {
        let mut cur = Some(&self.class);
        while let Some(c) = cur {
            if Arc::ptr_eq(c, class) {
                return true;
            }
            cur = c.parent.as_ref();
        }
        false
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.class, &other.class) && self.fields == other.fields
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
}

impl Function {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// ACCESSORS
// ————————————————————————————————————————————————————————————————————————————

impl Value {
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Ordered, indexable sequences: proper arrays and argument bundles.
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Array(xs) | Value::Arguments(xs) => Some(xs),
            _ => None,
        }
    }

    pub fn as_plain_object(&self) -> Option<&Map> {
        match self {
            Value::Object(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// CONVERSIONS
// ————————————————————————————————————————————————————————————————————————————

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            // without arbitrary_precision every JSON number has an f64 view
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(xs) => Value::Array(xs.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(m) => {
                Value::Object(m.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self { Value::Bool(b) }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self { Value::Number(n) }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self { Value::Number(f64::from(n)) }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self { Value::String(s.to_string()) }
}

impl From<String> for Value {
    fn from(s: String) -> Self { Value::String(s) }
}

impl From<Vec<Value>> for Value {
    fn from(xs: Vec<Value>) -> Self { Value::Array(xs) }
}

impl From<Map> for Value {
    fn from(m: Map) -> Self { Value::Object(m) }
}

impl From<Instance> for Value {
    fn from(i: Instance) -> Self { Value::Instance(i) }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self { Value::Function(f) }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Undefined | Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => {
                // integral values print without a trailing `.0`
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 9.007_199_254_740_992e15 {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(xs) | Value::Arguments(xs) => {
                let mut seq = serializer.serialize_seq(Some(xs.len()))?;
                for x in xs {
                    seq.serialize_element(x)?;
                }
                seq.end()
            }
            Value::Object(m) => serialize_map(m, serializer),
            Value::Instance(i) => serialize_map(&i.fields, serializer),
            Value::Function(f) => serializer.serialize_str(&f.name),
        }
    }
}

fn serialize_map<S: Serializer>(m: &Map, serializer: S) -> Result<S::Ok, S::Error> {
    let mut out = serializer.serialize_map(Some(m.len()))?;
    for (k, v) in m {
        out.serialize_entry(k, v)?;
    }
    out.end()
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_objects_keep_key_order() {
        let v = Value::from(json!({"z": 1, "a": [true, null], "m": "s"}));
        let m = v.as_plain_object().unwrap();
        let keys: Vec<&str> = m.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, ["z", "a", "m"]);
        assert_eq!(m["a"], Value::Array(vec![Value::Bool(true), Value::Null]));
        assert_eq!(m["z"], Value::Number(1.0));
    }

    #[test]
    fn instance_of_walks_parent_chain() {
        let base = Class::new("Entity");
        let user = Class::extends("User", &base);
        let other = Class::new("Entity");

        let u = Instance::new(&user).with_field("id", 3);
        assert!(u.is_instance_of(&user));
        assert!(u.is_instance_of(&base));
        // same name, different type
        assert!(!u.is_instance_of(&other));
    }

    #[test]
    fn arguments_are_sequences_but_not_arrays() {
        let args = Value::Arguments(vec![Value::from(1), Value::from("x")]);
        assert_eq!(args.as_sequence().map(|xs| xs.len()), Some(2));
        assert!(args.as_plain_object().is_none());
        assert_ne!(args, Value::Array(vec![Value::from(1), Value::from("x")]));
    }

    #[test]
    fn serializes_to_compact_json() {
        let user = Class::new("User");
        let v = Value::Array(vec![
            Value::Undefined,
            Value::from(2.0),
            Value::from(2.5),
            Value::Instance(Instance::new(&user).with_field("n", "a")),
            Value::Function(Function::new("cb")),
        ]);
        let s = serde_json::to_string(&v).unwrap();
        assert_eq!(s, r#"[null,2,2.5,{"n":"a"},"cb"]"#);
    }
}
