use bytes::Bytes;
use indexmap::IndexMap;
use serde::{
    Serialize, Serializer,
    ser::{SerializeMap, SerializeSeq},
};

/// A single request parameter value.
///
/// Containers own their children, so a value tree can never reference itself.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// 上传的文件句柄
    Upload(Upload),
    Map(IndexMap<String, Value>),
    /// Ordered sequence, duplicates allowed.
    List(Vec<Value>),
    Set(ValueSet),
    /// Fixed-size array. Keeps its kind through every pass.
    Array(Box<[Value]>),
}

/// One uploaded file part of a multipart request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub name: String,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl Upload {
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            filename: None,
            content_type: None,
            data: data.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Insertion-ordered collection of unique values.
///
/// `Value` holds floats, so membership is decided by `PartialEq` rather than
/// hashing.
#[derive(Debug, Clone, Default)]
pub struct ValueSet(Vec<Value>);

impl ValueSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when an equal element is already present.
    pub fn insert(&mut self, value: Value) -> bool {
        if self.0.contains(&value) {
            return false;
        }
        self.0.push(value);
        true
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.0.contains(value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    pub(crate) fn take(&mut self) -> Vec<Value> {
        std::mem::take(&mut self.0)
    }
}

impl PartialEq for ValueSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|v| other.contains(v))
    }
}

impl FromIterator<Value> for ValueSet {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let mut set = ValueSet::new();
        for v in iter {
            set.insert(v);
        }
        set
    }
}

impl IntoIterator for ValueSet {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Container nesting depth: scalars are 0, `[1]` is 1, `[[1]]` is 2.
    pub fn depth(&self) -> usize {
        let inner = match self {
            Value::Map(m) => m.values().map(Value::depth).max(),
            Value::List(items) => items.iter().map(Value::depth).max(),
            Value::Array(items) => items.iter().map(Value::depth).max(),
            Value::Set(set) => set.iter().map(Value::depth).max(),
            _ => return 0,
        };
        inner.unwrap_or(0) + 1
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<Upload> for Value {
    fn from(u: Upload) -> Self {
        Value::Upload(u)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<ValueSet> for Value {
    fn from(set: ValueSet) -> Self {
        Value::Set(set)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(map: IndexMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => {
                Value::Map(obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(n) => serializer.serialize_f64(*n),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Upload(u) => u.serialize(serializer),
            Value::Map(m) => {
                let mut map = serializer.serialize_map(Some(m.len()))?;
                for (k, v) in m {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            Value::List(items) => serialize_items(items.iter(), items.len(), serializer),
            Value::Array(items) => serialize_items(items.iter(), items.len(), serializer),
            Value::Set(set) => serialize_items(set.iter(), set.len(), serializer),
        }
    }
}

fn serialize_items<'a, S, I>(items: I, len: usize, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    I: Iterator<Item = &'a Value>,
{
    let mut seq = serializer.serialize_seq(Some(len))?;
    for item in items {
        seq.serialize_element(item)?;
    }
    seq.end()
}

// 文件内容不输出，只给出元信息
impl Serialize for Upload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("filename", &self.filename)?;
        map.serialize_entry("content_type", &self.content_type)?;
        map.serialize_entry("size", &self.size())?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_keeps_order() {
        let v = Value::from(json!({"b": 1, "a": [true, null, "x"]}));
        let Value::Map(m) = v else { panic!("expected map") };
        assert_eq!(m.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(
            m["a"],
            Value::List(vec![Value::Bool(true), Value::Null, Value::from("x")])
        );
    }

    #[test]
    fn test_set_insert_unique() {
        let mut set = ValueSet::new();
        assert!(set.insert("a".into()));
        assert!(!set.insert("a".into()));
        assert!(set.insert("b".into()));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_set_eq_ignores_order() {
        let a: ValueSet = vec![Value::from("x"), Value::from("y")].into_iter().collect();
        let b: ValueSet = vec![Value::from("y"), Value::from("x")].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_depth() {
        assert_eq!(Value::from("x").depth(), 0);
        assert_eq!(Value::List(vec![]).depth(), 1);
        let nested = Value::from(json!({"a": [[1]]}));
        assert_eq!(nested.depth(), 3);
    }

    #[test]
    fn test_serialize_upload() {
        let mut up = Upload::new("file", &b"hello"[..]);
        up.filename = Some("a.txt".into());
        let out = serde_json::to_value(Value::Upload(up)).unwrap();
        assert_eq!(out, json!({"filename": "a.txt", "content_type": null, "size": 5}));
    }
}
