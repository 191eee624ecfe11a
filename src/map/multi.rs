use indexmap::{IndexMap, map::Iter};
use serde::Serialize;

use crate::value::Value;

/// One source's contribution: ordered `(key, value)` pairs, keys may repeat.
pub type Batch = Vec<(String, Value)>;

/// Ordered multi-valued parameter map.
///
/// Keys iterate in first-seen order and every key holds at least one value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MultiValueMap {
    inner: IndexMap<String, Vec<Value>>,
}

impl MultiValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按批次顺序合并，同一个 key 的值依次追加
    pub fn merge<I>(batches: I) -> Self
    where
        I: IntoIterator<Item = Batch>,
    {
        let mut map = Self::new();
        for batch in batches {
            for (key, value) in batch {
                map.add(key, value);
            }
        }
        map
    }

    pub fn add(&mut self, key: impl Into<String>, value: Value) {
        self.inner.entry(key.into()).or_default().push(value);
    }

    /// Appends every value; an empty iterator leaves the map untouched.
    pub fn add_all<I>(&mut self, key: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = Value>,
    {
        let mut values = values.into_iter().peekable();
        if values.peek().is_none() {
            return;
        }
        self.inner.entry(key.into()).or_default().extend(values);
    }

    pub fn get(&self, key: &str) -> Option<&[Value]> {
        self.inner.get(key).map(Vec::as_slice)
    }

    pub fn get_first(&self, key: &str) -> Option<&Value> {
        self.inner.get(key).and_then(|v| v.first())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    pub fn iter(&self) -> Iter<'_, String, Vec<Value>> {
        self.inner.iter()
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut Vec<Value>> {
        self.inner.values_mut()
    }

    pub fn into_inner(self) -> IndexMap<String, Vec<Value>> {
        self.inner
    }
}

impl<'a> IntoIterator for &'a MultiValueMap {
    type Item = (&'a String, &'a Vec<Value>);
    type IntoIter = Iter<'a, String, Vec<Value>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for MultiValueMap {
    type Item = (String, Vec<Value>);
    type IntoIter = indexmap::map::IntoIter<String, Vec<Value>>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(k: &str, v: &str) -> (String, Value) {
        (k.to_string(), Value::from(v))
    }

    #[test]
    fn test_merge_first_seen_key_order() {
        let map = MultiValueMap::merge(vec![
            vec![pair("id", "7")],
            vec![pair("tag", "a"), pair("id", "8"), pair("q", "x")],
        ]);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["id", "tag", "q"]);
        assert_eq!(map.get("id").unwrap(), &[Value::from("7"), Value::from("8")]);
    }

    #[test]
    fn test_merge_accumulates_across_batches() {
        let map = MultiValueMap::merge(vec![
            vec![pair("k", "a")],
            vec![pair("k", "b"), pair("k", "c")],
        ]);
        assert_eq!(
            map.get("k").unwrap(),
            &[Value::from("a"), Value::from("b"), Value::from("c")]
        );
    }

    #[test]
    fn test_merge_empty() {
        assert!(MultiValueMap::merge(Vec::<Batch>::new()).is_empty());
        assert!(MultiValueMap::merge(vec![vec![], vec![]]).is_empty());
    }

    #[test]
    fn test_add_all_empty_does_not_create_key() {
        let mut map = MultiValueMap::new();
        map.add_all("k", Vec::new());
        assert!(!map.contains_key("k"));
        map.add_all("k", vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(map.get_first("k"), Some(&Value::Int(1)));
    }
}
