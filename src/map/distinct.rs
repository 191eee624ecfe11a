use crate::{
    map::multi::MultiValueMap,
    value::{Value, ValueSet},
};

/// Removes duplicate sequence elements inside `value` when `allow` is set.
pub fn distinct(value: &mut Value, allow: bool) {
    if allow {
        value.distinct();
    }
}

/// Keeps the first occurrence of each element, after deduplicating the
/// element's own interior.
fn distinct_items<I>(items: I) -> Vec<Value>
where
    I: IntoIterator<Item = Value>,
{
    let mut answer: Vec<Value> = Vec::new();
    for mut element in items {
        element.distinct();
        if !answer.contains(&element) {
            answer.push(element);
        }
    }
    answer
}

impl Value {
    /// Rebuilds every list and array inside this value without duplicates,
    /// keeping first-seen order. Map keys are never touched; only their
    /// values are walked.
    pub fn distinct(&mut self) {
        match self {
            Value::List(items) => *items = distinct_items(std::mem::take(items)),
            Value::Array(items) => {
                let taken = std::mem::take(items);
                *items = distinct_items(taken.into_vec()).into_boxed_slice();
            }
            Value::Map(m) => m.values_mut().for_each(Value::distinct),
            Value::Set(set) => {
                // 内部去重后可能出现相等元素，重新保证集合唯一
                *set = set
                    .take()
                    .into_iter()
                    .map(|mut v| {
                        v.distinct();
                        v
                    })
                    .collect::<ValueSet>();
            }
            _ => {}
        }
    }
}

impl MultiValueMap {
    /// Deduplicates within each key's value list, never across keys.
    pub fn distinct(&mut self) {
        for values in self.values_mut() {
            *values = distinct_items(std::mem::take(values));
        }
    }
}
