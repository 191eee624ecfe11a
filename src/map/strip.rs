use crate::{
    map::multi::MultiValueMap,
    value::{Value, ValueSet},
};

/// Trims every string reachable from `value` when `allow` is set.
pub fn strip(value: &mut Value, allow: bool) {
    if allow {
        value.strip();
    }
}

fn is_strippable(s: &str) -> bool {
    s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace)
}

fn strip_text(s: &mut String) {
    // 无需修剪时不重新分配
    if is_strippable(s) {
        *s = s.trim().to_owned();
    }
}

impl Value {
    /// Removes leading and trailing whitespace from every string inside this
    /// value, in place. Containers keep their kind and element order.
    ///
    /// A set whose elements become equal after trimming keeps only the first.
    pub fn strip(&mut self) {
        match self {
            Value::Text(s) => strip_text(s),
            Value::Map(m) => m.values_mut().for_each(Value::strip),
            Value::List(items) => items.iter_mut().for_each(Value::strip),
            Value::Array(items) => items.iter_mut().for_each(Value::strip),
            Value::Set(set) => strip_set(set),
            _ => {}
        }
    }
}

fn strip_set(set: &mut ValueSet) {
    let mut stripped = ValueSet::new();
    for mut element in set.take() {
        element.strip();
        stripped.insert(element);
    }
    *set = stripped;
}

impl MultiValueMap {
    pub fn strip(&mut self) {
        self.values_mut().flatten().for_each(Value::strip);
    }
}
