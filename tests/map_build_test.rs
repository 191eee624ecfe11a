#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use reqmap::{
        MultiValueMap, Param, RequestMap, RequestMapConfig, Value,
        map::{Batch, build},
    };

    fn batch(pairs: &[(&str, &str)]) -> Batch {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::from(*v)))
            .collect()
    }

    fn texts(items: &[&str]) -> Vec<Value> {
        items.iter().map(|s| Value::from(*s)).collect()
    }

    #[test]
    fn test_key_order_is_first_seen() {
        let map = MultiValueMap::merge(vec![
            batch(&[("z", "1")]),
            batch(&[("a", "2"), ("z", "3")]),
            batch(&[("m", "4")]),
        ]);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["z", "a", "m"]);
    }

    #[test]
    fn test_collapsed_end_to_end() {
        let path = batch(&[("id", "7")]);
        let query = batch(&[("tag", "a "), ("tag", " a"), ("tag", "b")]);
        let map = build(vec![path, query, vec![], vec![]], &RequestMapConfig::default()).unwrap();

        let RequestMap::Collapsed(m) = map else { panic!("expected collapsed map") };
        assert_eq!(m.keys().collect::<Vec<_>>(), vec!["id", "tag"]);
        assert_eq!(m["id"], Param::Single(Value::from("7")));
        assert_eq!(m["tag"], Param::Multi(texts(&["a", "b"])));
    }

    #[test]
    fn test_no_distinct_keeps_duplicates() {
        let cfg = RequestMapConfig::default().allow_distinct(false);
        let map = build(vec![batch(&[("name", "x"), ("name", "x")])], &cfg).unwrap();
        assert_eq!(map.values("name").unwrap(), texts(&["x", "x"]).as_slice());
    }

    #[test]
    fn test_no_strip_keeps_whitespace_even_with_distinct() {
        let cfg = RequestMapConfig::default().allow_strip(false);
        let map = build(vec![batch(&[("t", " a"), ("t", "a "), ("t", " a")])], &cfg).unwrap();
        assert_eq!(map.values("t").unwrap(), texts(&[" a", "a "]).as_slice());
    }

    #[test]
    fn test_both_disabled_is_identity() {
        let cfg = RequestMapConfig::default()
            .allow_strip(false)
            .allow_distinct(false)
            .multi_value(true);
        let input = batch(&[("k", " v "), ("k", " v ")]);
        let RequestMap::Multi(m) = build(vec![input], &cfg).unwrap() else {
            panic!("expected multi map")
        };
        assert_eq!(m.get("k").unwrap(), texts(&[" v ", " v "]).as_slice());
    }

    #[test]
    fn test_multi_value_keeps_singletons_as_lists() {
        let cfg = RequestMapConfig::default().multi_value(true);
        let map = build(vec![batch(&[("id", "7")])], &cfg).unwrap();
        let RequestMap::Multi(m) = map else { panic!("expected multi map") };
        assert_eq!(m.get("id").unwrap(), texts(&["7"]).as_slice());
    }

    #[test]
    fn test_strip_runs_before_distinct() {
        // " x" 与 "x" 修剪后相等，应被去重
        let map = build(
            vec![batch(&[("k", " x"), ("k", "x")])],
            &RequestMapConfig::default(),
        )
        .unwrap();
        let RequestMap::Collapsed(m) = map else { panic!("expected collapsed map") };
        assert_eq!(m["k"], Param::Single(Value::from("x")));
    }

    #[test]
    fn test_nested_body_value_normalized() {
        let body = Value::from(serde_json::json!({
            "names": [" ann ", "bob", "ann"],
            "inner": {"note": " hi "}
        }));
        let map = build(vec![vec![("doc".to_string(), body)]], &RequestMapConfig::default()).unwrap();
        let expected = Value::from(serde_json::json!({
            "names": ["ann", "bob"],
            "inner": {"note": "hi"}
        }));
        assert_eq!(map.values("doc").unwrap(), &[expected]);
    }

    #[test]
    fn test_passes_are_idempotent() {
        let mut v = Value::List(texts(&[" a", "b", "a ", "c", "b"]));
        v.strip();
        v.distinct();
        let once = v.clone();
        v.strip();
        v.distinct();
        assert_eq!(v, once);
        assert_eq!(v, Value::List(texts(&["a", "b", "c"])));
    }

    #[test]
    fn test_serialize_collapsed() {
        let map = build(
            vec![batch(&[("id", "7"), ("tag", "a"), ("tag", "b")])],
            &RequestMapConfig::default(),
        )
        .unwrap();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"id":"7","tag":["a","b"]}"#);
    }
}
