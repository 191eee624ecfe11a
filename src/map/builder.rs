use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, trace};

use crate::{
    config::RequestMapConfig,
    error::{RequestMapError, Result},
    map::multi::{Batch, MultiValueMap},
    value::Value,
};

/// A key's value after collapsing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Param {
    Single(Value),
    Multi(Vec<Value>),
}

impl Param {
    pub fn as_single(&self) -> Option<&Value> {
        match self {
            Param::Single(v) => Some(v),
            Param::Multi(_) => None,
        }
    }

    pub fn values(&self) -> &[Value] {
        match self {
            Param::Single(v) => std::slice::from_ref(v),
            Param::Multi(vs) => vs.as_slice(),
        }
    }
}

/// Final parameter map handed to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RequestMap {
    Multi(MultiValueMap),
    Collapsed(IndexMap<String, Param>),
}

impl RequestMap {
    pub fn len(&self) -> usize {
        match self {
            RequestMap::Multi(m) => m.len(),
            RequestMap::Collapsed(m) => m.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All values of `key`, whichever shape the map has.
    pub fn values(&self, key: &str) -> Option<&[Value]> {
        match self {
            RequestMap::Multi(m) => m.get(key),
            RequestMap::Collapsed(m) => m.get(key).map(Param::values),
        }
    }
}

/// 一个值折叠成标量，多个值保留列表
pub fn collapse(map: MultiValueMap) -> IndexMap<String, Param> {
    map.into_iter()
        .map(|(key, mut values)| {
            let param = if values.len() == 1 {
                Param::Single(values.remove(0))
            } else {
                Param::Multi(values)
            };
            (key, param)
        })
        .collect()
}

/// Runs the pipeline: merge, strip, distinct, then pick the result shape.
pub fn build<I>(batches: I, config: &RequestMapConfig) -> Result<RequestMap>
where
    I: IntoIterator<Item = Batch>,
{
    let mut map = MultiValueMap::merge(batches);
    trace!(keys = map.len(), "merged parameter batches");

    check_depth(&map, config.max_depth)?;

    if config.allow_strip {
        map.strip();
    }
    if config.allow_distinct {
        map.distinct();
    }

    debug!(
        keys = map.len(),
        strip = config.allow_strip,
        distinct = config.allow_distinct,
        multi = config.multi_value,
        "parameter map built"
    );

    Ok(if config.multi_value {
        RequestMap::Multi(map)
    } else {
        RequestMap::Collapsed(collapse(map))
    })
}

fn check_depth(map: &MultiValueMap, limit: usize) -> Result<()> {
    let deepest = map
        .iter()
        .flat_map(|(_, values)| values.iter())
        .map(Value::depth)
        .max()
        .unwrap_or(0);
    if deepest > limit {
        return Err(RequestMapError::TooDeep { limit });
    }
    Ok(())
}
