use serde::{Deserialize, Serialize};

/// Per-call switches for the parameter pipeline.
///
/// Deserializable so it can sit inside a larger application config; every
/// missing field falls back to [`Default`].
///
/// ```
/// use reqmap::config::RequestMapConfig;
///
/// let cfg: RequestMapConfig = serde_json::from_str(r#"{"allow_distinct": false}"#).unwrap();
/// assert!(cfg.allow_strip);
/// assert!(!cfg.allow_distinct);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestMapConfig {
    /// Trim leading/trailing whitespace from every reachable string.
    #[serde(alias = "value")]
    pub allow_strip: bool,
    /// Drop repeated elements from value lists and nested sequences.
    pub allow_distinct: bool,
    /// Return the multi-valued map instead of collapsing single values.
    pub multi_value: bool,
    /// Deepest container nesting accepted before the passes run.
    pub max_depth: usize,
}

pub const DEFAULT_MAX_DEPTH: usize = 64;

impl Default for RequestMapConfig {
    fn default() -> Self {
        Self {
            allow_strip: true,
            allow_distinct: true,
            multi_value: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl RequestMapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow_strip(mut self, allow: bool) -> Self {
        self.allow_strip = allow;
        self
    }

    pub fn allow_distinct(mut self, allow: bool) -> Self {
        self.allow_distinct = allow;
        self
    }

    pub fn multi_value(mut self, multi: bool) -> Self {
        self.multi_value = multi;
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}
