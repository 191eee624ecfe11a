use bytes::Bytes;
use indexmap::IndexMap;

use crate::{
    error::Result,
    http::{params::Params, protocol::content_type::ContentType},
};

// 常规的HTTP请求元数据，参数解析的全部输入
#[derive(Debug, Clone)]
pub struct HttpMetadata {
    pub method: String,
    /// Request target, query included.
    pub path: String,
    /// Header names are stored lowercased.
    pub headers: IndexMap<String, String>,
    pub content_type: ContentType,
    pub length: usize,
    pub params: Option<Params>, // 由路由匹配后填充
    pub body: Bytes,
}

impl Default for HttpMetadata {
    fn default() -> Self {
        Self {
            method: "GET".to_string(),
            path: "/".to_string(),
            headers: IndexMap::new(),
            content_type: ContentType::default(),
            length: 0,
            params: None,
            body: Bytes::new(),
        }
    }
}

impl HttpMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Sets the body together with its declared type and length.
    pub fn with_body(mut self, content_type: &str, body: impl Into<Bytes>) -> Self {
        let body = body.into();
        self.content_type = ContentType::parse(content_type);
        self.headers.insert("content-type".to_string(), content_type.to_string());
        self.length = body.len();
        self.body = body;
        self
    }

    /// Matches the request path against a route pattern and attaches the
    /// resulting [`Params`]. A non-matching pattern leaves path variables unset.
    pub fn route(&mut self, pattern: &str) -> Result<()> {
        self.params = Some(Params::new(self.path.clone(), Some(pattern))?);
        Ok(())
    }
}
