use std::{fmt, sync::Arc};

use indexmap::IndexMap;

use crate::{
    error::{RequestMapError, Result},
    http::{meta::HttpMetadata, protocol::content_type::ContentType, xml::XmlBodyDecoder},
    map::Batch,
    value::Value,
};

/// Structured body formats whose top-level fields become parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyFormat {
    Json,
    Xml,
}

impl BodyFormat {
    pub fn detect(content_type: &ContentType) -> Option<Self> {
        if content_type.is_json() {
            Some(BodyFormat::Json)
        } else if content_type.is_xml() {
            Some(BodyFormat::Xml)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BodyFormat::Json => "application/json",
            BodyFormat::Xml => "application/xml",
        }
    }
}

impl fmt::Display for BodyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turns a raw request body into ordered top-level fields.
///
/// `Ok(None)` means the document was an explicit null and contributes nothing.
pub trait BodyDecoder: Send + Sync {
    fn decode(&self, body: &[u8]) -> Result<Option<IndexMap<String, Value>>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBodyDecoder;

impl BodyDecoder for JsonBodyDecoder {
    fn decode(&self, body: &[u8]) -> Result<Option<IndexMap<String, Value>>> {
        let json: serde_json::Value =
            serde_json::from_slice(body).map_err(|e| RequestMapError::BodyDecode {
                format: BodyFormat::Json,
                message: e.to_string(),
            })?;
        match Value::from(json) {
            Value::Null => Ok(None),
            Value::Map(m) => Ok(Some(m)),
            _ => Err(RequestMapError::BodyNotObject(BodyFormat::Json)),
        }
    }
}

/// Decoders keyed by format, injected into the resolver at construction.
#[derive(Clone)]
pub struct BodyDecoders {
    decoders: IndexMap<BodyFormat, Arc<dyn BodyDecoder>>,
}

impl fmt::Debug for BodyDecoders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.decoders.keys()).finish()
    }
}

impl Default for BodyDecoders {
    /// JSON and XML.
    fn default() -> Self {
        Self::empty()
            .with(BodyFormat::Json, JsonBodyDecoder)
            .with(BodyFormat::Xml, XmlBodyDecoder)
    }
}

impl BodyDecoders {
    pub fn empty() -> Self {
        Self {
            decoders: IndexMap::new(),
        }
    }

    pub fn with<D: BodyDecoder + 'static>(mut self, format: BodyFormat, decoder: D) -> Self {
        self.decoders.insert(format, Arc::new(decoder));
        self
    }

    pub fn supports(&self, format: BodyFormat) -> bool {
        self.decoders.contains_key(&format)
    }

    /// Body batch of a request: empty unless the body is non-empty and
    /// declared as JSON or XML.
    pub fn decode(&self, meta: &HttpMetadata) -> Result<Batch> {
        if meta.length == 0 {
            return Ok(Vec::new());
        }
        let Some(format) = BodyFormat::detect(&meta.content_type) else {
            return Ok(Vec::new());
        };
        let decoder = self
            .decoders
            .get(&format)
            .ok_or(RequestMapError::UnsupportedBody(format))?;
        Ok(decoder
            .decode(&meta.body)?
            .map(|fields| fields.into_iter().collect())
            .unwrap_or_default())
    }
}
