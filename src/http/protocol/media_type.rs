/// Top-level media type
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MediaType {
    Text,
    Application,
    Multipart,
    Image,
    Other,
}

/// Subtypes the parameter sources care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubMediaType {
    Json,       // application/json
    Xml,        // application/xml
    UrlEncoded, // application/x-www-form-urlencoded
    FormData,   // multipart/form-data
    Mixed,      // multipart/mixed
    Plain,      // text/plain
    Other(String),
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Text => "text",
            MediaType::Application => "application",
            MediaType::Multipart => "multipart",
            MediaType::Image => "image",
            MediaType::Other => "unknown",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "text" => MediaType::Text,
            "application" => MediaType::Application,
            "multipart" => MediaType::Multipart,
            "image" => MediaType::Image,
            _ => MediaType::Other,
        }
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self, MediaType::Multipart)
    }
}

impl SubMediaType {
    pub fn as_str(&self) -> &str {
        match self {
            SubMediaType::Json => "json",
            SubMediaType::Xml => "xml",
            SubMediaType::UrlEncoded => "x-www-form-urlencoded",
            SubMediaType::FormData => "form-data",
            SubMediaType::Mixed => "mixed",
            SubMediaType::Plain => "plain",
            SubMediaType::Other(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "json" => SubMediaType::Json,
            "xml" => SubMediaType::Xml,
            "x-www-form-urlencoded" => SubMediaType::UrlEncoded,
            "form-data" => SubMediaType::FormData,
            "mixed" => SubMediaType::Mixed,
            "plain" => SubMediaType::Plain,
            other => SubMediaType::Other(other.to_string()),
        }
    }
}
