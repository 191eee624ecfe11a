use std::fmt;

use crate::http::protocol::media_type::{MediaType, SubMediaType};

/// ContentType 结构
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    pub top_level: MediaType,
    pub sub_type: SubMediaType,
    pub parameters: Vec<(String, String)>,
}

impl ContentType {
    pub fn parse(s: &str) -> Self {
        let mut parts = s.split(';');
        let type_part = parts.next().unwrap_or("").trim();

        let (top, sub) = type_part.split_once('/').unwrap_or((type_part, ""));

        ContentType {
            top_level: MediaType::parse(top.trim()),
            sub_type: SubMediaType::parse(sub.trim()),
            parameters: parts
                .filter(|p| !p.trim().is_empty())
                .map(|p| {
                    let (k, v) = p.trim().split_once('=').unwrap_or((p.trim(), ""));
                    (k.trim().to_string(), v.trim().trim_matches('"').to_string())
                })
                .collect(),
        }
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn boundary(&self) -> Option<&str> {
        if self.top_level.is_multipart() {
            self.parameter("boundary").filter(|b| !b.is_empty())
        } else {
            None
        }
    }

    pub fn is_multipart(&self) -> bool {
        self.top_level.is_multipart()
    }

    pub fn is_form_urlencoded(&self) -> bool {
        self.top_level == MediaType::Application && self.sub_type == SubMediaType::UrlEncoded
    }

    pub fn is_json(&self) -> bool {
        self.top_level == MediaType::Application && self.sub_type == SubMediaType::Json
    }

    pub fn is_xml(&self) -> bool {
        self.top_level == MediaType::Application && self.sub_type == SubMediaType::Xml
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.top_level.as_str(), self.sub_type.as_str())?;
        for (k, v) in &self.parameters {
            write!(f, "; {}={}", k, v)?;
        }
        Ok(())
    }
}

impl Default for ContentType {
    fn default() -> Self {
        Self {
            top_level: MediaType::Text,
            sub_type: SubMediaType::Plain,
            parameters: Vec::new(),
        }
    }
}
