use bytes::Bytes;
use indexmap::IndexMap;

use crate::{
    error::{RequestMapError, Result},
    http::{meta::HttpMetadata, protocol::content_type::ContentType},
};

pub const MAX_HEADER_BYTES: usize = 64 * 1024;

fn malformed(msg: impl Into<String>) -> RequestMapError {
    RequestMapError::MalformedRequest(msg.into())
}

/// Parser for a fully buffered HTTP/1.x request.
pub struct Request;

impl Request {
    pub fn parse(raw: &[u8]) -> Result<HttpMetadata> {
        let (head, body) = split_head(raw).ok_or_else(|| malformed("missing header terminator"))?;
        if head.len() > MAX_HEADER_BYTES {
            return Err(malformed("header section too large"));
        }
        let head = std::str::from_utf8(head).map_err(|_| malformed("request head not UTF-8"))?;
        let mut lines = head.lines();

        // 1. 请求行 (Method, Path, Version)
        let line = lines.next().ok_or_else(|| malformed("missing request line"))?;
        let mut parts = line.split_whitespace();
        let method = parts.next().ok_or_else(|| malformed("missing method"))?;
        let path = parts.next().ok_or_else(|| malformed("missing path"))?;
        let version = parts.next().ok_or_else(|| malformed("missing version"))?;
        if !version.starts_with("HTTP/") {
            return Err(malformed(format!("unknown HTTP version {}", version)));
        }

        // 2. Headers
        let mut headers = IndexMap::new();
        for line in lines {
            if line.is_empty() {
                continue;
            }
            let (k, v) = line
                .split_once(':')
                .ok_or_else(|| malformed(format!("invalid header line {:?}", line)))?;
            headers.insert(k.trim().to_ascii_lowercase(), v.trim().to_string());
        }

        // 3. Content-Length / Content-Type
        let length = match headers.get("content-length") {
            Some(v) => v
                .parse::<usize>()
                .map_err(|_| malformed(format!("invalid content-length {:?}", v)))?,
            None => body.len(),
        };
        let content_type = headers
            .get("content-type")
            .map(|s| ContentType::parse(s))
            .unwrap_or_else(|| ContentType::parse(""));

        let body = Bytes::copy_from_slice(&body[..length.min(body.len())]);

        Ok(HttpMetadata {
            method: method.to_string(),
            path: path.to_string(),
            headers,
            content_type,
            length,
            params: None,
            body,
        })
    }
}

fn split_head(raw: &[u8]) -> Option<(&[u8], &[u8])> {
    let crlf = raw.windows(4).position(|w| w == b"\r\n\r\n").map(|p| (p, 4));
    let lf = raw.windows(2).position(|w| w == b"\n\n").map(|p| (p, 2));
    // 取最先出现的终止符，body 里的 CRLF 不影响 LF 头部
    let (pos, len) = match (crlf, lf) {
        (Some(a), Some(b)) => a.min(b),
        (a, b) => a.or(b)?,
    };
    Some((&raw[..pos], &raw[pos + len..]))
}
