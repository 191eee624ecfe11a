use thiserror::Error;

use crate::http::body::BodyFormat;

/// Errors surfaced while collecting or resolving request parameters.
#[derive(Debug, Error)]
pub enum RequestMapError {
    /// The router never attached path variables to the request.
    #[error("path variables missing: request was not routed")]
    MissingPathVariables,
    /// A route pattern compiled into an invalid regex.
    #[error("invalid route pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("malformed request: {0}")]
    MalformedRequest(String),
    #[error("multipart error: {0}")]
    Multipart(String),
    /// The registered decoder rejected the body.
    #[error("{format} body decode failed: {message}")]
    BodyDecode { format: BodyFormat, message: String },
    /// The body decoded fine but its top level is not a key/value document.
    #[error("{0} body is not an object")]
    BodyNotObject(BodyFormat),
    /// No decoder is registered for the declared body format.
    #[error("no decoder registered for {0} bodies")]
    UnsupportedBody(BodyFormat),
    #[error("value nesting exceeds depth limit {limit}")]
    TooDeep { limit: usize },
}

pub type Result<T> = std::result::Result<T, RequestMapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_decode_format() {
        let err = RequestMapError::BodyDecode {
            format: BodyFormat::Json,
            message: "EOF while parsing".into(),
        };
        assert_eq!(err.to_string(), "application/json body decode failed: EOF while parsing");
    }

    #[test]
    fn test_unsupported_body_format() {
        let err = RequestMapError::UnsupportedBody(BodyFormat::Xml);
        assert_eq!(err.to_string(), "no decoder registered for application/xml bodies");
    }

    #[test]
    fn test_regex_error_from() {
        let re_err = regex::Regex::new("(").unwrap_err();
        let err: RequestMapError = re_err.into();
        assert!(err.to_string().starts_with("invalid route pattern"));
    }
}
