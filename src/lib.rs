pub mod config;
pub mod error;
pub mod http;
pub mod map;
pub mod value;

pub use config::RequestMapConfig;
pub use error::{RequestMapError, Result};
pub use http::{meta::HttpMetadata, resolver::RequestMapResolver};
pub use map::{MultiValueMap, Param, RequestMap};
pub use value::{Upload, Value, ValueSet};
