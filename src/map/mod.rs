pub mod builder;
pub mod distinct;
pub mod multi;
pub mod strip;

pub use builder::{Param, RequestMap, build, collapse};
pub use multi::{Batch, MultiValueMap};
