pub mod body;
pub mod meta;
pub mod multipart;
pub mod params;
pub mod protocol;
pub mod req;
pub mod resolver;
pub mod sources;
pub mod xml;
