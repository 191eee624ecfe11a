pub mod content_type;
pub mod media_type;
