//! Request extractors that reject with [`handler::Error`].
//!
//! [`handler::Error`]: crate::handler::Error

pub mod enhanced_json;
pub mod enhanced_path;
pub mod validated_json;

pub use self::enhanced_json::Json;
pub use self::enhanced_path::Path;
pub use self::validated_json::ValidateJson;
