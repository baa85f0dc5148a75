mod loader;
mod validate;

pub use loader::{load_content_from_json, parse_content, LoadError};
pub use validate::ValidationError;
