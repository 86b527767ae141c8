pub mod extractor;
pub mod file_magic;
pub mod parameter_error_handler;
pub mod prerequisite_graph;
pub mod random_code;
pub mod sql;
pub mod validate;

pub use extractor::{
    SafeAttributeName, SafeFileToken, SafeIDI64, SafePrerequisiteIdI64, SafeSettingKey,
};
pub use file_magic::validate_magic_bytes;
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
pub use sql::{contains_pattern, escape_like_pattern};
