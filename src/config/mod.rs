pub mod loader;
pub mod schema;

pub use loader::{load_from_path, load_from_str, ConfigError, InputFormat, Inputs};
pub use schema::{
    ExtractInputs, IgnorePolicy, ModifyOnceInputs, ReadFileInputs, ValidationError,
    ValidationIssue,
};
