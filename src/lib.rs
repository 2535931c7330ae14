//! Patchflow: source-context extraction and patch splicing
//!
//! Finds classes, functions and indivisible blocks in source files with
//! line-oriented heuristics, hands them downstream as "files to patch", and
//! splices replacement text back into the files by line range.
//!
//! # Architecture
//!
//! Everything located in a file is a [`Position`]: a half-open line range with
//! optional columns and auxiliary `comment` / `body` regions. Strategies
//! ([`StrategyKind`]) produce positions, the resolver merges them under the
//! comment and overlap policies, and steps turn them into JSON records.
//! Writing goes through a single primitive, [`LineEdit`], applied bottom-up
//! so that earlier line numbers stay valid.
//!
//! # Steps
//!
//! - [`ExtractCodeContexts`]: regions of every supported file under a path
//! - [`ExtractCodeMethodForCommentContexts`]: where each function's doc comment goes
//! - [`ModifyCode`]: apply extracted responses to their files
//! - [`ModifyCodeOnce`]: apply one edit given directly
//! - [`ReadFile`]: a file's decoded contents
//!
//! # Example
//!
//! ```no_run
//! use patchflow::{ExtractCodeContexts, Step};
//! use serde_json::json;
//!
//! let inputs = json!({"base_path": "src", "context_grouping": "FUNCTION"});
//! let mut step = ExtractCodeContexts::new(inputs.as_object().unwrap()).unwrap();
//! let output = step.run().unwrap();
//! println!("{}", output["files_to_patch"]);
//! ```

pub mod cache;
pub mod config;
pub mod filter;
pub mod lang;
pub mod position;
pub mod resolve;
pub mod source;
pub mod splice;
pub mod steps;
pub mod strategy;

// Re-exports
pub use config::{load_from_path, load_from_str, ConfigError, IgnorePolicy, InputFormat, Inputs};
pub use lang::{Language, LanguageDescriptor};
pub use position::Position;
pub use resolve::{get_source_code_contexts, ContextOptions};
pub use splice::{handle_indent, replace_code_in_file, LineEdit, SpliceError, SpliceResult};
pub use steps::{
    ExtractCodeContexts, ExtractCodeMethodForCommentContexts, ExtractedResponse, FileToPatch,
    ModifiedCodeFile, ModifyCode, ModifyCodeOnce, ReadFile, Step, StepError, StepStatus,
};
pub use strategy::{ContextStrategy, Grouping, StrategyKind};
