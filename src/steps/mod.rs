//! Pipeline steps.
//!
//! Every step follows the same contract: it is built from a JSON object of
//! inputs, fails construction when required keys are missing, and `run`
//! produces a JSON object of outputs. A step that has nothing to do reports
//! [`StepStatus::Skipped`] and returns an empty result.

pub mod comment_contexts;
pub mod errors;
pub mod extract;
pub mod modify;
pub mod modify_once;
pub mod read_file;
pub mod records;

pub use comment_contexts::ExtractCodeMethodForCommentContexts;
pub use errors::StepError;
pub use extract::ExtractCodeContexts;
pub use modify::ModifyCode;
pub use modify_once::ModifyCodeOnce;
pub use read_file::ReadFile;
pub use records::{ExtractedResponse, FileToPatch, ModifiedCodeFile};

use crate::config::Inputs;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Outcome of the last `run`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StepStatus {
    #[default]
    Completed,
    Skipped {
        reason: String,
    },
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepStatus::Completed => write!(f, "completed"),
            StepStatus::Skipped { reason } => write!(f, "skipped: {reason}"),
        }
    }
}

pub trait Step {
    /// Name used in errors and logs.
    const NAME: &'static str;

    fn run(&mut self) -> Result<Map<String, Value>, StepError>;

    fn status(&self) -> &StepStatus;
}

/// Fail with [`StepError::MissingKeys`] unless every key is present.
pub(crate) fn check_required(
    step: &'static str,
    inputs: &Inputs,
    required: &[&str],
) -> Result<(), StepError> {
    let keys: Vec<String> = required
        .iter()
        .filter(|key| !inputs.contains_key(**key))
        .map(|key| key.to_string())
        .collect();
    if keys.is_empty() {
        Ok(())
    } else {
        Err(StepError::MissingKeys { step, keys })
    }
}

/// Deserialize step inputs, ignoring keys the step does not know.
pub(crate) fn parse_inputs<T: DeserializeOwned>(
    step: &'static str,
    inputs: &Inputs,
) -> Result<T, StepError> {
    serde_json::from_value(Value::Object(inputs.clone()))
        .map_err(|source| StepError::InvalidInputs { step, source })
}

/// Wrap a serializable value as a single-key output object.
pub(crate) fn output<T: Serialize>(key: &str, value: &T) -> Result<Map<String, Value>, StepError> {
    let value = serde_json::to_value(value).map_err(StepError::Output)?;
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Ok(map)
}
