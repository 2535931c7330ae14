use crate::config::ValidationError;
use crate::source::SourceError;
use crate::splice::SpliceError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StepError {
    #[error("{step}: missing required data: {}", keys.join(", "))]
    MissingKeys {
        step: &'static str,
        keys: Vec<String>,
    },

    #[error("{step}: invalid inputs: {source}")]
    InvalidInputs {
        step: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{step}: {source}")]
    Validation {
        step: &'static str,
        #[source]
        source: ValidationError,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is binary or uses an unsupported encoding")]
    Decode { path: PathBuf },

    #[error("failed to serialize step output: {0}")]
    Output(#[source] serde_json::Error),
}

impl From<SpliceError> for StepError {
    fn from(err: SpliceError) -> Self {
        match err {
            SpliceError::Read { path, source } | SpliceError::Write { path, source } => {
                StepError::Io { path, source }
            }
            SpliceError::Undecodable { path } => StepError::Decode { path },
        }
    }
}

impl From<SourceError> for StepError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Io { path, source } => StepError::Io { path, source },
            SourceError::Undecodable { path } => StepError::Decode { path },
        }
    }
}
