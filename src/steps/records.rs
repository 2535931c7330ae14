//! Records exchanged between steps.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One region handed to downstream steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileToPatch {
    pub uri: String,
    /// Absent range means the whole file
    #[serde(default)]
    pub start_line: Option<usize>,
    #[serde(default)]
    pub end_line: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_format: Option<String>,
    /// Keys added by other steps, carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FileToPatch {
    pub fn new(uri: impl Into<String>, start_line: usize, end_line: usize) -> Self {
        Self {
            uri: uri.into(),
            start_line: Some(start_line),
            end_line: Some(end_line),
            affected_code: None,
            comment_format: None,
            extra: Map::new(),
        }
    }

    pub fn with_affected_code(mut self, code: impl Into<String>) -> Self {
        self.affected_code = Some(code.into());
        self
    }

    pub fn with_comment_format(mut self, format: impl Into<String>) -> Self {
        self.comment_format = Some(format.into());
        self
    }
}

/// Upstream answer paired by index with a [`FileToPatch`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtractedResponse {
    #[serde(default)]
    pub patch: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ExtractedResponse {
    pub fn with_patch(patch: impl Into<String>) -> Self {
        Self {
            patch: Some(patch.into()),
            extra: Map::new(),
        }
    }

    /// Every key of the response, `patch` included.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = self.extra.clone();
        map.insert(
            "patch".to_string(),
            self.patch.clone().map_or(Value::Null, Value::String),
        );
        map
    }
}

/// One applied edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifiedCodeFile {
    pub path: String,
    pub start_line: Option<usize>,
    pub end_line: Option<usize>,
    /// Keys of the paired response
    #[serde(flatten)]
    pub response: Map<String, Value>,
}

impl ModifiedCodeFile {
    pub fn new(target: &FileToPatch, response: &ExtractedResponse) -> Self {
        let mut response = response.to_map();
        for reserved in ["path", "start_line", "end_line"] {
            response.remove(reserved);
        }
        Self {
            path: target.uri.clone(),
            start_line: target.start_line,
            end_line: target.end_line,
            response,
        }
    }
}
