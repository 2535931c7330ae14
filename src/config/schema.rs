use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// Directory names never descended into.
pub const IGNORE_DIRS: &[&str] = &[".git", ".idea", "__pycache__", ".mvn", "node_modules"];

/// Build artifacts matched by extension.
pub const IGNORE_EXT_GLOBS: &[&str] = &[
    "*.pyc",
    "*.pyo",
    "*.pyd",
    "*.whl",
    "*.egg",
    "*.egg-info",
    "*.dist-info",
];

/// Dependency manifests and wrapper scripts.
pub const IGNORE_FILE_GLOBS: &[&str] = &[
    "requirements.txt",
    "requirements-dev.txt",
    "requirements-test.txt",
    "mvnw",
    "mvnw.cmd",
    "gradlew",
    "gradlew.bat",
];

/// Which paths extraction skips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnorePolicy {
    pub dirs: Vec<String>,
    pub globs: Vec<String>,
    /// Also honor the enclosing repository's root `.gitignore`
    pub use_gitignore: bool,
}

impl Default for IgnorePolicy {
    fn default() -> Self {
        Self {
            dirs: IGNORE_DIRS.iter().map(|s| s.to_string()).collect(),
            globs: IGNORE_EXT_GLOBS
                .iter()
                .chain(IGNORE_FILE_GLOBS)
                .map(|s| s.to_string())
                .collect(),
            use_gitignore: true,
        }
    }
}

fn default_base_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

fn default_true() -> bool {
    true
}

fn default_max_depth() -> i64 {
    -1
}

/// Inputs shared by the extraction steps.
#[derive(Debug, Deserialize, Clone)]
pub struct ExtractInputs {
    #[serde(default = "default_base_path")]
    pub base_path: PathBuf,
    /// Grouping name; unknown names fall back to `ALL`
    #[serde(default)]
    pub context_grouping: Option<String>,
    #[serde(default)]
    pub force_code_contexts: bool,
    #[serde(default = "default_true")]
    pub allow_overlap_contexts: bool,
    /// `-1` means unlimited
    #[serde(default = "default_max_depth")]
    pub max_depth: i64,
}

impl Default for ExtractInputs {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            context_grouping: None,
            force_code_contexts: false,
            allow_overlap_contexts: true,
            max_depth: -1,
        }
    }
}

impl ExtractInputs {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        if self.max_depth < -1 {
            issues.push(ValidationIssue::OutOfRange {
                field: "max_depth",
                message: format!("{} is below -1", self.max_depth),
            });
        }
        if self.base_path.as_os_str().is_empty() {
            issues.push(ValidationIssue::Empty { field: "base_path" });
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }

    /// Depth limit, or `None` when unlimited.
    pub fn depth_limit(&self) -> Option<usize> {
        usize::try_from(self.max_depth).ok()
    }
}

/// Inputs of the single-edit step.
#[derive(Debug, Deserialize, Clone)]
pub struct ModifyOnceInputs {
    pub file_path: String,
    #[serde(default)]
    pub start_line: Option<usize>,
    #[serde(default)]
    pub end_line: Option<usize>,
    #[serde(default)]
    pub new_code: Option<String>,
}

impl ModifyOnceInputs {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        if self.file_path.trim().is_empty() {
            issues.push(ValidationIssue::Empty { field: "file_path" });
        }
        if let (Some(start), Some(end)) = (self.start_line, self.end_line) {
            if start > end {
                issues.push(ValidationIssue::OutOfRange {
                    field: "start_line",
                    message: format!("{start} is after end_line {end}"),
                });
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReadFileInputs {
    pub file_path: PathBuf,
}

#[derive(Debug)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone)]
pub enum ValidationIssue {
    Empty {
        field: &'static str,
    },
    OutOfRange {
        field: &'static str,
        message: String,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::Empty { field } => write!(f, "input '{field}' must not be empty"),
            ValidationIssue::OutOfRange { field, message } => {
                write!(f, "input '{field}' out of range: {message}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extract_defaults() {
        let inputs: ExtractInputs = serde_json::from_value(json!({})).unwrap();
        assert!(inputs.allow_overlap_contexts);
        assert!(!inputs.force_code_contexts);
        assert_eq!(inputs.max_depth, -1);
        assert_eq!(inputs.depth_limit(), None);
        assert!(inputs.validate().is_ok());
    }

    #[test]
    fn max_depth_below_unlimited_is_rejected() {
        let inputs: ExtractInputs = serde_json::from_value(json!({"max_depth": -3})).unwrap();
        let err = inputs.validate().unwrap_err();
        assert!(err.to_string().contains("max_depth"));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let inputs: ModifyOnceInputs =
            serde_json::from_value(json!({"file_path": "a.py", "start_line": 4, "end_line": 2}))
                .unwrap();
        assert!(inputs.validate().is_err());
    }

    #[test]
    fn default_policy_lists_everything() {
        let policy = IgnorePolicy::default();
        assert!(policy.dirs.iter().any(|d| d == "node_modules"));
        assert!(policy.globs.iter().any(|g| g == "*.pyc"));
        assert!(policy.globs.iter().any(|g| g == "gradlew.bat"));
    }
}
