use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Step inputs: a flat JSON object.
pub type Inputs = Map<String, Value>;

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json {
        path: Option<PathBuf>,
        source: serde_json::Error,
    },
    Toml {
        path: Option<PathBuf>,
        source: toml_edit::de::Error,
    },
    NotAnObject {
        path: Option<PathBuf>,
    },
}

impl ConfigError {
    fn with_path(self, path: &Path) -> Self {
        let path = path.to_path_buf();
        match self {
            ConfigError::Io { .. } => self,
            ConfigError::Json { path: None, source } => ConfigError::Json {
                path: Some(path),
                source,
            },
            ConfigError::Toml { path: None, source } => ConfigError::Toml {
                path: Some(path),
                source,
            },
            ConfigError::NotAnObject { path: None } => ConfigError::NotAnObject { path: Some(path) },
            other => other,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read step inputs from {}: {}", path.display(), source)
            }
            ConfigError::Json { path, source } => match path {
                Some(path) => write!(
                    f,
                    "failed to parse step inputs JSON ({}): {}",
                    path.display(),
                    source
                ),
                None => write!(f, "failed to parse step inputs JSON: {}", source),
            },
            ConfigError::Toml { path, source } => match path {
                Some(path) => write!(
                    f,
                    "failed to parse step inputs TOML ({}): {}",
                    path.display(),
                    source
                ),
                None => write!(f, "failed to parse step inputs TOML: {}", source),
            },
            ConfigError::NotAnObject { path } => match path {
                Some(path) => write!(f, "step inputs ({}) must be a table/object", path.display()),
                None => write!(f, "step inputs must be a table/object"),
            },
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Json { source, .. } => Some(source),
            ConfigError::Toml { source, .. } => Some(source),
            ConfigError::NotAnObject { .. } => None,
        }
    }
}

/// Input file syntax.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Toml,
}

impl InputFormat {
    /// `.toml` files are TOML, everything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => InputFormat::Toml,
            _ => InputFormat::Json,
        }
    }
}

pub fn load_from_str(input: &str, format: InputFormat) -> Result<Inputs, ConfigError> {
    let value: Value = match format {
        InputFormat::Json => serde_json::from_str(input)
            .map_err(|source| ConfigError::Json { path: None, source })?,
        InputFormat::Toml => toml_edit::de::from_str(input)
            .map_err(|source| ConfigError::Toml { path: None, source })?,
    };
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ConfigError::NotAnObject { path: None }),
    }
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<Inputs, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents, InputFormat::from_path(path)).map_err(|error| error.with_path(path))
}
