//! Per-language lexical descriptors.
//!
//! Each supported language is described by a `'static` [`LanguageDescriptor`]:
//! comment syntax, how blocks are delimited, where doc comments live and the
//! header patterns the scanners use to find classes and functions. Nothing
//! here parses anything; the strategies read these tables.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

mod descriptors;

pub use descriptors::{CPP, JAVA, JAVASCRIPT, JSX, PYTHON, TYPESCRIPT};

/// Supported languages.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Java,
    JavaScript,
    TypeScript,
    Jsx,
    Cpp,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::Python,
        Language::Java,
        Language::JavaScript,
        Language::TypeScript,
        Language::Jsx,
        Language::Cpp,
    ];

    pub fn descriptor(self) -> &'static LanguageDescriptor {
        match self {
            Language::Python => &PYTHON,
            Language::Java => &JAVA,
            Language::JavaScript => &JAVASCRIPT,
            Language::TypeScript => &TYPESCRIPT,
            Language::Jsx => &JSX,
            Language::Cpp => &CPP,
        }
    }

    /// Detection by file extension, case-insensitive.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        Language::ALL
            .into_iter()
            .find(|lang| lang.descriptor().extensions.contains(&ext.as_str()))
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Language::from_extension)
    }

    pub fn docstring_format(self) -> &'static str {
        self.descriptor().docstring_format
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descriptor().name)
    }
}

/// How a language delimits blocks.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BlockStyle {
    /// `{ ... }` with brace depth tracking
    Braces,
    /// Significant indentation after a `:` header
    Indentation,
}

/// Where documentation for a declaration is written.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DocPlacement {
    /// A comment block directly above the declaration
    Preceding,
    /// A string literal as the first statement of the body
    BodyLeading,
}

/// Static lexical description of one language.
#[derive(Debug)]
pub struct LanguageDescriptor {
    pub language: Language,
    pub name: &'static str,
    pub extensions: &'static [&'static str],
    /// Line comment token (`//`, `#`)
    pub line_comment: &'static str,
    /// Block comment delimiters, if the language has them
    pub block_comment: Option<(&'static str, &'static str)>,
    /// Quote characters that open single-line string literals
    pub string_delimiters: &'static [char],
    /// Quote character whose literals may span lines (JS template strings)
    pub multiline_string: Option<char>,
    /// Lines starting with `<` are markup; quotes on them are plain text
    pub markup_aware: bool,
    pub block_style: BlockStyle,
    pub doc_placement: DocPlacement,
    /// Lines directly above a header that belong to the declaration
    /// (annotations, decorators, template heads)
    pub attachment_patterns: &'static [&'static str],
    pub class_patterns: &'static [&'static str],
    pub function_patterns: &'static [&'static str],
    /// Leading words that mark a statement, never a declaration header
    pub statement_keywords: &'static [&'static str],
    /// Template used when generating a doc comment for this language
    pub docstring_format: &'static str,
}

impl LanguageDescriptor {
    pub fn supports_path(&self, path: &Path) -> bool {
        Language::from_path(path) == Some(self.language)
    }

    /// Whether the first word of `trimmed` is a statement keyword.
    pub fn starts_with_statement(&self, trimmed: &str) -> bool {
        let word: String = trimmed
            .chars()
            .take_while(|c| c.is_alphanumeric() || *c == '_')
            .collect();
        !word.is_empty() && self.statement_keywords.contains(&word.as_str())
    }
}
