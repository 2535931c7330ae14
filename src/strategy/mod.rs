//! Context strategies.
//!
//! A strategy knows which files it applies to and how to carve a file's lines
//! into [`Position`]s at one granularity. Strategies are a closed set
//! ([`StrategyKind`]); callers pick them through a [`Grouping`].

mod brace;
mod comment;
mod indent;
pub mod scan;

pub use scan::{Declaration, DeclarationKind};

use crate::lang::Language;
use crate::position::Position;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// The size of region a strategy reports.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Granularity {
    Class,
    Function,
    /// Declarations that contain no other declaration
    Block,
}

/// Matches regions of source code.
pub trait ContextStrategy {
    /// Whether this strategy applies to the file at `path`.
    fn is_file_supported(&self, path: &Path, lines: &[String]) -> bool;

    /// Every region this strategy recognizes, sorted by start line.
    fn get_contexts(&self, lines: &[String]) -> Vec<Position>;

    /// The smallest recognized region covering `[start, end)`.
    fn get_context_indexes(&self, lines: &[String], start: usize, end: usize) -> Option<Position>;
}

/// Every strategy, in tie-break order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    FullFile,
    JavaClass,
    JavaMethod,
    JavaBlock,
    JavascriptClass,
    JavascriptFunction,
    JavascriptBlock,
    TypescriptClass,
    TypescriptFunction,
    TypescriptBlock,
    JsxClass,
    JsxFunction,
    JsxBlock,
    CppClass,
    CppFunction,
    CppBlock,
    PythonClass,
    PythonFunction,
    PythonBlock,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 19] = [
        StrategyKind::FullFile,
        StrategyKind::JavaClass,
        StrategyKind::JavaMethod,
        StrategyKind::JavaBlock,
        StrategyKind::JavascriptClass,
        StrategyKind::JavascriptFunction,
        StrategyKind::JavascriptBlock,
        StrategyKind::TypescriptClass,
        StrategyKind::TypescriptFunction,
        StrategyKind::TypescriptBlock,
        StrategyKind::JsxClass,
        StrategyKind::JsxFunction,
        StrategyKind::JsxBlock,
        StrategyKind::CppClass,
        StrategyKind::CppFunction,
        StrategyKind::CppBlock,
        StrategyKind::PythonClass,
        StrategyKind::PythonFunction,
        StrategyKind::PythonBlock,
    ];

    /// Language and granularity, or `None` for [`StrategyKind::FullFile`].
    pub fn target(self) -> Option<(Language, Granularity)> {
        use Granularity::*;
        use StrategyKind::*;
        let target = match self {
            FullFile => return None,
            JavaClass => (Language::Java, Class),
            JavaMethod => (Language::Java, Function),
            JavaBlock => (Language::Java, Block),
            JavascriptClass => (Language::JavaScript, Class),
            JavascriptFunction => (Language::JavaScript, Function),
            JavascriptBlock => (Language::JavaScript, Block),
            TypescriptClass => (Language::TypeScript, Class),
            TypescriptFunction => (Language::TypeScript, Function),
            TypescriptBlock => (Language::TypeScript, Block),
            JsxClass => (Language::Jsx, Class),
            JsxFunction => (Language::Jsx, Function),
            JsxBlock => (Language::Jsx, Block),
            CppClass => (Language::Cpp, Class),
            CppFunction => (Language::Cpp, Function),
            CppBlock => (Language::Cpp, Block),
            PythonClass => (Language::Python, Class),
            PythonFunction => (Language::Python, Function),
            PythonBlock => (Language::Python, Block),
        };
        Some(target)
    }

    pub fn language(self) -> Option<Language> {
        self.target().map(|(language, _)| language)
    }

    pub fn granularity(self) -> Option<Granularity> {
        self.target().map(|(_, granularity)| granularity)
    }

    /// Strategies of one granularity, in tie-break order.
    pub fn with_granularity(granularity: Granularity) -> Vec<StrategyKind> {
        StrategyKind::ALL
            .into_iter()
            .filter(|kind| kind.granularity() == Some(granularity))
            .collect()
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl ContextStrategy for StrategyKind {
    fn is_file_supported(&self, path: &Path, lines: &[String]) -> bool {
        match self.language() {
            None => !lines.is_empty(),
            Some(language) => language.descriptor().supports_path(path),
        }
    }

    fn get_contexts(&self, lines: &[String]) -> Vec<Position> {
        let Some((language, granularity)) = self.target() else {
            return vec![Position::new(0, lines.len(), None)];
        };

        let declarations = scan::scan(lines, language);
        let selected = match granularity {
            Granularity::Class => scan::outermost(&declarations, DeclarationKind::Class),
            Granularity::Function => scan::outermost(&declarations, DeclarationKind::Function),
            Granularity::Block => scan::leaves(&declarations),
        };
        selected.into_iter().map(|d| d.position.clone()).collect()
    }

    fn get_context_indexes(&self, lines: &[String], start: usize, end: usize) -> Option<Position> {
        let Some((language, granularity)) = self.target() else {
            let whole = Position::new(0, lines.len(), None);
            return whole.contains_range(start, end).then_some(whole);
        };

        let declarations = scan::scan(lines, language);
        let hit = match granularity {
            Granularity::Class => scan::smallest_containing(
                scan::outermost(&declarations, DeclarationKind::Class),
                start,
                end,
            ),
            Granularity::Function => scan::smallest_containing(
                declarations
                    .iter()
                    .filter(|d| d.kind == DeclarationKind::Function),
                start,
                end,
            ),
            Granularity::Block => scan::smallest_containing(&declarations, start, end),
        };
        hit.map(|d| d.position.clone())
    }
}

/// Named set of strategies selected by the `context_grouping` input.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Grouping {
    /// Every language strategy; the whole-file strategy is not included
    #[default]
    All,
    Class,
    Function,
    Block,
    FullFile,
}

impl Grouping {
    pub fn strategies(self) -> Vec<StrategyKind> {
        match self {
            Grouping::All => StrategyKind::ALL
                .into_iter()
                .filter(|kind| *kind != StrategyKind::FullFile)
                .collect(),
            Grouping::Class => StrategyKind::with_granularity(Granularity::Class),
            Grouping::Function => StrategyKind::with_granularity(Granularity::Function),
            Grouping::Block => StrategyKind::with_granularity(Granularity::Block),
            Grouping::FullFile => vec![StrategyKind::FullFile],
        }
    }

    /// Parse a grouping name, falling back to [`Grouping::All`] with a
    /// warning when the name is unknown.
    pub fn from_name_lossy(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            tracing::warn!(grouping = name, "unknown context grouping, using ALL");
            Grouping::All
        })
    }
}

impl FromStr for Grouping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "ALL" => Ok(Grouping::All),
            "CLASS" => Ok(Grouping::Class),
            "FUNCTION" => Ok(Grouping::Function),
            "BLOCK" => Ok(Grouping::Block),
            "FULL_FILE" => Ok(Grouping::FullFile),
            other => Err(format!("unknown context grouping: {other}")),
        }
    }
}

impl fmt::Display for Grouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Grouping::All => "ALL",
            Grouping::Class => "CLASS",
            Grouping::Function => "FUNCTION",
            Grouping::Block => "BLOCK",
            Grouping::FullFile => "FULL_FILE",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(src: &str) -> Vec<String> {
        src.split_inclusive('\n').map(str::to_string).collect()
    }

    #[test]
    fn groupings_follow_declaration_order() {
        assert_eq!(
            Grouping::Function.strategies(),
            vec![
                StrategyKind::JavaMethod,
                StrategyKind::JavascriptFunction,
                StrategyKind::TypescriptFunction,
                StrategyKind::JsxFunction,
                StrategyKind::CppFunction,
                StrategyKind::PythonFunction,
            ]
        );
        assert_eq!(Grouping::All.strategies().len(), 18);
        assert_eq!(Grouping::FullFile.strategies(), vec![StrategyKind::FullFile]);
    }

    #[test]
    fn grouping_names() {
        assert_eq!("function".parse::<Grouping>().unwrap(), Grouping::Function);
        assert_eq!("FULL_FILE".parse::<Grouping>().unwrap(), Grouping::FullFile);
        assert!("METHOD".parse::<Grouping>().is_err());
        assert_eq!(Grouping::from_name_lossy("METHOD"), Grouping::All);
        assert_eq!(Grouping::Block.to_string(), "BLOCK");
    }

    #[test]
    fn file_support() {
        let src = lines("x = 1\n");
        assert!(StrategyKind::PythonBlock.is_file_supported(Path::new("a.py"), &src));
        assert!(!StrategyKind::JavaClass.is_file_supported(Path::new("a.py"), &src));
        assert!(StrategyKind::FullFile.is_file_supported(Path::new("a.txt"), &src));
        assert!(!StrategyKind::FullFile.is_file_supported(Path::new("a.txt"), &[]));
    }

    #[test]
    fn full_file_covers_everything() {
        let src = lines("a\nb\nc\n");
        let contexts = StrategyKind::FullFile.get_contexts(&src);
        assert_eq!(contexts.len(), 1);
        assert_eq!((contexts[0].start, contexts[0].end), (0, 3));
        assert!(StrategyKind::FullFile.get_context_indexes(&src, 1, 2).is_some());
        assert!(StrategyKind::FullFile.get_context_indexes(&src, 3, 3).is_none());
    }

    #[test]
    fn python_function_index_prefers_nested() {
        let src = lines("def outer():\n    def inner():\n        pass\n    return inner\n");
        let outer = StrategyKind::PythonFunction.get_contexts(&src);
        assert_eq!(outer.len(), 1);
        let hit = StrategyKind::PythonFunction
            .get_context_indexes(&src, 2, 2)
            .unwrap();
        assert_eq!((hit.start, hit.end), (1, 3));
        let hit = StrategyKind::PythonFunction
            .get_context_indexes(&src, 3, 4)
            .unwrap();
        assert_eq!((hit.start, hit.end), (0, 4));
    }
}
