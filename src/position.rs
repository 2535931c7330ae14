//! Line-indexed code regions.
//!
//! A [`Position`] is the unit every context strategy produces and every
//! downstream consumer reads. Lines are 0-based and half-open (`[start, end)`)
//! so that `lines[start..end]` is exactly the region's text.

use crate::lang::Language;
use std::collections::BTreeMap;

/// Role name of the doc comment / docstring attached to a region.
pub const COMMENT: &str = "comment";
/// Role name of the region's body (everything after the signature).
pub const BODY: &str = "body";

/// One located code region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// First line of the region (inclusive)
    pub start: usize,
    /// Line after the region (exclusive)
    pub end: usize,
    /// Column on `start` where the region begins
    pub start_col: Option<usize>,
    /// Column on the last line where the region ends
    pub end_col: Option<usize>,
    /// Language whose descriptor produced this region; `None` for
    /// language-agnostic regions such as the whole file
    pub language: Option<Language>,
    /// Auxiliary regions keyed by role, in the same line space
    pub meta_positions: BTreeMap<String, Position>,
}

impl Position {
    pub fn new(start: usize, end: usize, language: impl Into<Option<Language>>) -> Self {
        debug_assert!(start <= end, "position start {start} after end {end}");
        Self {
            start,
            end,
            start_col: None,
            end_col: None,
            language: language.into(),
            meta_positions: BTreeMap::new(),
        }
    }

    pub fn with_cols(mut self, start_col: Option<usize>, end_col: Option<usize>) -> Self {
        self.start_col = start_col;
        self.end_col = end_col;
        self
    }

    pub fn with_meta(mut self, role: &str, position: Position) -> Self {
        self.meta_positions.insert(role.to_string(), position);
        self
    }

    pub fn meta(&self, role: &str) -> Option<&Position> {
        self.meta_positions.get(role)
    }

    pub fn comment(&self) -> Option<&Position> {
        self.meta(COMMENT)
    }

    pub fn body(&self) -> Option<&Position> {
        self.meta(BODY)
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether this region covers the query range.
    ///
    /// A zero-width query `[line, line)` is treated as the single line `line`.
    pub fn contains_range(&self, start: usize, end: usize) -> bool {
        let end = if start == end { start + 1 } else { end };
        self.start <= start && end <= self.end
    }

    /// Same span and columns, ignoring language and meta positions.
    pub fn same_span(&self, other: &Position) -> bool {
        self.start == other.start
            && self.end == other.end
            && self.start_col == other.start_col
            && self.end_col == other.end_col
    }

    /// Return a copy widened to cover the attached comment, if any.
    ///
    /// Only the side that actually moves takes the comment's column.
    pub fn widened_to_comment(&self) -> Position {
        let mut widened = self.clone();
        let Some(comment) = self.comment() else {
            return widened;
        };

        if comment.start < widened.start {
            widened.start = comment.start;
            widened.start_col = comment.start_col;
        }
        if comment.end > widened.end {
            widened.end = comment.end;
            widened.end_col = comment.end_col;
        }
        widened
    }

    /// Slice the region out of the source lines.
    ///
    /// Out-of-range bounds are clamped so a stale position never panics.
    pub fn text(&self, lines: &[String]) -> String {
        let end = self.end.min(lines.len());
        let start = self.start.min(end);
        lines[start..end].concat()
    }
}
