//! Language-independent view over the scanners' output.

use super::{brace, indent};
use crate::lang::{BlockStyle, Language};
use crate::position::Position;

/// What a scanner recognized a region as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Class,
    Function,
}

/// One class-like or function-like region.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub position: Position,
}

impl Declaration {
    fn covers(&self, other: &Declaration) -> bool {
        let (a, b) = (&self.position, &other.position);
        a.start <= b.start && b.end <= a.end && (a.start, a.end) != (b.start, b.end)
    }
}

/// Every declaration in `lines`, ordered by start line, enclosing regions
/// before the regions they contain.
pub fn scan(lines: &[String], language: Language) -> Vec<Declaration> {
    let descriptor = language.descriptor();
    let mut declarations = match descriptor.block_style {
        BlockStyle::Braces => brace::scan(lines, descriptor),
        BlockStyle::Indentation => indent::scan(lines, descriptor),
    };
    declarations.sort_by(|a, b| {
        a.position
            .start
            .cmp(&b.position.start)
            .then(b.position.end.cmp(&a.position.end))
    });
    declarations
}

/// Declarations of `kind` not nested inside another declaration of the same kind.
pub fn outermost(declarations: &[Declaration], kind: DeclarationKind) -> Vec<&Declaration> {
    let of_kind: Vec<&Declaration> = declarations.iter().filter(|d| d.kind == kind).collect();
    of_kind
        .iter()
        .filter(|d| !of_kind.iter().any(|outer| outer.covers(d)))
        .copied()
        .collect()
}

/// Declarations that contain no other declaration.
pub fn leaves(declarations: &[Declaration]) -> Vec<&Declaration> {
    declarations
        .iter()
        .filter(|d| !declarations.iter().any(|inner| d.covers(inner)))
        .collect()
}

/// Smallest candidate covering `[start, end)`.
pub fn smallest_containing<'a>(
    candidates: impl IntoIterator<Item = &'a Declaration>,
    start: usize,
    end: usize,
) -> Option<&'a Declaration> {
    candidates
        .into_iter()
        .filter(|d| d.position.contains_range(start, end))
        .min_by_key(|d| d.position.len())
}
