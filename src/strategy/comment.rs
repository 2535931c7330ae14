//! Doc comment and docstring detection.

use crate::lang::LanguageDescriptor;
use crate::position::Position;

/// How far up a block comment opener is searched for.
const MAX_COMMENT_LINES: usize = 400;

pub(crate) fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace() && *c != '\n' && *c != '\r').count()
}

pub(crate) fn trimmed_width(line: &str) -> usize {
    line.trim_end().chars().count()
}

/// Contiguous comment block ending on the line directly above `top`.
///
/// Either a block comment whose closing delimiter ends that line, or a run of
/// line comments. A blank line in between means no comment.
pub fn preceding_comment(
    lines: &[String],
    top: usize,
    descriptor: &LanguageDescriptor,
) -> Option<Position> {
    let last = top.checked_sub(1)?;
    let trimmed = lines.get(last)?.trim();
    if trimmed.is_empty() {
        return None;
    }

    let language = descriptor.language;
    let end_col = Some(trimmed_width(&lines[last]));

    if let Some((open, close)) = descriptor.block_comment {
        if trimmed.ends_with(close) {
            let floor = last.saturating_sub(MAX_COMMENT_LINES);
            for i in (floor..=last).rev() {
                let line = &lines[i];
                if line.contains(open) {
                    // code before the opener means this is a trailing comment
                    if !line.trim_start().starts_with(open) {
                        return None;
                    }
                    return Some(
                        Position::new(i, top, language)
                            .with_cols(Some(indent_width(line)), end_col),
                    );
                }
            }
            return None;
        }
    }

    if trimmed.starts_with(descriptor.line_comment) {
        let mut first = last;
        while first > 0 && lines[first - 1].trim().starts_with(descriptor.line_comment) {
            first -= 1;
        }
        return Some(
            Position::new(first, top, language)
                .with_cols(Some(indent_width(&lines[first])), end_col),
        );
    }

    None
}

/// Docstring opening the body `[body_start, body_end)`, if the first statement
/// is a string literal.
pub fn leading_docstring(
    lines: &[String],
    body_start: usize,
    body_end: usize,
    descriptor: &LanguageDescriptor,
) -> Option<Position> {
    let body_end = body_end.min(lines.len());
    let first = (body_start..body_end).find(|&i| {
        let t = lines[i].trim();
        !t.is_empty() && !t.starts_with(descriptor.line_comment)
    })?;

    let trimmed = lines[first].trim();
    let literal = trimmed.trim_start_matches(|c: char| "rRuUbBfF".contains(c));
    if trimmed.len() - literal.len() > 2 {
        return None;
    }

    let last = if let Some(delim) = ["\"\"\"", "'''"].into_iter().find(|d| literal.starts_with(d)) {
        if literal[delim.len()..].contains(delim) {
            first
        } else {
            (first + 1..body_end).find(|&i| lines[i].contains(delim))?
        }
    } else if literal.starts_with('"') || literal.starts_with('\'') {
        first
    } else {
        return None;
    };

    Some(
        Position::new(first, last + 1, descriptor.language).with_cols(
            Some(indent_width(&lines[first])),
            Some(trimmed_width(&lines[last])),
        ),
    )
}
