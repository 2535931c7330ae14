//! Declaration scanner for indentation-delimited languages (Python).
//!
//! A header is a `def`/`async def`/`class` line that starts a logical line.
//! Its signature runs to the end of that logical line (brackets and backslash
//! continuations join physical lines). The body is every following line
//! indented deeper than the header, plus blank lines, comment lines and
//! continuation lines in between. Trailing blank and comment lines belong to
//! whatever comes next.

use super::comment::{indent_width, leading_docstring, trimmed_width};
use super::scan::{Declaration, DeclarationKind};
use crate::cache::any_match;
use crate::lang::LanguageDescriptor;
use crate::position::{Position, BODY, COMMENT};

/// For each line, whether it continues the logical line started above it.
fn continuation_mask(lines: &[String]) -> Vec<bool> {
    let mut mask = Vec::with_capacity(lines.len());
    let mut triple: Option<&'static str> = None;
    let mut depth: usize = 0;
    let mut backslash = false;

    for line in lines {
        mask.push(triple.is_some() || depth > 0 || backslash);
        backslash = false;

        let chars: Vec<char> = line.chars().collect();
        let mut i = 0;
        while i < chars.len() {
            if let Some(delim) = triple {
                if at(&chars, i, delim) {
                    triple = None;
                    i += 3;
                } else {
                    i += if chars[i] == '\\' { 2 } else { 1 };
                }
                continue;
            }

            match chars[i] {
                '#' => break,
                '"' | '\'' => {
                    let delim = if chars[i] == '"' { "\"\"\"" } else { "'''" };
                    if at(&chars, i, delim) {
                        triple = Some(delim);
                        i += 3;
                        continue;
                    }
                    i = skip_string(&chars, i);
                    continue;
                }
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => depth = depth.saturating_sub(1),
                _ => {}
            }
            i += 1;
        }

        if triple.is_none() && line.trim_end().ends_with('\\') {
            backslash = true;
        }
    }

    mask
}

fn at(chars: &[char], i: usize, token: &str) -> bool {
    token.chars().enumerate().all(|(k, t)| chars.get(i + k) == Some(&t))
}

/// Index just past the single-quoted string opening at `open`; an
/// unterminated string runs to the end of the line.
fn skip_string(chars: &[char], open: usize) -> usize {
    let quote = chars[open];
    let mut i = open + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            c if c == quote => return i + 1,
            _ => i += 1,
        }
    }
    chars.len()
}

fn is_comment_or_blank(line: &str, descriptor: &LanguageDescriptor) -> bool {
    let t = line.trim();
    t.is_empty() || t.starts_with(descriptor.line_comment)
}

/// Last physical line of the logical line starting at `first`.
fn logical_end(mask: &[bool], first: usize) -> usize {
    let mut last = first;
    while last + 1 < mask.len() && mask[last + 1] {
        last += 1;
    }
    last
}

/// First physical line of the logical line containing `line`.
fn logical_start(mask: &[bool], line: usize) -> usize {
    let mut first = line;
    while first > 0 && mask[first] {
        first -= 1;
    }
    first
}

fn absorb_decorators(
    lines: &[String],
    mask: &[bool],
    header: usize,
    descriptor: &LanguageDescriptor,
) -> usize {
    let mut top = header;
    while top > 0 {
        let candidate = logical_start(mask, top - 1);
        if !any_match(descriptor.attachment_patterns, &lines[candidate]) {
            break;
        }
        top = candidate;
    }
    top
}

pub fn scan(lines: &[String], descriptor: &LanguageDescriptor) -> Vec<Declaration> {
    let mask = continuation_mask(lines);
    let mut declarations = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        if mask[idx] {
            continue;
        }
        let kind = if any_match(descriptor.class_patterns, line) {
            DeclarationKind::Class
        } else if any_match(descriptor.function_patterns, line) {
            DeclarationKind::Function
        } else {
            continue;
        };

        let header_indent = indent_width(line);
        let sig_end = logical_end(&mask, idx);

        let mut last = sig_end;
        for next in sig_end + 1..lines.len() {
            let deeper = indent_width(&lines[next]) > header_indent;
            if mask[next] || deeper || is_comment_or_blank(&lines[next], descriptor) {
                // a blank or shallow comment only joins if something deeper follows
                if mask[next] || (deeper && !is_comment_or_blank(&lines[next], descriptor)) {
                    last = next;
                }
                continue;
            }
            break;
        }

        // a body that was never indented: one-line `def f(): ...`
        let end = last + 1;
        let start = absorb_decorators(lines, &mask, idx, descriptor);
        let body_start = (sig_end + 1).min(end);

        let mut position = Position::new(start, end, descriptor.language)
            .with_cols(Some(indent_width(&lines[start])), Some(trimmed_width(&lines[last])))
            .with_meta(BODY, Position::new(body_start, end, descriptor.language));
        if let Some(docstring) = leading_docstring(lines, body_start, end, descriptor) {
            position = position.with_meta(COMMENT, docstring);
        }

        declarations.push(Declaration { kind, position });
    }

    declarations
}
