//! Declaration scanner for brace-delimited languages.
//!
//! Lines are first sanitized (string literals and comments blanked out, block
//! comment and template-string state carried across lines), then braces are
//! matched with a depth stack. A line matching a class or function header
//! pattern claims the first `{` at or after it, provided no `;` or `}`
//! terminates the header first. The declaration runs from the header (plus any
//! annotation lines directly above) to the matching `}`.

use super::comment::{indent_width, preceding_comment};
use super::scan::{Declaration, DeclarationKind};
use crate::cache::any_match;
use crate::lang::LanguageDescriptor;
use crate::position::{Position, BODY, COMMENT};
use std::collections::{HashMap, HashSet};

/// Lines searched below a header for its opening brace.
const HEADER_LOOKAHEAD: usize = 20;

/// Blanks out comments and string literals while preserving braces and
/// semicolons that are real code.
struct Sanitizer<'d> {
    descriptor: &'d LanguageDescriptor,
    in_block_comment: bool,
    in_multiline_string: bool,
}

impl<'d> Sanitizer<'d> {
    fn new(descriptor: &'d LanguageDescriptor) -> Self {
        Self {
            descriptor,
            in_block_comment: false,
            in_multiline_string: false,
        }
    }

    fn sanitize(&mut self, line: &str) -> Vec<char> {
        let chars: Vec<char> = line.chars().collect();
        let mut out = Vec::with_capacity(chars.len());
        let markup = self.descriptor.markup_aware
            && !self.in_multiline_string
            && !self.in_block_comment
            && line.trim_start().starts_with('<');
        let (block_open, block_close) = self.descriptor.block_comment.unwrap_or(("", ""));
        let mut quote: Option<char> = None;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];

            if self.in_block_comment {
                if !block_close.is_empty() && starts_with_at(&chars, i, block_close) {
                    self.in_block_comment = false;
                    let width = block_close.chars().count();
                    out.extend(std::iter::repeat(' ').take(width));
                    i += width;
                } else {
                    out.push(' ');
                    i += 1;
                }
                continue;
            }

            if self.in_multiline_string || quote.is_some() {
                if c == '\\' {
                    out.push(' ');
                    if i + 1 < chars.len() {
                        out.push(' ');
                    }
                    i += 2;
                    continue;
                }
                if self.in_multiline_string && Some(c) == self.descriptor.multiline_string {
                    self.in_multiline_string = false;
                } else if quote == Some(c) {
                    quote = None;
                }
                out.push(' ');
                i += 1;
                continue;
            }

            if !markup && starts_with_at(&chars, i, self.descriptor.line_comment) {
                break;
            }
            if !block_open.is_empty() && starts_with_at(&chars, i, block_open) {
                self.in_block_comment = true;
                let width = block_open.chars().count();
                out.extend(std::iter::repeat(' ').take(width));
                i += width;
                continue;
            }
            if !markup && Some(c) == self.descriptor.multiline_string {
                self.in_multiline_string = true;
                out.push(' ');
                i += 1;
                continue;
            }
            if !markup && self.descriptor.string_delimiters.contains(&c) {
                quote = Some(c);
                out.push(' ');
                i += 1;
                continue;
            }

            out.push(c);
            i += 1;
        }

        out
    }
}

fn starts_with_at(chars: &[char], at: usize, token: &str) -> bool {
    !token.is_empty()
        && token
            .chars()
            .enumerate()
            .all(|(k, t)| chars.get(at + k) == Some(&t))
}

/// Matched brace pair, in line/column coordinates of the sanitized text.
#[derive(Debug, Clone, Copy)]
struct BracePair {
    close_line: usize,
    close_col: usize,
}

struct BraceMap {
    code: Vec<Vec<char>>,
    pairs: HashMap<(usize, usize), BracePair>,
}

impl BraceMap {
    fn build(lines: &[String], descriptor: &LanguageDescriptor) -> Self {
        let mut sanitizer = Sanitizer::new(descriptor);
        let code: Vec<Vec<char>> = lines.iter().map(|l| sanitizer.sanitize(l)).collect();

        let mut stack: Vec<(usize, usize)> = Vec::new();
        let mut pairs = HashMap::new();
        for (line_idx, line) in code.iter().enumerate() {
            for (col, c) in line.iter().enumerate() {
                match c {
                    '{' => stack.push((line_idx, col)),
                    '}' => {
                        // a stray closer is ignored rather than unbalancing everything
                        if let Some(open) = stack.pop() {
                            pairs.insert(
                                open,
                                BracePair {
                                    close_line: line_idx,
                                    close_col: col,
                                },
                            );
                        }
                    }
                    _ => {}
                }
            }
        }

        Self { code, pairs }
    }

    /// First `{` at or after the start of `header`, unless the header is
    /// terminated by `;` or `}` first.
    fn opening_brace(&self, header: usize) -> Option<(usize, usize)> {
        let last = (header + HEADER_LOOKAHEAD).min(self.code.len());
        for line_idx in header..last {
            for (col, c) in self.code[line_idx].iter().enumerate() {
                match c {
                    '{' => return Some((line_idx, col)),
                    ';' | '}' => return None,
                    _ => {}
                }
            }
        }
        None
    }
}

/// Extend `start` upward over attachment lines (annotations, template heads).
fn absorb_attachments(lines: &[String], start: usize, descriptor: &LanguageDescriptor) -> usize {
    let mut top = start;
    while top > 0 && any_match(descriptor.attachment_patterns, &lines[top - 1]) {
        top -= 1;
    }
    top
}

fn header_kind(line: &str, descriptor: &LanguageDescriptor) -> Option<DeclarationKind> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() || descriptor.starts_with_statement(trimmed) {
        return None;
    }
    if any_match(descriptor.class_patterns, line) {
        Some(DeclarationKind::Class)
    } else if any_match(descriptor.function_patterns, line) {
        Some(DeclarationKind::Function)
    } else {
        None
    }
}

pub fn scan(lines: &[String], descriptor: &LanguageDescriptor) -> Vec<Declaration> {
    let braces = BraceMap::build(lines, descriptor);
    let mut claimed: HashSet<(usize, usize)> = HashSet::new();
    let mut declarations = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        // headers are matched on real code only
        let code: String = braces.code[idx].iter().collect();
        if code.trim().is_empty() {
            continue;
        }
        let Some(kind) = header_kind(line, descriptor) else {
            continue;
        };
        let Some(open) = braces.opening_brace(idx) else {
            continue;
        };
        let Some(pair) = braces.pairs.get(&open).copied() else {
            continue;
        };
        if !claimed.insert(open) {
            continue;
        }

        let start = absorb_attachments(lines, idx, descriptor);
        let end = pair.close_line + 1;
        let body_start = (open.0 + 1).min(pair.close_line);

        let mut position = Position::new(start, end, descriptor.language)
            .with_cols(Some(indent_width(&lines[start])), Some(pair.close_col + 1))
            .with_meta(
                BODY,
                Position::new(body_start, pair.close_line, descriptor.language),
            );
        if let Some(comment) = preceding_comment(lines, start, descriptor) {
            position = position.with_meta(COMMENT, comment);
        }

        declarations.push(Declaration { kind, position });
    }

    declarations
}
