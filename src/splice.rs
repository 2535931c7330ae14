use crate::source::{self, SourceError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The splicing primitive: replace a line range of a file with new text.
///
/// A missing range (or a missing file) means the new text becomes the whole
/// file. Replacement text is re-indented to match the lines it replaces.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "LineEdit does nothing until apply() is called"]
pub struct LineEdit {
    pub file: PathBuf,
    /// First replaced line (inclusive)
    pub start_line: Option<usize>,
    /// Line after the replaced range (exclusive)
    pub end_line: Option<usize>,
    pub new_text: String,
}

#[derive(Error, Debug)]
pub enum SpliceError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is binary or uses an unsupported encoding")]
    Undecodable { path: PathBuf },
}

impl From<SourceError> for SpliceError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Io { path, source } => SpliceError::Read { path, source },
            SourceError::Undecodable { path } => SpliceError::Undecodable { path },
        }
    }
}

/// Result of applying an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpliceResult {
    /// Lines `[start_line, end_line)` were replaced
    Replaced {
        file: PathBuf,
        start_line: usize,
        end_line: usize,
        lines_written: usize,
    },
    /// The file was created or overwritten as a whole
    Written { file: PathBuf, lines_written: usize },
}

impl LineEdit {
    pub fn new(
        file: impl Into<PathBuf>,
        start_line: Option<usize>,
        end_line: Option<usize>,
        new_text: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            start_line,
            end_line,
            new_text: new_text.into(),
        }
    }

    /// Apply this edit to the file system.
    pub fn apply(&self) -> Result<SpliceResult, SpliceError> {
        replace_code_in_file(&self.file, self.start_line, self.end_line, &self.new_text)
    }

    /// Apply edits bottom-to-top so earlier line numbers stay valid.
    ///
    /// Edits are stably sorted by start line descending; edits without a
    /// start line go last. Results are returned in application order.
    pub fn apply_batch(mut edits: Vec<LineEdit>) -> Result<Vec<SpliceResult>, SpliceError> {
        sort_bottom_up(&mut edits, |edit| edit.start_line);
        edits.iter().map(LineEdit::apply).collect()
    }
}

/// Stable sort by start line descending, `None` after every line.
pub fn sort_bottom_up<T>(items: &mut [T], start_line: impl Fn(&T) -> Option<usize>) {
    items.sort_by(|a, b| {
        let key = |item: &T| start_line(item).map_or(-1, |line| line as i64);
        key(b).cmp(&key(a))
    });
}

/// Split replacement text into lines, adding a final newline if missing.
pub fn new_code_lines(new_code: &str) -> Vec<String> {
    let mut lines = source::split_lines(new_code);
    if let Some(last) = lines.last_mut() {
        if !last.ends_with('\n') {
            last.push('\n');
        }
    }
    lines
}

fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Re-indent `target` to match the lines `[start, end)` of `src` it replaces.
///
/// Only indentation is added, never removed: when the first non-blank source
/// line is indented deeper than the first non-blank target line, every target
/// line is prefixed with the difference, using the source line's first
/// character as the indent unit.
pub fn handle_indent(src: &[String], target: Vec<String>, start: usize, end: usize) -> Vec<String> {
    if target.is_empty() {
        return target;
    }

    let end = if start == end { start + 1 } else { end };
    let lo = start.min(src.len());
    let hi = end.min(src.len()).max(lo);
    let window = &src[lo..hi];
    let first_src = window.iter().find(|l| !l.trim().is_empty()).map_or("", String::as_str);
    let first_target = target.iter().find(|l| !l.trim().is_empty()).map_or("", String::as_str);

    let src_indent = leading_whitespace(first_src);
    let target_indent = leading_whitespace(first_target);
    if src_indent <= target_indent {
        return target;
    }

    let Some(unit) = first_src.chars().next() else {
        return target;
    };
    let indent: String = std::iter::repeat(unit).take(src_indent - target_indent).collect();
    target.into_iter().map(|line| format!("{indent}{line}")).collect()
}

/// Replace `[start, end)` of `lines` in place, clamping to the line count.
pub fn splice_lines(lines: &mut Vec<String>, start: usize, end: usize, replacement: Vec<String>) {
    let start = start.min(lines.len());
    let end = end.min(lines.len()).max(start);
    lines.splice(start..end, replacement);
}

/// Splice `new_code` into `path`, keeping the file's encoding and BOM when a
/// range is replaced. Whole-file writes are UTF-8.
pub fn replace_code_in_file(
    path: &Path,
    start_line: Option<usize>,
    end_line: Option<usize>,
    new_code: &str,
) -> Result<SpliceResult, SpliceError> {
    let new_lines = new_code_lines(new_code);

    let (content, result) = match (start_line, end_line) {
        (Some(start), Some(end)) if path.exists() => {
            let decoded = source::read_decoded(path)?;
            let mut lines = decoded.lines();
            let replacement = handle_indent(&lines, new_lines, start, end);
            let lines_written = replacement.len();
            splice_lines(&mut lines, start, end, replacement);
            (
                decoded.encode(&lines.concat()),
                SpliceResult::Replaced {
                    file: path.to_path_buf(),
                    start_line: start,
                    end_line: end,
                    lines_written,
                },
            )
        }
        _ => {
            let lines_written = new_lines.len();
            (
                new_lines.concat().into_bytes(),
                SpliceResult::Written {
                    file: path.to_path_buf(),
                    lines_written,
                },
            )
        }
    };

    fs::write(path, content).map_err(|source| SpliceError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), ?result, "spliced");
    Ok(result)
}
