//! Merging strategy output into one list of non-conflicting positions.

use crate::position::Position;
use crate::strategy::{ContextStrategy, StrategyKind};
use std::path::Path;

/// Policies applied after all strategies have run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextOptions {
    /// Widen each position over its doc comment; when false, documented
    /// positions are dropped instead
    pub force_code_contexts: bool,
    /// Keep positions that overlap an earlier one
    pub allow_overlap_contexts: bool,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            force_code_contexts: false,
            allow_overlap_contexts: true,
        }
    }
}

/// Run `strategies` over one file and resolve the combined positions.
pub fn get_source_code_contexts(
    path: &Path,
    lines: &[String],
    strategies: &[StrategyKind],
    options: ContextOptions,
) -> Vec<Position> {
    let mut positions = Vec::new();
    for strategy in strategies {
        if !strategy.is_file_supported(path, lines) {
            continue;
        }
        let found = strategy.get_contexts(lines);
        tracing::debug!(
            path = %path.display(),
            %strategy,
            count = found.len(),
            "strategy matched"
        );
        positions.extend(found);
    }

    resolve_positions(positions, options)
}

/// Sort, deduplicate and apply the comment and overlap policies.
pub fn resolve_positions(mut positions: Vec<Position>, options: ContextOptions) -> Vec<Position> {
    positions.sort_by_key(|p| p.start);

    let mut unique: Vec<Position> = Vec::with_capacity(positions.len());
    for position in positions {
        if !unique.iter().any(|kept| kept.same_span(&position)) {
            unique.push(position);
        }
    }

    let commented: Vec<Position> = if options.force_code_contexts {
        unique.iter().map(Position::widened_to_comment).collect()
    } else {
        unique.into_iter().filter(|p| p.comment().is_none()).collect()
    };

    if options.allow_overlap_contexts {
        return commented;
    }

    let mut kept: Vec<Position> = Vec::with_capacity(commented.len());
    for position in commented {
        match kept.last() {
            Some(last) if position.start < last.end => {}
            _ => kept.push(position),
        }
    }
    kept
}
