//! Strategy behavior on realistic source fixtures.

mod cpp_strategies;
mod java_strategies;
mod javascript_strategies;
mod python_strategies;

use patchflow::Position;

pub fn lines(src: &str) -> Vec<String> {
    src.split_inclusive('\n').map(str::to_string).collect()
}

pub fn spans(positions: &[Position]) -> Vec<(usize, usize)> {
    positions.iter().map(|p| (p.start, p.end)).collect()
}
