use super::{lines, spans};
use patchflow::{get_source_code_contexts, ContextOptions, ContextStrategy, StrategyKind};
use std::path::Path;

const INVENTORY_PY: &str = r#""""Inventory helpers."""

import json


class Inventory:
    """Items on hand."""

    def __init__(self):
        self.items = {}

    def add(self, name, count=1):
        self.items[name] = self.items.get(name, 0) + count

    @property
    def total(self):
        """Sum of all counts."""
        return sum(self.items.values())


async def load(path):
    with open(path) as fh:
        return json.load(fh)
"#;

#[test]
fn classes_and_functions() {
    let src = lines(INVENTORY_PY);
    assert_eq!(spans(&StrategyKind::PythonClass.get_contexts(&src)), vec![(5, 18)]);
    assert_eq!(
        spans(&StrategyKind::PythonFunction.get_contexts(&src)),
        vec![(8, 10), (11, 13), (14, 18), (20, 23)]
    );
    assert_eq!(StrategyKind::PythonBlock.get_contexts(&src).len(), 4);
}

#[test]
fn decorator_belongs_to_function() {
    let src = lines(INVENTORY_PY);
    let hit = StrategyKind::PythonFunction
        .get_context_indexes(&src, 17, 18)
        .unwrap();
    assert_eq!((hit.start, hit.end), (14, 18));
    let doc = hit.comment().unwrap();
    assert_eq!((doc.start, doc.end), (16, 17));
}

#[test]
fn class_index_hits_and_misses() {
    let src = lines(INVENTORY_PY);
    let hit = StrategyKind::PythonClass.get_context_indexes(&src, 9, 10).unwrap();
    assert_eq!((hit.start, hit.end), (5, 18));
    assert!(StrategyKind::PythonClass.get_context_indexes(&src, 21, 22).is_none());
    assert!(StrategyKind::PythonFunction.get_context_indexes(&src, 2, 3).is_none());
}

#[test]
fn docstrings_decide_inclusion() {
    let src = lines(INVENTORY_PY);
    let path = Path::new("inventory.py");
    let strategies = [StrategyKind::PythonFunction];

    let undocumented = get_source_code_contexts(path, &src, &strategies, ContextOptions::default());
    assert_eq!(spans(&undocumented), vec![(8, 10), (11, 13), (20, 23)]);

    let forced = ContextOptions {
        force_code_contexts: true,
        ..ContextOptions::default()
    };
    let all = get_source_code_contexts(path, &src, &strategies, forced);
    assert_eq!(spans(&all), vec![(8, 10), (11, 13), (14, 18), (20, 23)]);
}

#[test]
fn other_extensions_are_not_python() {
    let src = lines(INVENTORY_PY);
    let resolved = get_source_code_contexts(
        Path::new("inventory.txt"),
        &src,
        &[StrategyKind::PythonFunction],
        ContextOptions::default(),
    );
    assert!(resolved.is_empty());
}
