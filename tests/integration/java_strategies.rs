use super::{lines, spans};
use patchflow::{ContextStrategy, StrategyKind};

const MAIN_JAVA: &str = "package com.example;

import java.util.ArrayList;
import java.util.List;
import java.util.Map;

public class A {
    /** comment  */
    public static void main(String[] args) {
        System.out.println(\"Hello, World!\");
    }
}
";

const DOCUMENTED_JAVA: &str = "class Test {
    /**
     * Calculates the sum of two integers.
     *
     * @param a The first integer to be added.
     * @param b The second integer to be added.
     * @return The sum of the two integers.
     */
    public static int a_plus_b(Integer a, Integer b) {
        return a + b;
    }

    /**
     * Compares two objects based on a provided keymap function.
     *
     * @return -1, 1, or 0.
     */
    public static int compare(Function<Object, Comparable> keymap, Object a, Object b) {
        if (keymap(a) < keymap(b)) {
            return -1;
        } else if (keymap(a) > keymap(b)) {
            return 1;
        } else {
            return 0;
        }
    }
}";

#[test]
fn context_indexes_for_statement() {
    let src = lines(MAIN_JAVA);
    let expected = [
        (StrategyKind::JavaClass, (6, 12)),
        (StrategyKind::JavaMethod, (8, 11)),
        (StrategyKind::JavaBlock, (8, 11)),
    ];
    for (strategy, range) in expected {
        let hit = strategy.get_context_indexes(&src, 8, 9).unwrap();
        assert_eq!((hit.start, hit.end), range, "{strategy}");
    }
}

#[test]
fn body_line_hits_enclosing_method() {
    let src = lines(MAIN_JAVA);
    let hit = StrategyKind::JavaMethod.get_context_indexes(&src, 9, 10).unwrap();
    assert_eq!((hit.start, hit.end), (8, 11));
    let hit = StrategyKind::JavaMethod.get_context_indexes(&lines(DOCUMENTED_JAVA), 21, 22).unwrap();
    assert_eq!((hit.start, hit.end), (17, 26));
}

#[test]
fn imports_have_no_context() {
    let src = lines(MAIN_JAVA);
    for strategy in [StrategyKind::JavaClass, StrategyKind::JavaMethod, StrategyKind::JavaBlock] {
        assert!(strategy.get_context_indexes(&src, 2, 3).is_none(), "{strategy}");
        assert!(strategy.get_context_indexes(&src, 0, 1).is_none(), "{strategy}");
    }
}

#[test]
fn method_carries_javadoc() {
    let src = lines(MAIN_JAVA);
    let method = &StrategyKind::JavaMethod.get_contexts(&src)[0];
    let comment = method.comment().unwrap();
    assert_eq!((comment.start, comment.end), (7, 8));
    assert!(StrategyKind::JavaClass.get_contexts(&src)[0].comment().is_none());
}

#[test]
fn control_flow_stays_inside_method() {
    let src = lines(DOCUMENTED_JAVA);
    assert_eq!(spans(&StrategyKind::JavaClass.get_contexts(&src)), vec![(0, 27)]);
    let methods = StrategyKind::JavaMethod.get_contexts(&src);
    assert_eq!(spans(&methods), vec![(8, 11), (17, 26)]);
    assert_eq!(
        methods
            .iter()
            .map(|m| m.comment().map(|c| (c.start, c.end)))
            .collect::<Vec<_>>(),
        vec![Some((1, 8)), Some((12, 17))]
    );
    assert_eq!(spans(&StrategyKind::JavaBlock.get_contexts(&src)), vec![(8, 11), (17, 26)]);
}
