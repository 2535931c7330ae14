use super::{lines, spans};
use patchflow::{ContextStrategy, StrategyKind};
use std::path::Path;

const APP_JS: &str = r#"import React from "react";
export default class App extends React.Component {
  state = {
    total: null,
    next: null,
    operation: null,
  };

  /** @param {string} buttonName */
  handleClick = buttonName => {
    this.setState(calculate(this.state, buttonName));
  };

  handleClick = function(buttonName) {
    this.setState(calculate(this.state, buttonName));
  };

  render() {
    return (
      <div className="component-app">
      </div>
    );
  }
}
export function abc(a) {
    return 1;
}
function def(a) {
    return 1;
}
"#;

const TS_STORE: &str = "export class Store<T> {
  private items: T[] = [];

  add(item: T): void {
    this.items.push(item);
  }

  get size(): number {
    return this.items.length;
  }
}

export const total = (xs: number[]): number => {
  return xs.reduce((a, b) => a + b, 0);
};
";

const JS_FAMILY: [(StrategyKind, StrategyKind, StrategyKind); 2] = [
    (
        StrategyKind::JavascriptClass,
        StrategyKind::JavascriptFunction,
        StrategyKind::JavascriptBlock,
    ),
    (StrategyKind::JsxClass, StrategyKind::JsxFunction, StrategyKind::JsxBlock),
];

#[test]
fn context_counts() {
    let src = lines(APP_JS);
    for (class, function, block) in JS_FAMILY {
        assert_eq!(class.get_contexts(&src).len(), 1, "{class}");
        assert_eq!(
            spans(&function.get_contexts(&src)),
            vec![(9, 12), (13, 16), (17, 23), (24, 27), (27, 30)],
            "{function}"
        );
        assert_eq!(block.get_contexts(&src).len(), 5, "{block}");
    }
}

#[test]
fn line_context_hits() {
    let src = lines(APP_JS);
    for (class, function, block) in JS_FAMILY {
        let hit = class.get_context_indexes(&src, 11, 12).unwrap();
        assert_eq!((hit.start, hit.end), (1, 24));
        let hit = function.get_context_indexes(&src, 11, 12).unwrap();
        assert_eq!((hit.start, hit.end), (9, 12));
        let hit = block.get_context_indexes(&src, 11, 12).unwrap();
        assert_eq!((hit.start, hit.end), (9, 12));
    }
}

#[test]
fn line_context_misses() {
    let src = lines(APP_JS);
    for (class, function, block) in JS_FAMILY {
        assert!(class.get_context_indexes(&src, 0, 1).is_none());
        assert!(function.get_context_indexes(&src, 12, 13).is_none());
        assert!(block.get_context_indexes(&src, 0, 1).is_none());
    }
}

#[test]
fn arrow_property_has_jsdoc() {
    let src = lines(APP_JS);
    let contexts = StrategyKind::JavascriptFunction.get_contexts(&src);
    let comment = contexts[0].comment().unwrap();
    assert_eq!((comment.start, comment.end), (8, 9));
    assert!(contexts[1].comment().is_none());
}

#[test]
fn file_support_by_extension() {
    let src = lines(APP_JS);
    assert!(StrategyKind::JavascriptClass.is_file_supported(Path::new("App.js"), &src));
    assert!(StrategyKind::JsxClass.is_file_supported(Path::new("App.jsx"), &src));
    assert!(StrategyKind::JsxClass.is_file_supported(Path::new("App.tsx"), &src));
    assert!(!StrategyKind::TypescriptClass.is_file_supported(Path::new("App.js"), &src));
}

#[test]
fn typescript_signatures() {
    let src = lines(TS_STORE);
    assert_eq!(spans(&StrategyKind::TypescriptClass.get_contexts(&src)), vec![(0, 11)]);
    assert_eq!(
        spans(&StrategyKind::TypescriptFunction.get_contexts(&src)),
        vec![(3, 6), (7, 10), (12, 15)]
    );
}

#[test]
fn callback_arguments_are_not_headers() {
    let src = lines(
        "function schedule(done) {\n  setTimeout(function() {\n    done();\n  }, 10);\n}\n\nconst retry = (fn) => {\n  queue.push(() => {\n    fn();\n  });\n};\n",
    );
    for function in [StrategyKind::JavascriptFunction, StrategyKind::TypescriptFunction] {
        assert_eq!(spans(&function.get_contexts(&src)), vec![(0, 5), (6, 11)], "{function}");
        let hit = function.get_context_indexes(&src, 2, 3).unwrap();
        assert_eq!((hit.start, hit.end), (0, 5));
    }
}

#[test]
fn typescript_hits_and_misses() {
    let src = lines(TS_STORE);
    let hit = StrategyKind::TypescriptFunction.get_context_indexes(&src, 4, 5).unwrap();
    assert_eq!((hit.start, hit.end), (3, 6));
    let hit = StrategyKind::TypescriptClass.get_context_indexes(&src, 8, 9).unwrap();
    assert_eq!((hit.start, hit.end), (0, 11));

    assert!(StrategyKind::TypescriptFunction.get_context_indexes(&src, 1, 2).is_none());
    assert!(StrategyKind::TypescriptClass.get_context_indexes(&src, 11, 12).is_none());
    assert!(StrategyKind::TypescriptClass.get_context_indexes(&src, 13, 14).is_none());
}
