use super::{lines, spans};
use patchflow::{get_source_code_contexts, ContextOptions, ContextStrategy, StrategyKind};
use std::path::Path;

const UTILS_CPP: &str = "#include <string>
#include <vector>
#include <random>
#include <algorithm>
#include <sqlite3.h>


template<typename T>
/**
 * Calculates the sum of two values of type T.
 *
 * @param a The first value to be added.
 * @param b The second value to be added.
 * @return The sum of a and b.
 */
T a_plus_b(T a, T b) {
    return a + b;
}


/**
 * Executes a SQL query and returns the rows.
 */
std::vector<std::vector<std::string>> sqlite(sqlite3* db, const std::string& query) {
    std::vector<std::vector<std::string>> results;
    sqlite3_stmt* stmt;

    if (sqlite3_prepare_v2(db, query.c_str(), -1, &stmt, nullptr) != SQLITE_OK) {
        return results;
    }

    while (sqlite3_step(stmt) == SQLITE_ROW) {
        std::vector<std::string> row;
        for (int i = 0; i < sqlite3_column_count(stmt); i++) {
            const unsigned char* text = sqlite3_column_text(stmt, i);
            if (text) {
                row.push_back(std::string(reinterpret_cast<const char*>(text)));
            } else {
                row.push_back(\"\");
            }
        }
        results.push_back(row);
    }

    sqlite3_finalize(stmt);
    return results;
}


std::string random_alphabets(int length) {
    static const std::string chars =
        \"abcdefghijklmnopqrstuvwxyz\"
        \"ABCDEFGHIJKLMNOPQRSTUVWXYZ\";

    std::string result;
    result.reserve(length);
    return result;
}
";

#[test]
fn functions_with_doc_comments() {
    let src = lines(UTILS_CPP);
    let functions = StrategyKind::CppFunction.get_contexts(&src);
    assert_eq!(spans(&functions), vec![(15, 18), (23, 47), (49, 58)]);

    let comment = functions[0].comment().unwrap();
    assert_eq!((comment.start, comment.end), (8, 15));
    let comment = functions[1].comment().unwrap();
    assert_eq!((comment.start, comment.end), (20, 23));
    assert!(functions[2].comment().is_none());
}

#[test]
fn nested_control_flow_is_not_a_block() {
    let src = lines(UTILS_CPP);
    let hit = StrategyKind::CppBlock.get_context_indexes(&src, 39, 40).unwrap();
    assert_eq!((hit.start, hit.end), (23, 47));
    assert!(StrategyKind::CppClass.get_contexts(&src).is_empty());
}

#[test]
fn undocumented_function_is_the_only_context() {
    let src = lines(UTILS_CPP);
    let resolved = get_source_code_contexts(
        Path::new("utils.cpp"),
        &src,
        &StrategyKind::with_granularity(patchflow::strategy::Granularity::Function),
        ContextOptions::default(),
    );
    assert_eq!(spans(&resolved), vec![(49, 58)]);
}

#[test]
fn structs_are_classes() {
    let src = lines("struct Point {\n    int x;\n    int y;\n\n    int sum() const {\n        return x + y;\n    }\n};\n");
    assert_eq!(spans(&StrategyKind::CppClass.get_contexts(&src)), vec![(0, 8)]);
    assert_eq!(spans(&StrategyKind::CppFunction.get_contexts(&src)), vec![(4, 7)]);
}

#[test]
fn includes_and_globals_have_no_context() {
    let src = lines(UTILS_CPP);
    for strategy in [StrategyKind::CppClass, StrategyKind::CppFunction, StrategyKind::CppBlock] {
        assert!(strategy.get_context_indexes(&src, 0, 1).is_none(), "{strategy}");
        assert!(strategy.get_context_indexes(&src, 18, 19).is_none(), "{strategy}");
    }

    let src = lines("int counter = 1;\n\nint next() {\n    return ++counter;\n}\n");
    assert!(StrategyKind::CppFunction.get_context_indexes(&src, 0, 1).is_none());
    let hit = StrategyKind::CppFunction.get_context_indexes(&src, 3, 4).unwrap();
    assert_eq!((hit.start, hit.end), (2, 5));
}
