//! Thread-local compilation cache for header patterns.
//!
//! Language descriptors carry their patterns as `&'static str`; scanners run
//! them against every line of every file, so each pattern is compiled once per
//! thread and reused. The cache is capped at 256 entries; when full it is
//! cleared and rebuilt on demand.

use regex::Regex;
use std::cell::RefCell;
use std::collections::HashMap;

const MAX_CACHE_ENTRIES: usize = 256;

thread_local! {
    static PATTERN_CACHE: RefCell<HashMap<&'static str, Regex>> =
        RefCell::new(HashMap::new());
}

/// Get a compiled pattern from cache, or compile and cache it.
///
/// A pattern that fails to compile is logged and reported as `None`; callers
/// treat it as matching nothing.
pub fn get_or_compile(pattern: &'static str) -> Option<Regex> {
    PATTERN_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();

        if let Some(re) = cache.get(pattern) {
            return Some(re.clone());
        }

        if cache.len() >= MAX_CACHE_ENTRIES {
            cache.clear();
        }

        match Regex::new(pattern) {
            Ok(compiled) => {
                cache.insert(pattern, compiled.clone());
                Some(compiled)
            }
            Err(err) => {
                tracing::warn!(pattern, error = %err, "invalid header pattern, ignoring");
                None
            }
        }
    })
}

/// Whether any of `patterns` matches `text`.
pub fn any_match(patterns: &[&'static str], text: &str) -> bool {
    patterns
        .iter()
        .filter_map(|p| get_or_compile(*p))
        .any(|re| re.is_match(text))
}

/// Clear the pattern cache (mainly for testing).
pub fn clear_cache() {
    PATTERN_CACHE.with(|cache| {
        cache.borrow_mut().clear();
    });
}

/// Number of compiled patterns held by this thread.
pub fn cache_size() -> usize {
    PATTERN_CACHE.with(|cache| cache.borrow().len())
}
