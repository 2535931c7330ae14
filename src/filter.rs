//! Which files extraction looks at.
//!
//! Directories are pruned by name, by ignore glob or by depth; files are
//! skipped by ignore glob. Policy globs are tested against the file name and
//! against the path relative to the base and each of its ancestors. The root
//! `.gitignore` of the enclosing repository is applied with git's own rules,
//! negations and anchoring included.

use crate::config::IgnorePolicy;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use ignore::Match;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

pub struct PathFilter {
    base_path: PathBuf,
    /// `base_path` resolved, for matching against the repository root
    canonical_base: PathBuf,
    dirs: HashSet<String>,
    globs: GlobSet,
    /// Source pattern of each glob in `globs`, by index
    patterns: Vec<String>,
    gitignore: Option<Gitignore>,
    max_depth: Option<usize>,
}

impl PathFilter {
    pub fn new(base_path: impl Into<PathBuf>, policy: &IgnorePolicy, max_depth: Option<usize>) -> Self {
        let base_path = base_path.into();
        let canonical_base = fs::canonicalize(&base_path).unwrap_or_else(|_| base_path.clone());

        let mut builder = GlobSetBuilder::new();
        let mut patterns = Vec::with_capacity(policy.globs.len());
        for pattern in &policy.globs {
            match Glob::new(pattern) {
                Ok(glob) => {
                    builder.add(glob);
                    patterns.push(pattern.clone());
                }
                Err(err) => tracing::warn!(%pattern, error = %err, "skipping invalid ignore glob"),
            }
        }
        let globs = builder.build().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "failed to build ignore globs, ignoring none");
            patterns.clear();
            GlobSet::empty()
        });

        let gitignore = if policy.use_gitignore {
            find_git_root(&base_path).and_then(|root| load_gitignore(&root))
        } else {
            None
        };

        Self {
            base_path,
            canonical_base,
            dirs: policy.dirs.iter().cloned().collect(),
            globs,
            patterns,
            gitignore,
            max_depth,
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// The ignore pattern matching `path`, if any.
    pub fn ignored_by(&self, path: &Path) -> Option<&str> {
        self.ignored_as(path, path.is_dir())
    }

    fn ignored_as(&self, path: &Path, is_dir: bool) -> Option<&str> {
        let relative = path.strip_prefix(&self.base_path).unwrap_or(path);
        let name = path.file_name().map(Path::new);
        let candidates = name.into_iter().chain(relative.ancestors()).filter(|p| !p.as_os_str().is_empty());

        for candidate in candidates {
            if let Some(&idx) = self.globs.matches(candidate).first() {
                return Some(self.patterns[idx].as_str());
            }
        }

        let gitignore = self.gitignore.as_ref()?;
        let absolute = self.canonical_base.join(relative);
        // the matcher panics on paths outside its root
        if !absolute.starts_with(gitignore.path()) || absolute == gitignore.path() {
            return None;
        }
        match gitignore.matched_path_or_any_parents(&absolute, is_dir) {
            Match::Ignore(glob) => Some(glob.original()),
            Match::Whitelist(_) | Match::None => None,
        }
    }

    /// Whether a directory at `depth` below the base is too deep to enter.
    pub fn exceeds_depth(&self, depth: usize) -> bool {
        self.max_depth.is_some_and(|max| depth > max)
    }

    fn is_pruned_dir(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }
        let named = entry
            .file_name()
            .to_str()
            .is_some_and(|name| self.dirs.contains(name));
        named || self.exceeds_depth(entry.depth()) || self.ignored_as(entry.path(), true).is_some()
    }

    /// Every file to consider, in sorted walk order.
    pub fn collect_files(&self) -> Vec<PathBuf> {
        if self.base_path.is_file() {
            return vec![self.base_path.clone()];
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(&self.base_path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_pruned_dir(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable path");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(pattern) = self.ignored_as(entry.path(), false) {
                tracing::warn!(
                    path = %entry.path().display(),
                    pattern,
                    "ignoring file because of exclusion filter"
                );
                continue;
            }
            files.push(entry.into_path());
        }
        files
    }
}

/// Directory holding `.git`, searching `start` and its ancestors.
pub fn find_git_root(start: &Path) -> Option<PathBuf> {
    let start = fs::canonicalize(start).unwrap_or_else(|_| start.to_path_buf());
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

/// Matcher for the root `.gitignore` of the repository at `root`.
fn load_gitignore(root: &Path) -> Option<Gitignore> {
    let file = root.join(".gitignore");
    if !file.is_file() {
        return None;
    }

    let mut builder = GitignoreBuilder::new(root);
    if let Some(err) = builder.add(&file) {
        tracing::warn!(path = %file.display(), error = %err, "partially invalid .gitignore");
    }
    match builder.build() {
        Ok(gitignore) => Some(gitignore),
        Err(err) => {
            tracing::warn!(path = %file.display(), error = %err, "failed to load .gitignore");
            None
        }
    }
}
