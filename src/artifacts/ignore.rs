//! Ignore patterns and `.witignore` loading
//!
//! A path is excluded from every tracking operation when any pattern in the
//! active [`IgnoreSet`] matches its relative path. Three pattern flavors
//! exist:
//!
//! - `Contains`: substring containment over the full relative path string.
//!   This is the historical `.witignore` matching policy and every plain
//!   pattern line still parses to it, so existing ignore files behave
//!   identically.
//! - `Glob`: pattern lines holding `*`, `?` or `[` are matched as globs
//!   against the whole relative path and against its file name; `*` and `?`
//!   do not cross `/`.
//! - `Segment`: matches one whole path component. Used for the built-in
//!   defaults (`.wit`, `.git`, `__pycache__`), where containment would be
//!   too eager.

use anyhow::Context;
use regex::Regex;
use std::path::Path;

/// One ignore rule.
#[derive(Debug, Clone)]
pub enum IgnorePattern {
    Contains(String),
    Segment(String),
    Glob { source: String, matcher: Regex },
}

impl IgnorePattern {
    /// Parse a single `.witignore` pattern line.
    ///
    /// Lines containing glob metacharacters become [`IgnorePattern::Glob`];
    /// everything else keeps the containment semantics. A line that looks like
    /// a glob but does not compile (an unclosed `[`, say) was a valid plain
    /// pattern under the containment policy, so it falls back to
    /// [`IgnorePattern::Contains`] instead of poisoning the whole set.
    pub fn parse(line: &str) -> Self {
        if line.contains(['*', '?', '[']) {
            if let Some(matcher) = Self::compile_glob(line) {
                return IgnorePattern::Glob {
                    source: line.to_string(),
                    matcher,
                };
            }
        }

        IgnorePattern::Contains(line.to_string())
    }

    pub fn segment(name: impl Into<String>) -> Self {
        IgnorePattern::Segment(name.into())
    }

    pub fn matches(&self, relative_path: &Path) -> bool {
        let path_str = relative_path.to_string_lossy();

        match self {
            IgnorePattern::Contains(pattern) => path_str.contains(pattern.as_str()),
            IgnorePattern::Segment(name) => relative_path.components().any(|component| {
                matches!(
                    component,
                    std::path::Component::Normal(n) if n.to_string_lossy() == name.as_str()
                )
            }),
            IgnorePattern::Glob { matcher, .. } => {
                if matcher.is_match(&path_str) {
                    return true;
                }

                relative_path
                    .file_name()
                    .is_some_and(|name| matcher.is_match(&name.to_string_lossy()))
            }
        }
    }

    // `*` -> any run of non-separator chars, `?` -> one non-separator char,
    // `[...]` passes through as a regex character class.
    fn compile_glob(pattern: &str) -> Option<Regex> {
        let mut regex = String::with_capacity(pattern.len() + 8);
        regex.push('^');

        let mut chars = pattern.chars();
        while let Some(c) = chars.next() {
            match c {
                '*' => regex.push_str("[^/]*"),
                '?' => regex.push_str("[^/]"),
                '[' => {
                    regex.push('[');
                    for inner in chars.by_ref() {
                        regex.push(inner);
                        if inner == ']' {
                            break;
                        }
                    }
                }
                c if "\\.+()|{}^$".contains(c) => {
                    regex.push('\\');
                    regex.push(c);
                }
                c => regex.push(c),
            }
        }
        regex.push('$');

        Regex::new(&regex).ok()
    }
}

impl std::fmt::Display for IgnorePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IgnorePattern::Contains(pattern) => write!(f, "{}", pattern),
            IgnorePattern::Segment(name) => write!(f, "{}", name),
            IgnorePattern::Glob { source, .. } => write!(f, "{}", source),
        }
    }
}

/// The active set of ignore rules for a repository.
#[derive(Debug, Clone)]
pub struct IgnoreSet {
    patterns: Vec<IgnorePattern>,
}

impl IgnoreSet {
    /// Paths never tracked regardless of `.witignore` contents.
    const DEFAULT_SEGMENTS: [&'static str; 3] = [".wit", ".git", "__pycache__"];

    /// Build the ignore set for a repository root, reading the optional
    /// `.witignore` file next to it.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn load(root: &Path) -> anyhow::Result<Self> {
        let mut patterns = Self::DEFAULT_SEGMENTS
            .into_iter()
            .map(IgnorePattern::segment)
            .collect::<Vec<_>>();

        let witignore = root.join(".witignore");
        if witignore.exists() {
            let contents = std::fs::read_to_string(&witignore)
                .with_context(|| format!("failed to read {:?}", witignore))?;

            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                patterns.push(IgnorePattern::parse(line));
            }
        }

        Ok(IgnoreSet { patterns })
    }

    pub fn from_patterns(patterns: Vec<IgnorePattern>) -> Self {
        IgnoreSet { patterns }
    }

    pub fn is_ignored(&self, relative_path: &Path) -> bool {
        self.patterns
            .iter()
            .any(|pattern| pattern.matches(relative_path))
    }
}
