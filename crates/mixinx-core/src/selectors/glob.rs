//! Glob patterns for id and path selectors
//!
//! Only `*` is special. In id patterns `*` matches any run of characters.
//! In path patterns `*` stays within one `/`-separated segment and a `**`
//! segment matches across segment boundaries. Patterns are validated and
//! compiled to anchored regexes when the selector is built, so traversal
//! never fails on a bad pattern.

use crate::errors::{MixinError, Result};
use crate::tree::PATH_SEPARATOR;

/// What a glob is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobMode {
    /// A single local id segment
    Id,
    /// A full `/`-joined node path
    Path,
}

/// A validated, compiled glob pattern
#[derive(Debug, Clone)]
pub struct Glob {
    pattern: String,
    mode: GlobMode,
    regex: regex_lite::Regex,
}

impl Glob {
    /// Compile a pattern for matching local node ids
    ///
    /// # Errors
    ///
    /// Returns `InvalidGlob` if the pattern is empty, contains `/`, contains
    /// `**`, or has a run of three or more `*`.
    pub fn id(pattern: &str) -> Result<Self> {
        Self::compile(pattern, GlobMode::Id)
    }

    /// Compile a pattern for matching full node paths
    ///
    /// # Errors
    ///
    /// Returns `InvalidGlob` if the pattern is empty, has a run of three or
    /// more `*`, or uses `**` inside a segment (e.g. `a**`).
    pub fn path(pattern: &str) -> Result<Self> {
        Self::compile(pattern, GlobMode::Path)
    }

    fn compile(pattern: &str, mode: GlobMode) -> Result<Self> {
        validate(pattern, mode)?;

        let mut source = String::from("^");
        let mut chars = pattern.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '*' {
                source.push_str(&regex_lite::escape(&c.to_string()));
                continue;
            }
            if chars.peek() == Some(&'*') {
                chars.next();
                source.push_str(".*");
            } else {
                source.push_str("[^/]*");
            }
        }
        source.push('$');

        let regex = regex_lite::Regex::new(&source).map_err(|e| MixinError::InvalidGlob {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            pattern: pattern.to_string(),
            mode,
            regex,
        })
    }

    /// The pattern as written
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn mode(&self) -> GlobMode {
        self.mode
    }

    /// Check whether `candidate` matches the whole pattern
    pub fn is_match(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }
}

fn validate(pattern: &str, mode: GlobMode) -> Result<()> {
    let invalid = |reason: &str| {
        Err(MixinError::InvalidGlob {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        })
    };

    if pattern.is_empty() {
        return invalid("pattern is empty");
    }
    if pattern.contains("***") {
        return invalid("more than two consecutive '*'");
    }

    match mode {
        GlobMode::Id => {
            if pattern.contains(PATH_SEPARATOR) {
                return invalid("id patterns match a single segment and cannot contain '/'");
            }
            if pattern.contains("**") {
                return invalid("'**' is only valid in path patterns");
            }
        }
        GlobMode::Path => {
            let misplaced = pattern
                .split(PATH_SEPARATOR)
                .any(|segment| segment.contains("**") && segment != "**");
            if misplaced {
                return invalid("'**' must occupy a whole path segment");
            }
        }
    }

    Ok(())
}
