use std::fmt;

use serde::{Deserialize, Serialize};

/// The path that stands for "every field". Only valid as a mask's sole path.
pub const WILDCARD_PATH: &str = "*";

/// A collection of field paths scoping which parts of a record an operation
/// may touch.
///
/// Order is preserved: [`crate::get`] returns values aligned with it.
/// Serializes as `{"paths": ["a", "b.c"]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMask {
    #[serde(default)]
    paths: Vec<String>,
}

impl FieldMask {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// The full-replacement mask `{"*"}`.
    #[must_use]
    pub fn wildcard() -> Self {
        Self::new([WILDCARD_PATH])
    }

    /// Parses the comma-separated form used in query strings and JSON
    /// (`"title,author.name"`). Whitespace around paths is trimmed and empty
    /// entries are skipped.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        Self::new(s.split(',').map(str::trim).filter(|p| !p.is_empty()))
    }

    #[must_use]
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Returns true if `path` appears in the mask verbatim.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    /// Returns true if any path is the wildcard.
    #[must_use]
    pub fn has_wildcard(&self) -> bool {
        self.contains(WILDCARD_PATH)
    }

    /// Returns true if the mask is exactly `{"*"}`.
    #[must_use]
    pub fn is_full_replacement(&self) -> bool {
        self.paths.len() == 1 && self.paths[0] == WILDCARD_PATH
    }

    /// Returns true if a field at `path` falls under this mask: the mask is
    /// empty, holds the wildcard, or names `path` exactly. A parent path does
    /// not cover its children.
    #[must_use]
    pub fn covers(&self, path: &str) -> bool {
        self.is_empty() || self.has_wildcard() || self.contains(path)
    }
}

/// Returns true if `mask` requests a full replacement (`{"*"}`).
#[must_use]
pub fn is_full_replacement(mask: &FieldMask) -> bool {
    mask.is_full_replacement()
}

impl fmt::Display for FieldMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.paths.join(","))
    }
}

impl<S: Into<String>> FromIterator<S> for FieldMask {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
