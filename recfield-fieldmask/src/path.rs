//! The dotted path language.
//!
//! A path is a `.`-separated list of segments. Wrapping a segment in
//! backticks makes it literal, so map keys may contain dots:
//! ``a_map.`entry.key`.name`` addresses `a_map["entry.key"].name`.

/// Splits a path into its segments.
///
/// Backticks toggle literal mode and are stripped from the output. Empty
/// segments are dropped, and an unterminated backtick still emits the
/// segment in progress. Never fails.
#[must_use]
pub fn split_path(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut literal = false;

    for ch in path.chars() {
        match ch {
            '`' => literal = !literal,
            '.' if !literal => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Wraps a map key in backticks, as it appears inside a path.
#[must_use]
pub fn quote_segment(key: &str) -> String {
    format!("`{key}`")
}

/// Appends `segment` to `parent`, inserting a separator unless `parent` is
/// the root (empty) path.
#[must_use]
pub fn join_path(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_string()
    } else {
        format!("{parent}.{segment}")
    }
}
