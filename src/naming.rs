//! Name and URL derivation for reference documents.
//!
//! Every generated identifier, route, and menu label comes from a document's
//! relative path (`apis/accounts`). The rules are deliberately minimal:
//!
//! - `apis/accounts` → component `Accounts` (first character upper-cased)
//! - `Apis/Accounts` → URL `apis/accounts` (whole path lower-cased)
//! - `apis/accounts` → category `apis` (first segment)
//!
//! Only the case transform is guaranteed. File names containing characters
//! that are not valid identifiers pass through untouched.

/// Marker prefix for hidden files and directories.
pub const HIDDEN_MARKER: char = '.';

/// Component identifier for a document path: the final segment with its first
/// character upper-cased and every other character unchanged.
pub fn component_name(path: &str) -> String {
    capitalize(last_segment(path))
}

/// URL segment for a document path: the full relative path lower-cased.
pub fn url_path(path: &str) -> String {
    path.to_lowercase()
}

/// Menu category for a document path: its first segment.
///
/// Root-level documents are their own category.
pub fn category(path: &str) -> &str {
    path.split('/').next().unwrap_or(path)
}

/// Upper-case the first character, leave the rest alone.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Whether a file or directory name is hidden (`.drafts`, `.DS_Store`).
pub fn is_hidden(name: &str) -> bool {
    name.starts_with(HIDDEN_MARKER)
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
