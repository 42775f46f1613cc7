//! Shared types passed between the scanner and the generation tasks.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A markdown document discovered under the reference directory.
///
/// - `name`: file stem (`Accounts` for `apis/Accounts.md`)
/// - `path`: root-relative location, `/`-separated, extension stripped
///   (`apis/Accounts`). Never starts with a separator.
///
/// Base names may repeat across folders; `path` disambiguates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub name: String,
    pub path: String,
}

impl DocumentRecord {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// One dropdown group in the generated submenu.
///
/// Serialized verbatim into the menu component, so field names are part of
/// the output format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuGroup {
    /// Capitalized category label (`apis` → `Apis`)
    pub name: String,
    /// Absolute menu paths, one per document in the category
    pub paths: Vec<String>,
}

/// A generated file: where it goes and what it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub content: String,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Write the artifact, creating parent directories as needed.
    ///
    /// Always overwrites: re-running a task replaces previous output.
    pub fn write(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, &self.content)
    }
}
