//! Reference directory scanning.
//!
//! Walks the reference directory and yields one [`DocumentRecord`] per
//! markdown document. Every generation task starts from this list.
//!
//! ```text
//! reference/                    # Scan root
//! ├── README.md                 # → { name: "README",   path: "README" }
//! ├── apis/
//! │   ├── accounts.md           # → { name: "accounts", path: "apis/accounts" }
//! │   └── payments.md           # → { name: "payments", path: "apis/payments" }
//! ├── models/
//! │   └── Account.md            # → { name: "Account",  path: "models/Account" }
//! ├── .drafts/                  # Hidden: skipped with everything inside
//! │   └── wip.md
//! └── notes.txt                 # Not a document: skipped
//! ```
//!
//! Entries are visited in file-name order so that every artifact built from
//! the scan is reproducible across machines.

use crate::naming;
use crate::types::DocumentRecord;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Cannot read reference directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("No .{extension} files found in {}", .root.display())]
    NoDocuments { root: PathBuf, extension: String },
}

/// Lazily walk `root` for documents with the given extension.
///
/// Hidden entries below the root are pruned, so a hidden directory is never
/// descended into. The iterator is finite and can be restarted by calling
/// this function again.
pub fn documents<'a>(
    root: &'a Path,
    extension: &'a str,
) -> impl Iterator<Item = Result<DocumentRecord, ScanError>> + 'a {
    WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden_entry(entry))
        .filter_map(move |entry| match entry {
            Ok(entry) => to_record(&entry, root, extension).map(Ok),
            Err(e) => Some(Err(ScanError::Walk(e))),
        })
}

/// Collect every document under `root`.
///
/// Fails with [`ScanError::NoDocuments`] when nothing qualifies: every
/// downstream task requires at least one document.
pub fn scan(root: &Path, extension: &str) -> Result<Vec<DocumentRecord>, ScanError> {
    let records = documents(root, extension).collect::<Result<Vec<_>, _>>()?;
    if records.is_empty() {
        return Err(ScanError::NoDocuments {
            root: root.to_path_buf(),
            extension: extension.to_string(),
        });
    }
    Ok(records)
}

fn is_hidden_entry(entry: &DirEntry) -> bool {
    naming::is_hidden(&entry.file_name().to_string_lossy())
}

fn to_record(entry: &DirEntry, root: &Path, extension: &str) -> Option<DocumentRecord> {
    if !entry.file_type().is_file() {
        return None;
    }
    let path = entry.path();
    let matches = path
        .extension()
        .map(|e| e == extension)
        .unwrap_or(false);
    if !matches {
        return None;
    }

    let name = path.file_stem()?.to_string_lossy().to_string();
    let relative = path.strip_prefix(root).ok()?.with_extension("");
    let segments: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect();

    Some(DocumentRecord {
        name,
        path: segments.join("/"),
    })
}
