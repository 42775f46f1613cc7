//! Cross-document link normalization.
//!
//! Reference documents link to each other with relative targets such as
//! `[Account](models/Account)`. The web app serves them under a fixed prefix
//! with lower-case routes, so every parenthesized target is rewritten:
//!
//! | Input | Output |
//! |-------|--------|
//! | `(models/Account)` | `(/baas/reference/models/account)` |
//! | `(/baas/reference/Models/Account)` | `(/baas/reference/models/account)` |
//!
//! Matching is non-greedy on `)`: a target containing a literal close-paren
//! is cut at the first one.

use crate::config::{GeneratorConfig, LinkWriteTarget};
use crate::types::{Artifact, DocumentRecord};
use regex::{Captures, Regex};
use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinkError {
    #[error("Cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

static LINK_TARGET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^)]+)\)").expect("link pattern is valid"));

/// Rewrite every parenthesized link target in `text` to carry `prefix`,
/// lower-cased. Targets already starting with `prefix` are only lower-cased.
pub fn rewrite_links(text: &str, prefix: &str) -> String {
    LINK_TARGET
        .replace_all(text, |caps: &Captures| {
            let target = &caps[1];
            if target.starts_with(prefix) {
                format!("({})", target.to_lowercase())
            } else {
                format!("({}{})", prefix, target).to_lowercase()
            }
        })
        .into_owned()
}

/// Where the rewritten copy of `record` goes.
fn link_output_path(record: &DocumentRecord, config: &GeneratorConfig) -> PathBuf {
    match config.links.write_target {
        LinkWriteTarget::Source => config.document_file(&record.path),
        LinkWriteTarget::Name => PathBuf::from(&record.name),
    }
}

fn link_artifact(record: &DocumentRecord, config: &GeneratorConfig) -> Result<Artifact, LinkError> {
    let source = config.document_file(&record.path);
    let content = fs::read_to_string(&source).map_err(|e| LinkError::Read {
        path: source.clone(),
        source: e,
    })?;
    Ok(Artifact::new(
        link_output_path(record, config),
        rewrite_links(&content, &config.links.prefix),
    ))
}

/// Read every document, rewrite its links, and render the result as an
/// artifact bound for the configured write target. Nothing is written.
pub fn link_artifacts(
    records: &[DocumentRecord],
    config: &GeneratorConfig,
) -> Result<Vec<Artifact>, LinkError> {
    records
        .iter()
        .map(|record| link_artifact(record, config))
        .collect()
}

/// Rewrite links in every document and write the results.
///
/// Documents are processed one at a time: each is read, rewritten, and
/// written before the next is touched. No backup is kept.
pub fn update_links(
    records: &[DocumentRecord],
    config: &GeneratorConfig,
) -> Result<Vec<Artifact>, LinkError> {
    let mut written = Vec::with_capacity(records.len());
    for record in records {
        let artifact = link_artifact(record, config)?;
        artifact.write().map_err(|e| LinkError::Write {
            path: artifact.path.clone(),
            source: e,
        })?;
        written.push(artifact);
    }
    Ok(written)
}
