//! Overview drafting for folders that lack one.
//!
//! Every folder holding at least one document should carry an overview
//! (`README.md`). For each folder without one, the sibling files are
//! concatenated and handed to a [`Summarizer`], and its answer is written
//! verbatim as the new overview.
//!
//! Folders are processed one at a time. A failed folder is recorded in the
//! [`BackfillReport`] and the remaining folders still run; the caller decides
//! what a failure means for the exit status.

use crate::config::GeneratorConfig;
use crate::naming;
use crate::summarize::{SummarizeError, Summarizer, SummaryRequest};
use crate::types::{Artifact, DocumentRecord};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackfillError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Summarizer error: {0}")]
    Summarize(#[from] SummarizeError),
}

const SYSTEM_PROMPT: &str = "\
You are an expert developer writing reference documentation for other developers.
You are precise and terse. You write well-formed Markdown and favour tables over prose.
Your goal is to share knowledge clearly and concisely.";

/// Outcome of one backfill run.
#[derive(Debug, Default)]
pub struct BackfillReport {
    /// Overviews drafted and written.
    pub written: Vec<Artifact>,
    /// Folders that already had an overview.
    pub skipped: Vec<PathBuf>,
    /// Folders whose overview could not be produced.
    pub failed: Vec<(PathBuf, BackfillError)>,
}

impl BackfillReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Distinct folders containing at least one document, in first-seen order.
pub fn overview_folders(records: &[DocumentRecord], reference_dir: &Path) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter_map(|r| reference_dir.join(&r.path).parent().map(Path::to_path_buf))
        .filter(|folder| seen.insert(folder.clone()))
        .collect()
}

/// Concatenate the folder's files, blank-line separated, skipping the
/// overview itself, hidden entries, and subdirectories.
pub fn folder_digest(folder: &Path, overview_file: &str) -> Result<String, std::io::Error> {
    let mut files: Vec<PathBuf> = fs::read_dir(folder)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            let name = p
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            p.is_file() && name != overview_file && !naming::is_hidden(&name)
        })
        .collect();
    files.sort();

    let contents = files
        .iter()
        .map(fs::read_to_string)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(contents.join("\n\n"))
}

/// Build the summarizer request for one folder.
pub fn overview_request(folder_name: &str, digest: &str, config: &GeneratorConfig) -> SummaryRequest {
    let prompt = format!(
        "Create a {overview} for the {folder_name} folder based on the files inside:\n\n\
         {digest}\n\n\
         Do not assume any other information, which is probably written elsewhere in the docs. \
         Create tables whenever possible. Do not output everything about the pages inside; \
         this is an overview, which is dry and technical but also complete.\n\n\
         Do not refer the reader elsewhere: no \"for detailed information\" or \
         \"please refer to the individual documentation\" sentences. \
         The reader will find the details by themselves.",
        overview = config.overview_file,
    );
    SummaryRequest {
        system: SYSTEM_PROMPT.to_string(),
        prompt,
        max_tokens: config.summarizer.max_tokens,
    }
}

fn draft_overview(
    folder: &Path,
    config: &GeneratorConfig,
    summarizer: &dyn Summarizer,
) -> Result<Artifact, BackfillError> {
    let digest = folder_digest(folder, &config.overview_file)?;
    let folder_name = folder
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let request = overview_request(&folder_name, &digest, config);
    let content = summarizer.summarize(&request)?;
    let artifact = Artifact::new(folder.join(&config.overview_file), content);
    artifact.write()?;
    Ok(artifact)
}

/// Draft a missing overview for every document folder.
///
/// Folders that already contain `config.overview_file` are skipped without
/// calling the summarizer.
pub fn backfill_overviews(
    records: &[DocumentRecord],
    config: &GeneratorConfig,
    summarizer: &dyn Summarizer,
) -> BackfillReport {
    let mut report = BackfillReport::default();
    for folder in overview_folders(records, &config.reference_dir) {
        if folder.join(&config.overview_file).exists() {
            report.skipped.push(folder);
            continue;
        }
        match draft_overview(&folder, config, summarizer) {
            Ok(artifact) => report.written.push(artifact),
            Err(e) => report.failed.push((folder, e)),
        }
    }
    report
}
