//! CLI output formatting for every task.
//!
//! Each report has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ```text
//! ==> Scanned 6 documents in ../../baas_content/reference
//!     README (1)
//!     apis (3)
//!     models (2)
//! ==> Page components
//!     Written: ../../src/Baas/Page/Reference/Accounts.tsx
//!     ...
//! ```

use crate::backfill::BackfillReport;
use crate::naming;
use crate::types::{Artifact, DocumentRecord};
use std::path::Path;

/// Hint printed when no task flag was given.
pub const USAGE_HINT: &str = "No valid flag provided. Available flags: \
-generateRoutes, -generateDocComponents, -updateLinks, -generateMenus, -generateSubMenus";

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// Scan
// ============================================================================

/// Summarize a scan: total, then one line per category with its count.
pub fn format_scan_output(records: &[DocumentRecord], root: &Path) -> Vec<String> {
    let mut lines = vec![format!(
        "==> Scanned {} in {}",
        plural(records.len(), "document"),
        root.display()
    )];
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for record in records {
        let category = naming::category(&record.path);
        match counts.iter_mut().find(|(c, _)| *c == category) {
            Some((_, n)) => *n += 1,
            None => counts.push((category, 1)),
        }
    }
    for (category, n) in counts {
        lines.push(format!("{}{} ({})", indent(1), category, n));
    }
    lines
}

pub fn print_scan_output(records: &[DocumentRecord], root: &Path) {
    for line in format_scan_output(records, root) {
        println!("{}", line);
    }
}

// ============================================================================
// Written artifacts
// ============================================================================

/// One header line for the task, then one `Written:` line per artifact.
pub fn format_written(task: &str, artifacts: &[Artifact]) -> Vec<String> {
    let mut lines = vec![format!("==> {task}")];
    lines.extend(
        artifacts
            .iter()
            .map(|a| format!("{}Written: {}", indent(1), a.path.display())),
    );
    lines.push(format!("{}{}", indent(1), plural(artifacts.len(), "file")));
    lines
}

pub fn print_written(task: &str, artifacts: &[Artifact]) {
    for line in format_written(task, artifacts) {
        println!("{}", line);
    }
}

/// Warning for a root route that points at a component no document provides.
pub fn format_missing_index(index_component: &str) -> String {
    format!(
        "{}Warning: no document provides the root route component '{index_component}'",
        indent(1)
    )
}

pub fn print_missing_index(index_component: &str) {
    println!("{}", format_missing_index(index_component));
}

/// Warning lines for component names shared by several documents.
pub fn format_duplicate_components(duplicates: &[(String, Vec<String>)]) -> Vec<String> {
    duplicates
        .iter()
        .map(|(name, paths)| {
            format!(
                "{}Warning: component '{name}' is derived from {} documents: {}",
                indent(1),
                paths.len(),
                paths.join(", ")
            )
        })
        .collect()
}

pub fn print_duplicate_components(duplicates: &[(String, Vec<String>)]) {
    for line in format_duplicate_components(duplicates) {
        println!("{}", line);
    }
}

// ============================================================================
// Backfill
// ============================================================================

pub fn format_backfill_report(report: &BackfillReport) -> Vec<String> {
    let mut lines = vec!["==> Folder overviews".to_string()];
    for artifact in &report.written {
        lines.push(format!("{}Generated: {}", indent(1), artifact.path.display()));
    }
    for folder in &report.skipped {
        lines.push(format!("{}Exists: {}", indent(1), folder.display()));
    }
    for (folder, error) in &report.failed {
        lines.push(format!("{}Failed: {}", indent(1), folder.display()));
        lines.push(format!("{}{}", indent(2), error));
    }
    lines.push(format!(
        "{}{} generated, {} skipped, {} failed",
        indent(1),
        report.written.len(),
        report.skipped.len(),
        report.failed.len()
    ));
    lines
}

pub fn print_backfill_report(report: &BackfillReport) {
    for line in format_backfill_report(report) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backfill::BackfillError;
    use std::path::PathBuf;

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "file"), "1 file");
        assert_eq!(plural(0, "file"), "0 files");
        assert_eq!(plural(3, "document"), "3 documents");
    }

    #[test]
    fn scan_output_lists_categories() {
        let records = vec![
            DocumentRecord::new("a", "apis/a"),
            DocumentRecord::new("b", "apis/b"),
            DocumentRecord::new("m", "Models/m"),
            DocumentRecord::new("README", "README"),
        ];
        let lines = format_scan_output(&records, Path::new("ref"));
        assert_eq!(
            lines,
            vec![
                "==> Scanned 4 documents in ref",
                "    apis (2)",
                "    Models (1)",
                "    README (1)",
            ]
        );
    }

    #[test]
    fn written_lines_per_artifact() {
        let artifacts = vec![
            Artifact::new("out/A.tsx", ""),
            Artifact::new("out/B.tsx", ""),
        ];
        let lines = format_written("Page components", &artifacts);
        assert_eq!(
            lines,
            vec![
                "==> Page components",
                "    Written: out/A.tsx",
                "    Written: out/B.tsx",
                "    2 files",
            ]
        );
    }

    #[test]
    fn missing_index_warning() {
        assert_eq!(
            format_missing_index("README"),
            "    Warning: no document provides the root route component 'README'"
        );
    }

    #[test]
    fn duplicate_component_warning() {
        let duplicates = vec![(
            "Account".to_string(),
            vec!["apis/account".to_string(), "models/account".to_string()],
        )];
        assert_eq!(
            format_duplicate_components(&duplicates),
            vec!["    Warning: component 'Account' is derived from 2 documents: apis/account, models/account"]
        );
        assert!(format_duplicate_components(&[]).is_empty());
    }

    #[test]
    fn backfill_report_lines() {
        let report = BackfillReport {
            written: vec![Artifact::new("ref/models/README.md", "# Models")],
            skipped: vec![PathBuf::from("ref/apis")],
            failed: vec![(
                PathBuf::from("ref/webhooks"),
                BackfillError::Io(std::io::Error::other("denied")),
            )],
        };
        let lines = format_backfill_report(&report);
        assert_eq!(
            lines,
            vec![
                "==> Folder overviews",
                "    Generated: ref/models/README.md",
                "    Exists: ref/apis",
                "    Failed: ref/webhooks",
                "        IO error: denied",
                "    1 generated, 1 skipped, 1 failed",
            ]
        );
    }

    #[test]
    fn usage_hint_names_every_flag() {
        for flag in [
            "-generateRoutes",
            "-generateDocComponents",
            "-updateLinks",
            "-generateMenus",
            "-generateSubMenus",
        ] {
            assert!(USAGE_HINT.contains(flag));
        }
    }
}
