//! Shared test utilities for the refgen test suite.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let records = scan(tmp.path(), "md").unwrap();
//! let config = test_config(tmp.path());
//!
//! let account = find_record(&records, "models/Account");
//! assert_eq!(account.name, "Account");
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use tempfile::TempDir;

use crate::config::GeneratorConfig;
use crate::types::DocumentRecord;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/reference/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/reference");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write `content` to `root/relative`, creating parent directories.
pub fn write_doc(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

// =========================================================================
// Config
// =========================================================================

/// Stock config scanning `reference_dir`.
pub fn test_config(reference_dir: &Path) -> GeneratorConfig {
    GeneratorConfig {
        reference_dir: reference_dir.to_path_buf(),
        ..GeneratorConfig::default()
    }
}

/// Stock config scanning `reference_dir` and writing every artifact under `out`.
pub fn test_config_with_output(reference_dir: &Path, out: &Path) -> GeneratorConfig {
    GeneratorConfig {
        reference_dir: reference_dir.to_path_buf(),
        page_dir: out.join("pages"),
        routes_file: out.join("routes/ReferenceRoutes.tsx"),
        menu_file: out.join("menu/SubMenuReference.tsx"),
        ..GeneratorConfig::default()
    }
}

// =========================================================================
// Lookups: panic with a clear message on miss
// =========================================================================

/// Find a record by path. Panics if not found.
pub fn find_record<'a>(records: &'a [DocumentRecord], path: &str) -> &'a DocumentRecord {
    records.iter().find(|r| r.path == path).unwrap_or_else(|| {
        let paths: Vec<&str> = records.iter().map(|r| r.path.as_str()).collect();
        panic!("record '{path}' not found. Available: {paths:?}")
    })
}

/// Read every file directly inside `dir` into a name → content map.
pub fn read_dir_contents(dir: &Path) -> BTreeMap<String, String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.is_file())
        .map(|p| {
            let name = p.file_name().unwrap().to_string_lossy().to_string();
            (name, std::fs::read_to_string(&p).unwrap())
        })
        .collect()
}
