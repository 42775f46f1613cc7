//! End-to-end runs of the `refgen` binary.
//!
//! Each test builds a throwaway project in a temp dir: a reference directory,
//! a `refgen.toml` pointing every output inside the temp dir, and runs the
//! binary from there.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Project layout with outputs under `src/` and documents under `reference/`.
fn project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "refgen.toml",
        r#"
reference_dir = "reference"
routes_file = "src/routes/ReferenceRoutes.tsx"
page_dir = "src/pages"
menu_file = "src/menu/SubMenuReference.tsx"
markdown_offset = "../../reference"
"#,
    );
    tmp
}

fn with_documents(tmp: &TempDir) {
    write(tmp.path(), "reference/README.md", "# Reference");
    write(tmp.path(), "reference/apis/accounts.md", "[Account](models/Account)");
    write(tmp.path(), "reference/models/Account.md", "# Account");
}

fn refgen(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_refgen"))
        .args(args)
        .current_dir(dir)
        .env_remove("ANTHROPIC_API_KEY")
        .output()
        .unwrap()
}

#[test]
fn no_flags_prints_usage_and_succeeds() {
    let tmp = project();
    let out = refgen(tmp.path(), &[]);

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("No valid flag provided"));
    assert!(stdout.contains("-generateRoutes"));
}

#[test]
fn unknown_flag_prints_usage_and_succeeds() {
    let tmp = project();
    let out = refgen(tmp.path(), &["-generateEverything"]);

    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("No valid flag provided"));
}

#[test]
fn unknown_flag_next_to_task_fails() {
    let tmp = project();
    with_documents(&tmp);

    let out = refgen(tmp.path(), &["-generateRoutes", "--bogus"]);
    assert!(!out.status.success());
    assert!(!tmp.path().join("src").exists());
}

#[test]
fn upper_case_extension_not_scanned() {
    let tmp = project();
    with_documents(&tmp);
    write(tmp.path(), "reference/apis/Upper.MD", "[A](models/Account)");

    let out = refgen(tmp.path(), &["-updateLinks", "-generateDocComponents"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(!tmp.path().join("src/pages/Upper.tsx").exists());
    let doc = fs::read_to_string(tmp.path().join("reference/apis/Upper.MD")).unwrap();
    assert_eq!(doc, "[A](models/Account)");
}

#[test]
fn duplicate_component_names_warn() {
    let tmp = project();
    with_documents(&tmp);
    write(tmp.path(), "reference/apis/account.md", "# Account API");

    let out = refgen(tmp.path(), &["-generateRoutes"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Warning: component 'Account' is derived from 2 documents"));
}

#[test]
fn empty_reference_dir_fails_without_writing() {
    let tmp = project();
    fs::create_dir_all(tmp.path().join("reference")).unwrap();
    write(tmp.path(), "reference/notes.txt", "not a document");

    let out = refgen(
        tmp.path(),
        &["-generateRoutes", "-generateDocComponents", "-generateSubMenus"],
    );

    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Error: No .md files found in reference"));
    assert!(!tmp.path().join("src").exists());
}

#[test]
fn legacy_flags_generate_routes_and_components() {
    let tmp = project();
    with_documents(&tmp);

    let out = refgen(tmp.path(), &["-generateRoutes", "-generateDocComponents"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let routes = fs::read_to_string(tmp.path().join("src/routes/ReferenceRoutes.tsx")).unwrap();
    assert!(routes.contains(r#"<Route path="/" element={<README />} />"#));
    assert!(routes.contains(r#"<Route path="apis/accounts" element={<Accounts />} />"#));
    assert!(routes.contains(r#"<Route path="models/account" element={<Account />} />"#));

    let page = fs::read_to_string(tmp.path().join("src/pages/Account.tsx")).unwrap();
    assert!(page.contains("import markdownContent from '../../reference/models/Account.md';"));
}

#[test]
fn missing_index_document_warns() {
    let tmp = project();
    write(tmp.path(), "reference/apis/accounts.md", "# Accounts");

    let out = refgen(tmp.path(), &["-generateRoutes"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Warning: no document provides"));
}

#[test]
fn sub_menus_written() {
    let tmp = project();
    with_documents(&tmp);

    let out = refgen(tmp.path(), &["--generate-sub-menus"]);
    assert!(out.status.success());

    let menu = fs::read_to_string(tmp.path().join("src/menu/SubMenuReference.tsx")).unwrap();
    assert!(menu.contains(r#""name": "Apis""#));
    assert!(menu.contains(r#""/models/Account""#));
}

#[test]
fn update_links_rewrites_in_place() {
    let tmp = project();
    with_documents(&tmp);

    let out = refgen(tmp.path(), &["-updateLinks"]);
    assert!(out.status.success());

    let doc = fs::read_to_string(tmp.path().join("reference/apis/accounts.md")).unwrap();
    assert_eq!(doc, "[Account](/baas/reference/models/account)");
}

#[test]
fn generate_menus_requires_api_key() {
    let tmp = project();
    with_documents(&tmp);

    let out = refgen(tmp.path(), &["-generateMenus"]);
    assert!(!out.status.success());
    assert!(!tmp.path().join("reference/models/README.md").exists());
}

#[test]
fn gen_config_prints_stock_file() {
    let tmp = TempDir::new().unwrap();
    let out = refgen(tmp.path(), &["--gen-config"]);

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("reference_dir = "));
    assert!(stdout.contains("[summarizer]"));
}

#[test]
fn invalid_config_fails() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "refgen.toml", "unknown_key = 1\n");

    let out = refgen(tmp.path(), &["-generateRoutes"]);
    assert!(!out.status.success());
}
