//! Source generation for the reference section of the web app.
//!
//! Three emitters turn the scanned document list into TSX source files:
//!
//! - **Page components** (`<page_dir>/<Name>.tsx`): one per document, loading
//!   the raw markdown and rendering it through `DocumentationPageCode`
//! - **Route table** (`routes_file`): every page component mounted at its
//!   lower-cased document path, plus the root route
//! - **Submenu** (`menu_file`): a dropdown grouping documents by their
//!   top-level folder
//!
//! ## Output Structure
//!
//! ```text
//! src/
//! ├── routes/
//! │   └── ReferenceRoutes.tsx            # Route table
//! └── Baas/
//!     ├── Page/Reference/
//!     │   ├── README.tsx                 # Page components
//!     │   ├── Accounts.tsx
//!     │   └── Account.tsx
//!     └── components/LayoutAtoms/
//!         └── SubMenuReference.tsx       # Submenu
//! ```
//!
//! ## Templates
//!
//! Each artifact is rendered by a pure function from typed data to text
//! (`render_*`) and written separately (`generate_*`), so the templates are
//! testable without touching the filesystem. Output depends only on the
//! document list and config: re-running produces byte-identical files.

use crate::config::GeneratorConfig;
use crate::naming;
use crate::types::{Artifact, DocumentRecord, MenuGroup};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn visible(records: &[DocumentRecord]) -> impl Iterator<Item = &DocumentRecord> {
    records.iter().filter(|r| !naming::is_hidden(&r.name))
}

fn write_all(artifacts: &[Artifact]) -> Result<(), GenerateError> {
    for artifact in artifacts {
        artifact.write()?;
    }
    Ok(())
}

// ============================================================================
// Page components
// ============================================================================

/// Render the page component for one document.
pub fn render_component(record: &DocumentRecord, config: &GeneratorConfig) -> String {
    let name = naming::component_name(&record.path);
    format!(
        r#"import React from 'react';
import {{ DocumentationPageCode }} from '{renderer}';
import markdownContent from '{markdown}';


const {name} = () => {{
    return <DocumentationPageCode fileContent={{markdownContent}} />;
}};

export default {name};"#,
        renderer = config.renderer_module,
        markdown = markdown_import(record, config),
    )
}

/// Import specifier for a document's raw markdown, as seen from `page_dir`.
fn markdown_import(record: &DocumentRecord, config: &GeneratorConfig) -> String {
    let offset = config.markdown_offset.trim_end_matches('/');
    let offset = if offset.starts_with("./") || offset.starts_with("../") {
        offset.to_string()
    } else {
        format!("./{offset}")
    };
    format!("{}/{}.{}", offset, record.path, config.document_extension)
}

/// One page component artifact per visible document.
pub fn component_artifacts(records: &[DocumentRecord], config: &GeneratorConfig) -> Vec<Artifact> {
    visible(records)
        .map(|record| {
            let name = naming::component_name(&record.path);
            Artifact::new(
                config
                    .page_dir
                    .join(format!("{}.{}", name, config.component_extension)),
                render_component(record, config),
            )
        })
        .collect()
}

/// Render and write every page component.
pub fn generate_components(
    records: &[DocumentRecord],
    config: &GeneratorConfig,
) -> Result<Vec<Artifact>, GenerateError> {
    let artifacts = component_artifacts(records, config);
    write_all(&artifacts)?;
    Ok(artifacts)
}

// ============================================================================
// Route table
// ============================================================================

/// Render the route table.
///
/// Routes keep input order and are not deduplicated. The root route always
/// points at `config.index_component`, whether or not a document provides it.
pub fn render_routes(records: &[DocumentRecord], config: &GeneratorConfig) -> String {
    let mut imports = Vec::new();
    let mut routes = Vec::new();

    for record in visible(records) {
        let name = naming::component_name(&record.path);
        imports.push(format!(
            "import {name} from '{}/{name}';",
            config.page_import_prefix.trim_end_matches('/')
        ));
        routes.push(format!(
            r#"<Route path="{}" element={{<{name} />}} />"#,
            naming::url_path(&record.path)
        ));
    }

    format!(
        r#"import React from 'react';
import {{ Routes, Route }} from 'react-router-dom';
{imports}

const ReferenceRoutes = () => (
    <Routes>
        <Route path="/" element={{<{index} />}} />
        {routes}
    </Routes>
);

export default ReferenceRoutes;"#,
        imports = imports.join("\n"),
        index = config.index_component,
        routes = routes.join("\n        "),
    )
}

/// Whether any visible document derives the component mounted at `/`.
pub fn has_index_component(records: &[DocumentRecord], config: &GeneratorConfig) -> bool {
    visible(records).any(|r| naming::component_name(&r.path) == config.index_component)
}

/// Component names derived by more than one visible document, each with the
/// document paths that share it, in scan order. Those documents write the
/// same page component file and import the same identifier in the route
/// table.
pub fn duplicate_components(records: &[DocumentRecord]) -> Vec<(String, Vec<String>)> {
    let mut order: Vec<String> = Vec::new();
    let mut paths: HashMap<String, Vec<String>> = HashMap::new();
    for record in visible(records) {
        let name = naming::component_name(&record.path);
        paths
            .entry(name.clone())
            .or_insert_with(|| {
                order.push(name.clone());
                Vec::new()
            })
            .push(record.path.clone());
    }
    order
        .into_iter()
        .filter_map(|name| {
            let shared = paths.remove(&name)?;
            (shared.len() > 1).then_some((name, shared))
        })
        .collect()
}

pub fn routes_artifact(records: &[DocumentRecord], config: &GeneratorConfig) -> Artifact {
    Artifact::new(&config.routes_file, render_routes(records, config))
}

/// Render and write the route table.
pub fn generate_routes(
    records: &[DocumentRecord],
    config: &GeneratorConfig,
) -> Result<Artifact, GenerateError> {
    let artifact = routes_artifact(records, config);
    artifact.write()?;
    Ok(artifact)
}

// ============================================================================
// Submenu
// ============================================================================

/// Group documents by category, keeping first-seen category order.
pub fn menu_groups(records: &[DocumentRecord]) -> Vec<MenuGroup> {
    let (order, members) = records.iter().fold(
        (Vec::<&str>::new(), HashMap::<&str, Vec<String>>::new()),
        |(mut order, mut members), record| {
            let category = naming::category(&record.path);
            members
                .entry(category)
                .or_insert_with(|| {
                    order.push(category);
                    Vec::new()
                })
                .push(format!("/{}", record.path));
            (order, members)
        },
    );

    order
        .into_iter()
        .map(|category| MenuGroup {
            name: naming::capitalize(category),
            paths: members.get(category).cloned().unwrap_or_default(),
        })
        .collect()
}

/// Render the submenu component with `groups` embedded as a JSON literal.
pub fn render_menu(groups: &[MenuGroup], config: &GeneratorConfig) -> Result<String, GenerateError> {
    let sub_menus = serde_json::to_string_pretty(groups)?;
    Ok(format!(
        r#"import React from 'react';
import {{ IntegrationIcon }} from '~/assets/icons';
import {{ BaasMenuDropdownButton }} from '~/Baas/components/Atoms/Buttons/BaasMenuDropDownButton';

export const Reference = () => {{
    return (
        <BaasMenuDropdownButton
            leftIcon={{<IntegrationIcon />}}
            name="{label}"
            subMenus={{{sub_menus}}}
            path="{path}"
        />
    );
}};

export default Reference;"#,
        label = config.menu.label,
        path = config.menu.path,
    ))
}

pub fn menu_artifact(
    records: &[DocumentRecord],
    config: &GeneratorConfig,
) -> Result<Artifact, GenerateError> {
    let groups = menu_groups(records);
    Ok(Artifact::new(&config.menu_file, render_menu(&groups, config)?))
}

/// Render and write the submenu.
pub fn generate_menu(
    records: &[DocumentRecord],
    config: &GeneratorConfig,
) -> Result<Artifact, GenerateError> {
    let artifact = menu_artifact(records, config)?;
    artifact.write()?;
    Ok(artifact)
}
