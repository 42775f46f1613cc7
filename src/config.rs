//! Generator configuration.
//!
//! Every location the generator reads from or writes to is a field of
//! [`GeneratorConfig`], passed explicitly into each task. Values come from an
//! optional TOML file layered over stock defaults:
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! reference_dir = "../../baas_content/reference"
//! routes_file = "../../src/routes/ReferenceRoutes.tsx"
//! page_dir = "../../src/Baas/Page/Reference"
//! menu_file = "../../src/Baas/components/LayoutAtoms/SubMenuReference.tsx"
//! markdown_offset = "../../../../baas_content/reference"
//!
//! [links]
//! prefix = "/baas/reference/"
//! write_target = "source"
//!
//! [summarizer]
//! model = "claude-3-opus-20240229"
//! max_tokens = 1000
//! ```
//!
//! Config files are sparse: override just the values you want. Relative paths
//! resolve against the working directory. Unknown keys are rejected to catch
//! typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Default config file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "refgen.toml";

/// Generator configuration.
///
/// All fields have defaults matching the web app's layout; a config file need
/// only name what differs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Directory scanned for markdown documents.
    pub reference_dir: PathBuf,
    /// Output path of the generated route table.
    pub routes_file: PathBuf,
    /// Directory receiving one page component per document.
    pub page_dir: PathBuf,
    /// Output path of the generated submenu component.
    pub menu_file: PathBuf,
    /// Path from `page_dir` back to `reference_dir`, as written in imports.
    pub markdown_offset: String,
    /// Document file extension, without the dot.
    pub document_extension: String,
    /// Page component file extension, without the dot.
    pub component_extension: String,
    /// Module prefix the route table imports page components from.
    pub page_import_prefix: String,
    /// Module exporting the markdown rendering component.
    pub renderer_module: String,
    /// Component mounted at the root route `/`.
    pub index_component: String,
    /// Per-folder overview file name.
    pub overview_file: String,
    pub links: LinksConfig,
    pub menu: MenuConfig,
    pub summarizer: SummarizerConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            reference_dir: PathBuf::from("../../baas_content/reference"),
            routes_file: PathBuf::from("../../src/routes/ReferenceRoutes.tsx"),
            page_dir: PathBuf::from("../../src/Baas/Page/Reference"),
            menu_file: PathBuf::from("../../src/Baas/components/LayoutAtoms/SubMenuReference.tsx"),
            markdown_offset: "../../../../baas_content/reference".to_string(),
            document_extension: "md".to_string(),
            component_extension: "tsx".to_string(),
            page_import_prefix: "~/Baas/Page/Reference".to_string(),
            renderer_module: "~/Baas/components/MDRenderer/MDRendererBaas".to_string(),
            index_component: "README".to_string(),
            overview_file: "README.md".to_string(),
            links: LinksConfig::default(),
            menu: MenuConfig::default(),
            summarizer: SummarizerConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Validate config values are usable by the emitters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, ext) in [
            ("document_extension", &self.document_extension),
            ("component_extension", &self.component_extension),
        ] {
            if ext.is_empty() || ext.starts_with('.') {
                return Err(ConfigError::Validation(format!(
                    "{key} must be non-empty and given without a leading dot"
                )));
            }
        }
        if !self.links.prefix.starts_with('/') || !self.links.prefix.ends_with('/') {
            return Err(ConfigError::Validation(
                "links.prefix must start and end with '/'".into(),
            ));
        }
        if self.summarizer.max_tokens == 0 {
            return Err(ConfigError::Validation(
                "summarizer.max_tokens must be greater than 0".into(),
            ));
        }
        if self.index_component.is_empty() {
            return Err(ConfigError::Validation(
                "index_component must not be empty".into(),
            ));
        }
        if self.overview_file.is_empty() {
            return Err(ConfigError::Validation(
                "overview_file must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Source file of a document: `<reference_dir>/<path>.<ext>`.
    pub fn document_file(&self, path: &str) -> PathBuf {
        self.reference_dir
            .join(format!("{}.{}", path, self.document_extension))
    }
}

/// Where the link normalizer writes rewritten documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkWriteTarget {
    /// Overwrite the document it was read from.
    #[default]
    Source,
    /// Write to the bare document name, relative to the working directory.
    Name,
}

/// Link rewriting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinksConfig {
    /// Canonical prefix every intra-document link target must carry.
    pub prefix: String,
    pub write_target: LinkWriteTarget,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            prefix: "/baas/reference/".to_string(),
            write_target: LinkWriteTarget::Source,
        }
    }
}

/// Submenu settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MenuConfig {
    /// Dropdown button label.
    pub label: String,
    /// Top-level path the dropdown links to.
    pub path: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            label: "API Reference".to_string(),
            path: "/baas/reference".to_string(),
        }
    }
}

/// Text-generation API settings for the overview backfiller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SummarizerConfig {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub api_url: String,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            model: "claude-3-opus-20240229".to_string(),
            max_tokens: 1000,
            temperature: 0.0,
            api_url: "https://api.anthropic.com/v1/messages".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(GeneratorConfig::default())
        .map_err(|e| ConfigError::Validation(format!("stock defaults do not serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<GeneratorConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: GeneratorConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from a TOML file, falling back to stock defaults when the
/// file does not exist.
pub fn load_config(path: &Path) -> Result<GeneratorConfig, ConfigError> {
    resolve_config(load_raw_config(path)?)
}

/// Returns a fully-commented stock `refgen.toml` with all keys and explanations.
pub fn stock_config_toml() -> &'static str {
    r##"# refgen configuration
# ====================
# All settings are optional. Values shown below are the defaults.
# Relative paths resolve against the directory refgen is run from.
# Unknown keys will cause an error.

# Directory scanned (recursively) for markdown documents.
# Entries whose name starts with "." are ignored.
reference_dir = "../../baas_content/reference"

# Generated route table (-generateRoutes).
routes_file = "../../src/routes/ReferenceRoutes.tsx"

# Directory receiving one page component per document (-generateDocComponents).
page_dir = "../../src/Baas/Page/Reference"

# Generated submenu component (-generateSubMenus).
menu_file = "../../src/Baas/components/LayoutAtoms/SubMenuReference.tsx"

# Path from page_dir back to reference_dir, used in markdown imports.
markdown_offset = "../../../../baas_content/reference"

# File extensions, without the leading dot.
document_extension = "md"
component_extension = "tsx"

# Module prefix the route table imports page components from.
page_import_prefix = "~/Baas/Page/Reference"

# Module exporting the DocumentationPageCode markdown renderer.
renderer_module = "~/Baas/components/MDRenderer/MDRendererBaas"

# Component mounted at the root route "/".
index_component = "README"

# Per-folder overview drafted by -generateMenus when missing.
overview_file = "README.md"

# ---------------------------------------------------------------------------
# Link rewriting (-updateLinks)
# ---------------------------------------------------------------------------
[links]
# Prefix added to every parenthesized link target that lacks it.
prefix = "/baas/reference/"

# "source" overwrites the document in place.
# "name" writes to the bare document name in the working directory.
write_target = "source"

# ---------------------------------------------------------------------------
# Submenu (-generateSubMenus)
# ---------------------------------------------------------------------------
[menu]
label = "API Reference"
path = "/baas/reference"

# ---------------------------------------------------------------------------
# Overview drafting (-generateMenus)
# The API key is read from the ANTHROPIC_API_KEY environment variable.
# ---------------------------------------------------------------------------
[summarizer]
model = "claude-3-opus-20240229"
max_tokens = 1000
temperature = 0.0
api_url = "https://api.anthropic.com/v1/messages"
"##
}
