//! # refgen
//!
//! Build-time generator for the API reference section of a web app. The
//! reference directory is the data source: every markdown file becomes a page,
//! a route, and a menu entry.
//!
//! # Architecture: Scan, Then One Task per Flag
//!
//! ```text
//! reference/  →  scan  →  Vec<DocumentRecord>  →  task  →  artifacts on disk
//! ```
//!
//! Every task starts from a fresh scan and runs to completion on its own:
//!
//! | Flag | Task | Output |
//! |------|------|--------|
//! | `-updateLinks` | [`links::update_links`] | documents rewritten in place |
//! | `-generateDocComponents` | [`generate::generate_components`] | one page component per document |
//! | `-generateRoutes` | [`generate::generate_routes`] | route table |
//! | `-generateSubMenus` | [`generate::generate_menu`] | submenu component |
//! | `-generateMenus` | [`backfill::backfill_overviews`] | missing folder `README.md` files |
//!
//! Templates are pure functions from typed data to text; writing happens
//! afterwards. Re-running a task on unchanged input rewrites identical bytes.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Walks the reference directory into [`types::DocumentRecord`]s |
//! | [`naming`] | Component name, URL path, and category derivation |
//! | [`links`] | Parenthesized link target rewriting |
//! | [`generate`] | Page component, route table, and submenu templates |
//! | [`backfill`] | Drafts missing folder overviews through a [`summarize::Summarizer`] |
//! | [`summarize`] | Summarizer trait and the Anthropic Messages API client |
//! | [`config`] | `refgen.toml` loading, defaults, and validation |
//! | [`types`] | Shared types (`DocumentRecord`, `MenuGroup`, `Artifact`) |
//! | [`output`] | CLI output formatting |

pub mod backfill;
pub mod config;
pub mod generate;
pub mod links;
pub mod naming;
pub mod output;
pub mod scan;
pub mod summarize;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
