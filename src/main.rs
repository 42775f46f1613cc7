use clap::Parser;
use clap::error::ErrorKind;
use refgen::config::{self, GeneratorConfig};
use refgen::summarize::AnthropicSummarizer;
use refgen::types::DocumentRecord;
use refgen::{backfill, generate, links, output, scan};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "refgen")]
#[command(about = "Generate page components, routes, and menus for a markdown API reference")]
#[command(long_about = "\
Generate page components, routes, and menus for a markdown API reference

Every markdown file under the reference directory becomes a page component,
a route, and a submenu entry. Hidden entries (names starting with '.') are
ignored.

  reference/
  ├── README.md              # Mounted at the root route
  ├── apis/
  │   ├── README.md          # Folder overview (drafted by -generateMenus if missing)
  │   └── accounts.md        # → Accounts.tsx, route \"apis/accounts\"
  └── models/
      └── Account.md         # → Account.tsx, route \"models/account\"

Flags can be combined; each task runs against a fresh scan. The single-dash
spellings (-generateRoutes, ...) are accepted as aliases.

Run 'refgen --gen-config' to print a documented refgen.toml.")]
#[command(version)]
struct Cli {
    /// Config file (stock defaults are used when it does not exist)
    #[arg(long, default_value = config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Override the configured reference directory
    #[arg(long)]
    reference_dir: Option<PathBuf>,

    /// Rewrite links in every document to the canonical prefix
    #[arg(long)]
    update_links: bool,

    /// Generate one page component per document
    #[arg(long)]
    generate_doc_components: bool,

    /// Generate the route table
    #[arg(long)]
    generate_routes: bool,

    /// Generate the reference submenu
    #[arg(long)]
    generate_sub_menus: bool,

    /// Draft missing folder overviews with the summarizer
    #[arg(long)]
    generate_menus: bool,

    /// Print a stock refgen.toml with all options documented
    #[arg(long)]
    gen_config: bool,
}

impl Cli {
    fn has_task(&self) -> bool {
        self.update_links
            || self.generate_doc_components
            || self.generate_routes
            || self.generate_sub_menus
            || self.generate_menus
    }
}

/// Single-dash camelCase spellings and the long flags they stand for.
const LEGACY_FLAGS: [(&str, &str); 5] = [
    ("-generateRoutes", "--generate-routes"),
    ("-generateDocComponents", "--generate-doc-components"),
    ("-updateLinks", "--update-links"),
    ("-generateMenus", "--generate-menus"),
    ("-generateSubMenus", "--generate-sub-menus"),
];

/// Rewrite single-dash camelCase flags (`-generateRoutes`) to their long
/// kebab-case form (`--generate-routes`). Everything else passes through.
fn normalize_legacy_flags(args: impl IntoIterator<Item = String>) -> Vec<String> {
    args.into_iter()
        .map(|arg| {
            LEGACY_FLAGS
                .iter()
                .find(|(legacy, _)| *legacy == arg)
                .map(|(_, long)| long.to_string())
                .unwrap_or(arg)
        })
        .collect()
}

/// Whether any (normalized) argument names a task flag.
fn names_task(args: &[String]) -> bool {
    args.iter()
        .any(|arg| LEGACY_FLAGS.iter().any(|(_, long)| long == arg))
}

/// Parse the command line. Unknown arguments with no task flag among them
/// yield `None`: the caller prints the usage hint and exits successfully.
fn parse_cli(args: Vec<String>) -> Result<Option<Cli>, clap::Error> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => Ok(Some(cli)),
        Err(e) if e.kind() == ErrorKind::UnknownArgument && !names_task(&args) => Ok(None),
        Err(e) => Err(e),
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = match parse_cli(normalize_legacy_flags(std::env::args())) {
        Ok(Some(cli)) => cli,
        Ok(None) => {
            println!("{}", output::USAGE_HINT);
            return Ok(());
        }
        Err(e) => e.exit(),
    };

    if cli.gen_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    if !cli.has_task() {
        println!("{}", output::USAGE_HINT);
        return Ok(());
    }

    let mut config = config::load_config(&cli.config)?;
    if let Some(dir) = &cli.reference_dir {
        config.reference_dir = dir.clone();
    }

    if cli.update_links {
        let records = scan_documents(&config)?;
        let written = links::update_links(&records, &config)?;
        output::print_written("Links", &written);
    }

    if cli.generate_doc_components {
        let records = scan_documents(&config)?;
        let written = generate::generate_components(&records, &config)?;
        output::print_written("Page components", &written);
        output::print_duplicate_components(&generate::duplicate_components(&records));
    }

    if cli.generate_routes {
        let records = scan_documents(&config)?;
        let written = generate::generate_routes(&records, &config)?;
        output::print_written("Route table", std::slice::from_ref(&written));
        if !generate::has_index_component(&records, &config) {
            output::print_missing_index(&config.index_component);
        }
        output::print_duplicate_components(&generate::duplicate_components(&records));
    }

    if cli.generate_sub_menus {
        let records = scan_documents(&config)?;
        let written = generate::generate_menu(&records, &config)?;
        output::print_written("Submenu", std::slice::from_ref(&written));
    }

    if cli.generate_menus {
        let records = scan_documents(&config)?;
        let summarizer = AnthropicSummarizer::from_env(config.summarizer.clone())?;
        let report = backfill::backfill_overviews(&records, &config, &summarizer);
        output::print_backfill_report(&report);
        if !report.is_success() {
            return Err(format!("{} folder overview(s) failed", report.failed.len()).into());
        }
    }

    Ok(())
}

fn scan_documents(config: &GeneratorConfig) -> Result<Vec<DocumentRecord>, scan::ScanError> {
    let records = scan::scan(&config.reference_dir, &config.document_extension)?;
    output::print_scan_output(&records, &config.reference_dir);
    Ok(records)
}
