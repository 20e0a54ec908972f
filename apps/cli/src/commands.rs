//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, eyre};
use docnav_core::{
    Corpus, Route, SearchOptions, build_toc, bundled, is_blank_query, load_corpus,
    render_page, resolve_route, search_with,
};
use docnav_shared::{AppConfig, init_config, load_config, load_config_from};
use tracing::{debug, info};

use crate::render::TextRenderer;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// docnav: browse and search a documentation corpus from the terminal.
#[derive(Parser)]
#[command(
    name = "docnav",
    version,
    about = "Browse and search a static documentation corpus.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Corpus JSON file (defaults to config `corpus.path`, then the bundled corpus).
    #[arg(long, env = "DOCNAV_CORPUS", global = true)]
    pub corpus: Option<PathBuf>,

    /// Config file (defaults to ~/.docnav/docnav.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Render the page at a route (`/section/page`); unknown parts fall back.
    Show {
        /// Route path, hash route, or URL. Defaults to the first page.
        route: Option<String>,
    },

    /// Search page titles and content.
    Search {
        /// Free-text query (case-insensitive substring).
        query: String,

        /// Show at most this many results.
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print results as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the navigation tree.
    Toc {
        /// Print the tree as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Check that a corpus file is well-formed and print its size.
    Validate {
        /// Corpus JSON file.
        path: PathBuf,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "docnav=warn",
        1 => "docnav=info",
        2 => "docnav=debug",
        _ => "docnav=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    match cli.command {
        Command::Show { route } => {
            let corpus = open_corpus(cli.corpus.as_deref(), &config)?;
            cmd_show(&corpus, route.as_deref())
        }
        Command::Search { query, limit, json } => {
            let corpus = open_corpus(cli.corpus.as_deref(), &config)?;
            cmd_search(&corpus, &config, &query, limit, json)
        }
        Command::Toc { json } => {
            let corpus = open_corpus(cli.corpus.as_deref(), &config)?;
            cmd_toc(&corpus, json)
        }
        Command::Validate { path } => cmd_validate(&path),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(&config),
        },
    }
}

/// Pick the corpus: `--corpus` flag, then config, then the bundled corpus.
fn open_corpus(flag: Option<&Path>, config: &AppConfig) -> Result<Corpus> {
    let path = flag
        .map(Path::to_path_buf)
        .or_else(|| config.corpus.path.as_ref().map(PathBuf::from));

    match path {
        Some(path) => load_corpus(&path)
            .wrap_err_with(|| format!("failed to load corpus from {}", path.display())),
        None => {
            debug!("using bundled corpus");
            Ok(bundled()?)
        }
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_show(corpus: &Corpus, route: Option<&str>) -> Result<()> {
    let requested = route.map(Route::parse).unwrap_or_default();
    let resolution = resolve_route(corpus, &requested);

    info!(requested = %requested, resolved = %resolution.route(), "showing page");

    if !resolution.is_exact() {
        println!(
            "(no page at {requested}, showing {} instead)\n",
            resolution.route()
        );
    }

    println!("{}", resolution.breadcrumb());
    println!();

    let mut renderer = TextRenderer::default();
    render_page(resolution.page, &mut renderer);
    print!("{}", renderer.finish());

    Ok(())
}

fn cmd_search(
    corpus: &Corpus,
    config: &AppConfig,
    query: &str,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let mut options = SearchOptions::from(&config.search);
    if limit.is_some() {
        options.limit = limit;
    }
    if options.limit == Some(0) {
        return Err(eyre!("--limit must be greater than zero"));
    }

    let results = search_with(corpus, query, &options);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if is_blank_query(query) {
        println!("Type a query to search the documentation.");
        return Ok(());
    }

    if results.is_empty() {
        println!("No results for \"{query}\".");
        return Ok(());
    }

    for result in &results {
        println!("{}", result.title);
        println!("  {}", Route::new(&result.section_id, &result.page_id));
        println!("  {}", result.snippet);
        println!();
    }
    println!(
        "{} result{}",
        results.len(),
        if results.len() == 1 { "" } else { "s" }
    );

    Ok(())
}

fn cmd_toc(corpus: &Corpus, json: bool) -> Result<()> {
    let toc = build_toc(corpus);

    if json {
        println!("{}", serde_json::to_string_pretty(&toc)?);
        return Ok(());
    }

    if let Some(name) = corpus.name() {
        println!("{name}");
        println!();
    }
    for section in &toc.sections {
        println!("{}", section.title);
        for page in &section.children {
            println!("  {:<40} {}", page.title, page.path);
        }
    }

    Ok(())
}

fn cmd_validate(path: &Path) -> Result<()> {
    let corpus = load_corpus(path)
        .wrap_err_with(|| format!("{} is not a valid corpus", path.display()))?;
    let stats = corpus.stats();

    println!("  Corpus is valid.");
    if let Some(name) = corpus.name() {
        println!("  Name:      {name}");
    }
    println!("  Sections:  {}", stats.sections);
    println!("  Pages:     {}", stats.pages);
    println!("  Blocks:    {}", stats.blocks);
    println!("  Malformed: {}", stats.malformed_blocks);

    for (section_id, page_id, block) in corpus.malformed_blocks() {
        if let docnav_shared::ContentBlock::Malformed { kind, .. } = block {
            println!("    /{section_id}/{page_id}: '{kind}' block with unexpected payload");
        }
    }

    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{toml_str}");
    Ok(())
}
