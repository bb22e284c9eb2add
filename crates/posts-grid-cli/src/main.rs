//! `posts-grid` command-line tool.
//!
//! Commands:
//! - `render`:         Render grid directives against a content file
//! - `css`:            Print the head style block for a settings file
//! - `query`:          Show the content query a directive would run
//! - `preview-script`: Print the live-preview binding script
//! - `defaults`:       Print every option with its default value

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};

use posts_grid::{
    build_query, head_style_block, preview_script, resolve, Field, GridRequest, MemoryRepository,
    MemoryStore, PageRenderer, SettingsStore, DIRECTIVES,
};
use posts_grid_shortcode::{Segment, ShortcodeParser};

#[derive(Parser)]
#[command(
    name = "posts-grid",
    about = "Render blog post grids, stylesheets and query specs",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct SettingsArg {
    /// Settings file (.yaml, .yml or .json); defaults apply when omitted
    #[arg(short, long)]
    settings: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render grid directives found in a page or given inline
    Render {
        /// Content items file (.yaml, .yml or .json)
        #[arg(short, long)]
        content: PathBuf,

        #[command(flatten)]
        settings: SettingsArg,

        /// Page file whose directives are expanded
        #[arg(short, long, conflicts_with = "shortcode")]
        page: Option<PathBuf>,

        /// Directive text to render, e.g. '[posts_grid count="6"]'
        #[arg(long)]
        shortcode: Option<String>,

        /// Prepend the head style block
        #[arg(long)]
        with_styles: bool,
    },

    /// Print the head style block
    Css {
        #[command(flatten)]
        settings: SettingsArg,
    },

    /// Print the content query for a directive as JSON
    Query {
        #[command(flatten)]
        settings: SettingsArg,

        /// Directive text, e.g. '[posts_grid specific_posts="1,2"]'
        #[arg(long)]
        shortcode: String,
    },

    /// Print the live-preview binding script
    PreviewScript,

    /// Print every option name with its default, as YAML
    Defaults,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so rendered output on stdout stays clean.
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let output = match cli.command {
        Commands::Render {
            content,
            settings,
            page,
            shortcode,
            with_styles,
        } => render(&content, &settings, page.as_deref(), shortcode, with_styles)?,
        Commands::Css { settings } => head_style_block(&resolve(&load_settings(&settings)?)),
        Commands::Query {
            settings,
            shortcode,
        } => query(&settings, &shortcode)?,
        Commands::PreviewScript => preview_script(),
        Commands::Defaults => defaults()?,
    };

    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn load_settings(arg: &SettingsArg) -> Result<MemoryStore> {
    match &arg.settings {
        Some(path) => MemoryStore::from_path(path)
            .with_context(|| format!("loading settings from {}", path.display())),
        None => Ok(MemoryStore::new()),
    }
}

fn render(
    content: &Path,
    settings: &SettingsArg,
    page: Option<&Path>,
    shortcode: Option<String>,
    with_styles: bool,
) -> Result<String> {
    let store = load_settings(settings)?;
    let repository = MemoryRepository::from_path(content)
        .with_context(|| format!("loading content from {}", content.display()))?;
    tracing::debug!(items = repository.len(), "loaded content");

    let source = match (page, shortcode) {
        (Some(path), _) => std::fs::read_to_string(path)
            .with_context(|| format!("reading page {}", path.display()))?,
        (None, Some(text)) => text,
        (None, None) => format!("[{}]", DIRECTIVES[0]),
    };

    let mut renderer = PageRenderer::new(&store, &repository)?;
    renderer.begin();
    let body = renderer.expand(&source).context("rendering grids")?;

    if with_styles {
        Ok(format!("{}{}", renderer.head_styles(), body))
    } else {
        Ok(body)
    }
}

fn query(settings: &SettingsArg, shortcode: &str) -> Result<String> {
    let store = load_settings(settings)?;
    let parser = ShortcodeParser::new(DIRECTIVES);
    let segments = parser.parse(shortcode);
    let Some(code) = segments.iter().find_map(|segment| match segment {
        Segment::Shortcode(code) => Some(code),
        Segment::Text(_) => None,
    }) else {
        bail!("no grid directive found in {:?}", shortcode);
    };

    let request = GridRequest::from_attributes(&code.attrs, &resolve(&store));
    let spec = build_query(&request, &[]);
    serde_json::to_string_pretty(&spec).context("serializing query")
}

fn defaults() -> Result<String> {
    let mut store = MemoryStore::new();
    for field in Field::ALL {
        store.set(field.option_name(), field.default_value().to_option());
    }
    store.to_yaml().context("serializing defaults")
}
