//! Command-line interface for the extractor.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::Configuration;
use crate::engine::Extractor;
use crate::error::Result;
use crate::http::HttpTransport;
use crate::registry::FormatterRegistry;
use crate::types::Record;

/// DOM Extractor - Extract structured records from HTML with CSS selectors.
#[derive(Parser)]
#[command(name = "dom-extractor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract a record from a document and print it as JSON.
    Extract {
        /// YAML field mapping
        #[arg(short, long)]
        config: PathBuf,

        #[command(flatten)]
        source: SourceArgs,

        /// Print compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Check a YAML field mapping and list its fields.
    Validate {
        /// YAML field mapping
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Where the document comes from. Standard input when neither is given.
#[derive(Args, Debug, Default)]
#[group(multiple = false)]
pub struct SourceArgs {
    /// Local HTML file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// URL to fetch over HTTP
    #[arg(short, long)]
    pub url: Option<String>,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            config,
            source,
            compact,
        } => extract_command(&config, &source, compact),
        Commands::Validate { config } => validate_command(&config),
    }
}

/// Execute the extract command.
fn extract_command(config: &Path, source: &SourceArgs, compact: bool) -> Result<()> {
    let extractor = Extractor::with_registry(
        Configuration::from_yaml_file(config)?,
        FormatterRegistry::with_builtins(),
    )?;

    let record = match (&source.file, &source.url) {
        (Some(path), _) => extractor.extract_from_file(path)?,
        (None, Some(url)) => fetch_with_spinner(&extractor, url)?,
        (None, None) => {
            let mut markup = String::new();
            std::io::stdin().read_to_string(&mut markup)?;
            extractor.extract(&markup)
        }
    };

    println!("{}", render(&record, compact)?);
    Ok(())
}

fn fetch_with_spinner(extractor: &Extractor, url: &str) -> Result<Record> {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(format!("Fetching {url}..."));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = HttpTransport::new()
        .and_then(|transport| extractor.extract_from_source(url, &transport));
    pb.finish_and_clear();
    result
}

/// Serialize a record as JSON.
fn render(record: &Record, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(record)?
    } else {
        serde_json::to_string_pretty(record)?
    };
    Ok(json)
}

/// Execute the validate command.
fn validate_command(config: &Path) -> Result<()> {
    let configuration = Configuration::from_yaml_file(config)?;
    let extractor = Extractor::with_registry(configuration, FormatterRegistry::with_builtins())?;

    let mut count = 0usize;
    extractor.configuration().walk(|path, spec| {
        count += 1;
        let kind = if spec.is_composite() {
            "record".to_string()
        } else {
            spec.content_type.to_string()
        };
        let shape = if spec.multiple { "[]" } else { "" };
        println!(
            "  {} {}{} {}",
            style(path).cyan(),
            kind,
            shape,
            style(spec.selector.as_deref().unwrap_or("<no selector>")).dim()
        );
    });

    println!();
    println!(
        "{} {} fields",
        style("Configuration OK:").green().bold(),
        count
    );
    Ok(())
}
