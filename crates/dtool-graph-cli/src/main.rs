use clap::{Parser, ValueEnum};
use colored::Colorize;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use dtool_graph_core::LookupConfig;
use dtool_graph_lineage::{build_graph, render_dot_with, DefaultFormatter, NameFormatter};
use dtool_graph_lookup::{HttpLookupClient, LookupService, PageRequest};

mod highlight;

/// dtool-graph - Print the dependency graph of a dataset on a dtool lookup server
#[derive(Parser)]
#[command(name = "dtool-graph")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// UUID of the dataset whose lineage to print
    uuid: String,

    /// Comma-separated record fields to follow as parent references
    #[arg(long, value_name = "KEYS")]
    dependency_keys: Option<String>,

    /// Page of the result to fetch
    #[arg(short = 'p', long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page_number: u32,

    /// Datasets per page
    #[arg(short = 's', long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    page_size: u32,

    /// Print graph in dot format
    #[arg(long)]
    dot: bool,

    /// Node labels in dot output
    #[arg(long, value_enum, default_value_t = LabelMode::Uuid)]
    labels: LabelMode,

    /// Path to dtool config file (default: ~/.config/dtool/dtool.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable coloured JSON output
    #[arg(long)]
    no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LabelMode {
    /// Dataset UUID
    Uuid,

    /// Dataset name and UUID
    Name,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    init_tracing(cli.verbose);

    let config = LookupConfig::load(cli.config.as_deref())
        .context("Failed to load lookup server configuration")?;

    if cli.verbose > 0 {
        eprintln!(
            "{} {}",
            "Using lookup server:".cyan(),
            config.server_url.as_deref().unwrap_or("<not configured>")
        );
    }

    let client = HttpLookupClient::new(&config)?;

    let mut stdout = std::io::stdout().lock();
    run(&cli, &client, &mut stdout).await
}

/// Logs go to stderr so stdout stays clean for the JSON or dot output
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

/// Query the service and write the result to `out`
async fn run<W: Write>(cli: &Cli, service: &dyn LookupService, out: &mut W) -> Result<()> {
    let dependency_keys = cli.dependency_keys.as_deref().map(parse_dependency_keys);
    let page = PageRequest::new(cli.page_number, cli.page_size);

    let result = service
        .graph(&cli.uuid, dependency_keys.as_deref(), page)
        .await
        .with_context(|| format!("Failed to query {} for dataset {}", service.name(), cli.uuid))?;

    tracing::info!("Pagination information: {}", result.pagination);

    let text = if cli.dot {
        let graph = build_graph(&result.records, Some(cli.uuid.as_str()));
        match cli.labels {
            LabelMode::Uuid => render_dot_with(&graph, &DefaultFormatter),
            LabelMode::Name => render_dot_with(&graph, &NameFormatter),
        }
    } else {
        highlight::to_colored_json(&result.records, use_color(cli))?
    };

    out.write_all(text.as_bytes())?;
    out.flush()?;

    Ok(())
}

fn use_color(cli: &Cli) -> bool {
    !cli.no_color && std::env::var_os("NO_COLOR").is_none()
}

/// Split `--dependency-keys` into individual keys
fn parse_dependency_keys(keys: &str) -> Vec<String> {
    keys.split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .collect()
}
