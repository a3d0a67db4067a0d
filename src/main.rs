use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scholarsift::config::{find_config_file, get_config, load_config, user_config_path, Config};
use scholarsift::ui::{self, Status};
use scholarsift::web::{self, AppState};
use scholarsift::{
    export_results, search_papers, ArxivFeed, ExportFormat, ExportWriter, SearchOutcome,
    SessionHandle,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// ScholarSift - search arXiv and export the results as Text, Word, PDF or Excel
#[derive(Parser, Debug)]
#[command(name = "scholarsift")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search arXiv for papers and export the results", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (-v for debug, -vv for trace)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Feed request timeout in seconds (overrides the config file)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search arXiv for papers
    #[command(visible_alias = "s")]
    Search {
        /// Search keywords
        query: String,

        /// Number of papers to fetch (1-10)
        #[arg(long, short, default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..=10))]
        max_results: u8,

        /// Export the results (text, word, pdf or excel; repeatable)
        #[arg(long, short)]
        export: Vec<ExportFormat>,

        /// Print the results as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Serve the search and export form over HTTP
    Serve {
        /// Interface to bind (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides the config file)
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Show or create the configuration file
    Config {
        /// Write the default configuration to the config path
        #[arg(long)]
        init: bool,

        /// Only print the config file path
        #[arg(long)]
        path: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration from file if specified or found in default locations
    let config_file = cli.config.clone().or_else(find_config_file);
    let mut config = match &config_file {
        Some(path) if path.is_file() => load_config(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        _ => get_config()?,
    };
    if let Some(timeout) = cli.timeout {
        config.feed.timeout_secs = timeout;
    }

    init_tracing(&cli, &config);
    if let Some(path) = &config_file {
        tracing::debug!("Using config file: {}", path.display());
    }

    match cli.command {
        Commands::Search {
            query,
            max_results,
            export,
            json,
        } => run_search(&config, &query, max_results as usize, &export, json, cli.quiet).await,
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            run_serve(&config, &format!("{}:{}", host, port), cli.quiet).await
        }
        Commands::Config { init, path } => run_config(&config, config_file, init, path),
    }
}

fn init_tracing(cli: &Cli, config: &Config) {
    let level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => config.logging.level.as_str(),
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| format!("scholarsift={},tower_http={}", level, level)),
    );
    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.format.as_deref() == Some("json") {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run_search(
    config: &Config,
    query: &str,
    max_results: usize,
    formats: &[ExportFormat],
    json: bool,
    quiet: bool,
) -> Result<()> {
    let feed = ArxivFeed::from_config(&config.feed)?;
    let session = SessionHandle::new();

    let spinner = (!quiet && !json && ui::is_terminal()).then(|| ui::search_spinner(query));
    let started = Instant::now();
    let outcome = search_papers(&feed, &session, query, max_results).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    match &outcome {
        SearchOutcome::Found { count, .. } => {
            let papers = session.papers();
            if json {
                println!("{}", serde_json::to_string_pretty(&papers)?);
            } else {
                if !quiet {
                    ui::print_search_header(query, *count, started.elapsed());
                }
                println!("{}", ui::results_table(&papers));
            }
        }
        SearchOutcome::NoMatches => {
            if json {
                println!("[]");
            } else if !quiet {
                ui::print_status(Status::Warning, outcome.message());
            }
            return Ok(());
        }
        SearchOutcome::Failed(_) => {
            anyhow::bail!("{}", outcome.message());
        }
    }

    if formats.is_empty() {
        return Ok(());
    }

    let writer = ExportWriter::from_config(&config.export);
    for format in formats {
        match export_results(&writer, &session, *format) {
            Some(path) if !quiet => {
                ui::print_status(
                    Status::Export,
                    &format!("{} export saved to {}", format, path.display()),
                );
            }
            Some(_) => {}
            None => ui::print_status(Status::Error, &format!("{} export failed", format)),
        }
    }

    Ok(())
}

async fn run_serve(config: &Config, addr: &str, quiet: bool) -> Result<()> {
    let feed = ArxivFeed::from_config(&config.feed)?;
    let state = AppState::new(Arc::new(feed), ExportWriter::from_config(&config.export));

    if !quiet {
        ui::print_banner(addr);
    }
    web::serve(state, addr)
        .await
        .with_context(|| format!("Web form failed on {}", addr))
}

fn run_config(config: &Config, config_file: Option<PathBuf>, init: bool, path_only: bool) -> Result<()> {
    let path = config_file
        .or_else(user_config_path)
        .context("No configuration directory available")?;

    if path_only {
        println!("{}", path.display());
        return Ok(());
    }

    if init {
        if path.exists() {
            ui::print_status(
                Status::Warning,
                &format!("Config file already exists: {}", path.display()),
            );
            return Ok(());
        }
        Config::default().save(&path)?;
        ui::print_status(
            Status::Success,
            &format!("Wrote default config to {}", path.display()),
        );
        return Ok(());
    }

    ui::print_divider();
    println!("# {}", path.display());
    ui::print_divider();
    print!("{}", config.to_toml()?);
    Ok(())
}
