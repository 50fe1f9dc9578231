//! mlit-crawler - CLI crawler for Japan's MLIT vehicle defect database

use anyhow::Result;
use clap::{Parser, Subcommand};
use mlit_crawler::commands::{
    CleanCommand, CrawlCommand, SampleCommand, SchemaCommand, SearchCommand, StatsCommand,
};
use mlit_crawler::config::{Config, OutputFormat};
use mlit_crawler::mlit::models::SearchQuery;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "mlit-crawler",
    version,
    about = "CLI crawler for Japan's MLIT vehicle defect database",
    long_about = "Scrapes the paginated MLIT vehicle defect table, normalizes \
                  Japanese text variants, and exports the records as CSV, JSON, \
                  markdown, or plain tables."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "MLIT_PROXY")]
    proxy: Option<String>,

    /// Delay between page fetches in milliseconds
    #[arg(long, global = true, env = "MLIT_DELAY")]
    delay: Option<u64>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for defect records
    #[command(alias = "s")]
    Search {
        /// Manufacturer name (Japanese)
        #[arg(long)]
        manufacturer: Option<String>,

        /// Model name (Japanese)
        #[arg(long)]
        model: Option<String>,

        /// Start of the reporting date range (YYYY/MM/DD)
        #[arg(long)]
        from_date: Option<String>,

        /// End of the reporting date range (YYYY/MM/DD)
        #[arg(long)]
        to_date: Option<String>,

        /// Maximum number of result pages to fetch
        #[arg(long, default_value = "1")]
        max_pages: u32,
    },

    /// Summarize defects by manufacturer and model
    Stats {
        /// Manufacturer name (Japanese)
        #[arg(long)]
        manufacturer: Option<String>,

        /// Maximum number of result pages to analyze
        #[arg(long, default_value = "5")]
        max_pages: u32,
    },

    /// Crawl the full result set into a CSV file
    Crawl {
        /// Path of the CSV file to write
        output: PathBuf,

        /// Remove all whitespace from record fields before writing
        #[arg(long)]
        clean: bool,

        /// Stop after this many pages (unset: crawl everything)
        #[arg(long)]
        max_pages: Option<u32>,
    },

    /// Report the structure of the defect table
    Schema,

    /// Show the first few records of the database
    Sample,

    /// Remove all whitespace from the fields of an existing CSV export
    Clean {
        /// Path to the original CSV
        input: PathBuf,

        /// Path of the cleaned CSV to write
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(delay) = cli.delay {
        config.delay_ms = delay;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }

    match cli.command {
        Commands::Search { manufacturer, model, from_date, to_date, max_pages } => {
            config.max_pages = Some(max_pages);

            let query = SearchQuery { manufacturer, model, from_date, to_date };
            let cmd = SearchCommand::new(config);
            let output = cmd.execute(&query).await?;
            println!("{}", output);
        }

        Commands::Stats { manufacturer, max_pages } => {
            config.max_pages = Some(max_pages);

            let query = SearchQuery { manufacturer, ..Default::default() };
            let cmd = StatsCommand::new(config);
            let output = cmd.execute(&query).await?;
            println!("{}", output);
        }

        Commands::Crawl { output, clean, max_pages } => {
            if max_pages.is_some() {
                config.max_pages = max_pages;
            }

            let cmd = CrawlCommand::new(config);
            let summary = cmd.execute(&output, clean).await?;
            println!("{}", summary);
        }

        Commands::Schema => {
            let cmd = SchemaCommand::new(config);
            let output = cmd.execute().await?;
            println!("{}", output);
        }

        Commands::Sample => {
            let cmd = SampleCommand::new(config);
            let output = cmd.execute().await?;
            println!("{}", output);
        }

        Commands::Clean { input, output } => {
            let summary = CleanCommand::execute(&input, &output)?;
            println!("{}", summary);
        }
    }

    Ok(())
}
