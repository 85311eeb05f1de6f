//! CLI entry point for the `plens` command-line tool.

use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};

use product_lens::cli::commands;
use product_lens::config::resolve_config;
use product_lens::LensError;

#[derive(Parser)]
#[command(
    name = "plens",
    about = "Product Lens CLI: shopping keywords from text and similar-product recommendations"
)]
struct Cli {
    /// Output format: "text" (default) or "json"
    #[arg(long, default_value = "text")]
    format: String,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,

    /// Path to a product-lens.toml config file
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service
    Serve {
        /// Address to listen on, overriding the config file
        #[arg(long)]
        listen: Option<String>,
    },
    /// Extract keywords from a piece of text
    Extract {
        /// The text to analyze
        text: String,
    },
    /// Recommend products similar to a catalog entry
    Recommend {
        /// Exact product name as it appears in the catalog
        product_name: String,
        /// Catalog CSV, overriding the config file
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Number of recommendations
        #[arg(long)]
        top_n: Option<usize>,
    },
    /// Print the keyword lexicon
    Lexicon {
        /// Only one role: product_type, brand, specification
        #[arg(long)]
        role: Option<String>,
    },
    /// Catalog and feature-space statistics
    Stats {
        /// Catalog CSV, overriding the config file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let json = cli.format == "json";
    let mut config = resolve_config(cli.config.as_deref()).context("Failed to resolve config")?;

    let level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_millis()
        .init();

    match cli.command {
        Commands::Serve { listen } => {
            if let Some(addr) = listen {
                config.listen_addr = addr;
            }
            let runtime = tokio::runtime::Runtime::new().context("Failed to start runtime")?;
            runtime
                .block_on(product_lens::serve(config))
                .context("Service stopped")?;
        }
        Commands::Extract { text } => commands::cmd_extract(
            &text,
            config.thesaurus_path.as_deref(),
            config.keyword_cap,
            json,
        )?,
        Commands::Recommend {
            product_name,
            catalog,
            top_n,
        } => {
            let path = catalog.unwrap_or(config.catalog_path);
            commands::cmd_recommend(&path, &product_name, top_n.unwrap_or(config.top_n), json)
                .with_context(|| format!("Recommendation from {} failed", path.display()))?;
        }
        Commands::Lexicon { role } => {
            commands::cmd_lexicon(config.thesaurus_path.as_deref(), role.as_deref(), json)?
        }
        Commands::Stats { catalog } => {
            let path = catalog.unwrap_or(config.catalog_path);
            commands::cmd_stats(&path, json)
                .with_context(|| format!("Could not read catalog {}", path.display()))?;
        }
    }
    Ok(())
}

fn exit_code(e: &anyhow::Error) -> i32 {
    match e.downcast_ref::<LensError>() {
        Some(LensError::Io(_)) => 1,
        Some(
            LensError::Csv(_)
            | LensError::MissingColumn(_)
            | LensError::InvalidRow { .. }
            | LensError::EmptyCatalog,
        ) => 2,
        Some(LensError::Config(_)) => 3,
        Some(LensError::ProductNotFound(_)) => 4,
        _ => 5,
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(exit_code(&e));
    }
}
