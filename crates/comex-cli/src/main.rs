//! CLI for generating trade export documents.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{client, config, data, order, process, types, Context};

/// Trade document generator - clients, orders and export paperwork
#[derive(Parser)]
#[command(name = "comex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Directory holding the client data (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage clients
    Client(client::ClientArgs),

    /// Manage orders
    Order(order::OrderArgs),

    /// Extract data from files and generate an order's documents
    Process(process::ProcessArgs),

    /// Export all clients as JSON
    Export(data::ExportArgs),

    /// Replace all clients with an export file
    Import(data::ImportArgs),

    /// Show storage statistics
    Stats,

    /// Delete all stored data
    Clear(data::ClearArgs),

    /// List the available document types
    Types(types::TypesArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    let data_dir = cli.data_dir.as_deref();

    match cli.command {
        Commands::Client(args) => client::run(args, Context::load(config_path, data_dir)?),
        Commands::Order(args) => order::run(args, Context::load(config_path, data_dir)?),
        Commands::Process(args) => {
            process::run(args, Context::load(config_path, data_dir)?).await
        }
        Commands::Export(args) => data::export(args, Context::load(config_path, data_dir)?),
        Commands::Import(args) => data::import(args, Context::load(config_path, data_dir)?),
        Commands::Stats => data::stats(Context::load(config_path, data_dir)?),
        Commands::Clear(args) => data::clear(args, Context::load(config_path, data_dir)?),
        Commands::Types(args) => types::run(args),
        Commands::Config(args) => config::run(args, config_path),
    }
}
