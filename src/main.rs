use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use cryptofolio::core::log::init_logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for cryptofolio::AppCommand {
    fn from(cmd: Commands) -> cryptofolio::AppCommand {
        match cmd {
            Commands::Price { coin_id, currency } => {
                cryptofolio::AppCommand::Price { coin_id, currency }
            }
            Commands::Add {
                coin_id,
                currency,
                amount,
                sell,
            } => cryptofolio::AppCommand::Add {
                coin_id,
                currency,
                amount,
                sell,
            },
            Commands::Value { coin_id, currency } => {
                cryptofolio::AppCommand::Value { coin_id, currency }
            }
            Commands::Import { csv_file } => cryptofolio::AppCommand::Import { csv_file },
            Commands::Export { csv_file } => cryptofolio::AppCommand::Export { csv_file },
            Commands::History { coin_id } => cryptofolio::AppCommand::History { coin_id },
            Commands::Chart {
                output,
                width,
                height,
            } => cryptofolio::AppCommand::Chart {
                output,
                width,
                height,
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Show the current price of a coin
    Price {
        /// Coin ID (e.g., bitcoin)
        #[arg(long, alias = "coin_id", default_value = "bitcoin")]
        coin_id: String,
        /// Currency (e.g., usd); defaults to the configured currency
        #[arg(long)]
        currency: Option<String>,
    },
    /// Record a buy, or a sell with --sell
    Add {
        #[arg(long, alias = "coin_id")]
        coin_id: String,
        #[arg(long)]
        currency: String,
        #[arg(long, allow_negative_numbers = true)]
        amount: f64,
        /// Set if this is a sell
        #[arg(long)]
        sell: bool,
    },
    /// Display net holdings of a coin and their current value
    Value {
        #[arg(long, alias = "coin_id")]
        coin_id: String,
        #[arg(long)]
        currency: String,
    },
    /// Import transactions from a CSV file
    Import {
        #[arg(long, alias = "csv_file")]
        csv_file: PathBuf,
    },
    /// Export all transactions to a CSV file
    Export {
        #[arg(long, alias = "csv_file")]
        csv_file: PathBuf,
    },
    /// List recorded transactions
    History {
        /// Only show transactions for this coin
        #[arg(long, alias = "coin_id")]
        coin_id: Option<String>,
    },
    /// Plot cumulative holdings per coin over time
    Chart {
        /// PNG file to write
        #[arg(short, long, default_value = "portfolio.png")]
        output: PathBuf,
        #[arg(long, default_value_t = 1000)]
        width: u32,
        #[arg(long, default_value_t = 500)]
        height: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => cryptofolio::cli::setup::setup(),
        Some(cmd) => cryptofolio::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
