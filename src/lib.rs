pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::config::AppConfig;
use crate::providers::CoinGeckoProvider;
use crate::store::Ledger;
use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, info};

/// Commands that operate on the ledger or the price API.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Price {
        coin_id: String,
        currency: Option<String>,
    },
    Add {
        coin_id: String,
        currency: String,
        amount: f64,
        sell: bool,
    },
    Value {
        coin_id: String,
        currency: String,
    },
    Import {
        csv_file: PathBuf,
    },
    Export {
        csv_file: PathBuf,
    },
    History {
        coin_id: Option<String>,
    },
    Chart {
        output: PathBuf,
        width: u32,
        height: u32,
    },
}

fn open_ledger(config: &AppConfig) -> Result<Ledger> {
    Ledger::open(&config.database_path()?)
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Cryptofolio starting...");

    let config = AppConfig::load(config_path)?;
    debug!("Loaded config: {config:#?}");

    let price_provider = CoinGeckoProvider::new(config.coingecko_base_url());

    match command {
        AppCommand::Price { coin_id, currency } => {
            let currency = currency.as_deref().unwrap_or(&config.currency);
            cli::price::run(&price_provider, &coin_id, currency).await
        }
        AppCommand::Add {
            coin_id,
            currency,
            amount,
            sell,
        } => {
            let mut ledger = open_ledger(&config)?;
            cli::add::run(&mut ledger, &coin_id, &currency, amount, sell).map(|_| ())
        }
        AppCommand::Value { coin_id, currency } => {
            let ledger = open_ledger(&config)?;
            cli::value::run(&ledger, &price_provider, &coin_id, &currency)
                .await
                .map(|_| ())
        }
        AppCommand::Import { csv_file } => {
            let mut ledger = open_ledger(&config)?;
            cli::transfer::import(&mut ledger, &csv_file).map(|_| ())
        }
        AppCommand::Export { csv_file } => {
            let ledger = open_ledger(&config)?;
            cli::transfer::export(&ledger, &csv_file).map(|_| ())
        }
        AppCommand::History { coin_id } => {
            let ledger = open_ledger(&config)?;
            cli::history::run(&ledger, coin_id.as_deref())
        }
        AppCommand::Chart {
            output,
            width,
            height,
        } => {
            let ledger = open_ledger(&config)?;
            cli::chart::run(&ledger, &output, width, height)
        }
    }
}
