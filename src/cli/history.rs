use super::ui;
use crate::core::Transaction;
use crate::core::transaction::format_timestamp;
use crate::store::Ledger;
use anyhow::Result;
use comfy_table::{Cell, Table};

pub fn history_table(transactions: &[Transaction]) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell("Coin"),
        ui::header_cell("Currency"),
        ui::header_cell("Side"),
        ui::header_cell("Amount"),
    ]);

    for tx in transactions {
        table.add_row(vec![
            Cell::new(format_timestamp(&tx.timestamp)),
            Cell::new(&tx.coin_id),
            Cell::new(tx.currency.to_uppercase()),
            Cell::new(tx.kind()),
            ui::signed_amount_cell(tx.signed_amount()),
        ]);
    }
    table
}

/// Lists stored transactions oldest first, optionally for a single coin.
pub fn run(ledger: &Ledger, coin_id: Option<&str>) -> Result<()> {
    let mut transactions = ledger.query_all()?;
    if let Some(coin_id) = coin_id {
        transactions.retain(|tx| tx.coin_id == coin_id);
    }

    if transactions.is_empty() {
        println!("No transactions recorded.");
        return Ok(());
    }

    transactions.sort_by_key(|tx| tx.timestamp);
    println!("{}", ui::style_text("Transactions", ui::StyleType::Title));
    println!("{}", history_table(&transactions));
    println!(
        "{}",
        ui::style_text(
            &format!("{} transactions", transactions.len()),
            ui::StyleType::Subtle
        )
    );
    Ok(())
}
