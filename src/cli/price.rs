use super::ui;
use crate::core::{PriceProvider, PriceQuote};
use anyhow::Result;

pub fn format_quote(quote: &PriceQuote) -> String {
    format!(
        "The price of {} is {:.2} {}",
        quote.coin_id,
        quote.price,
        quote.currency.to_uppercase()
    )
}

pub async fn run(
    price_provider: &(dyn PriceProvider + Send + Sync),
    coin_id: &str,
    currency: &str,
) -> Result<()> {
    let spinner = ui::new_spinner("Fetching price...");
    let result = price_provider.fetch_price(coin_id, currency).await;
    spinner.finish_and_clear();

    println!("{}", format_quote(&result?));
    Ok(())
}
