use super::ui;
use crate::core::{Holdings, PriceProvider, compute_holdings};
use crate::store::Ledger;
use anyhow::Result;

impl Holdings {
    pub fn display_line(&self) -> String {
        let value = format!("{:.2} {}", self.value, self.currency.to_uppercase());
        let value_style = if self.net_amount < 0.0 {
            ui::StyleType::Error
        } else {
            ui::StyleType::TotalValue
        };
        format!(
            "You own a total of {} {} worth {}",
            self.net_amount,
            self.coin_id,
            ui::style_text(&value, value_style)
        )
    }
}

pub async fn run(
    ledger: &Ledger,
    price_provider: &(dyn PriceProvider + Send + Sync),
    coin_id: &str,
    currency: &str,
) -> Result<Holdings> {
    let spinner = ui::new_spinner("Fetching price...");
    let result = compute_holdings(ledger, price_provider, coin_id, currency).await;
    spinner.finish_and_clear();
    let holdings = result?;

    println!(
        "The price of {} is {:.2} {}",
        coin_id,
        holdings.price,
        currency.to_uppercase()
    );
    println!("{}", holdings.display_line());
    Ok(holdings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_line() {
        console::set_colors_enabled(false);
        let holdings = Holdings {
            coin_id: "bitcoin".to_string(),
            currency: "usd".to_string(),
            bought: 3.0,
            sold: 0.5,
            net_amount: 2.5,
            price: 50000.0,
            value: 125000.0,
        };

        assert_eq!(
            holdings.display_line(),
            "You own a total of 2.5 bitcoin worth 125000.00 USD"
        );
    }
}
