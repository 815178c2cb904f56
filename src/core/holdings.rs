//! Net position and current valuation of a single coin.
use crate::core::price::PriceProvider;
use crate::store::Ledger;
use anyhow::Result;
use tracing::debug;

/// Net holdings of a coin for one quote currency, valued at the spot price.
#[derive(Debug, Clone, PartialEq)]
pub struct Holdings {
    pub coin_id: String,
    pub currency: String,
    pub bought: f64,
    pub sold: f64,
    pub net_amount: f64,
    pub price: f64,
    pub value: f64,
}

/// Sums buys and sells recorded for `(coin_id, currency)` and values the
/// difference at the current price.
///
/// Over-selling is not an error: the net amount (and value) can go negative.
pub async fn compute_holdings(
    ledger: &Ledger,
    price_provider: &(dyn PriceProvider + Send + Sync),
    coin_id: &str,
    currency: &str,
) -> Result<Holdings> {
    let bought: f64 = ledger
        .query_by(coin_id, currency, false)?
        .iter()
        .map(|tx| tx.amount)
        .sum();
    let sold: f64 = ledger
        .query_by(coin_id, currency, true)?
        .iter()
        .map(|tx| tx.amount)
        .sum();
    let net_amount = bought - sold;
    debug!(coin_id, currency, bought, sold, "Aggregated ledger rows");

    let quote = price_provider.fetch_price(coin_id, currency).await?;

    Ok(Holdings {
        coin_id: coin_id.to_string(),
        currency: currency.to_string(),
        bought,
        sold,
        net_amount,
        price: quote.price,
        value: net_amount * quote.price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PriceQuote, Transaction};
    use anyhow::anyhow;
    use async_trait::async_trait;

    struct FixedPrice(f64);

    #[async_trait]
    impl PriceProvider for FixedPrice {
        async fn fetch_price(&self, coin_id: &str, currency: &str) -> Result<PriceQuote> {
            Ok(PriceQuote {
                coin_id: coin_id.to_string(),
                currency: currency.to_string(),
                price: self.0,
            })
        }
    }

    struct Unreachable;

    #[async_trait]
    impl PriceProvider for Unreachable {
        async fn fetch_price(&self, _coin_id: &str, _currency: &str) -> Result<PriceQuote> {
            Err(anyhow!("connection refused"))
        }
    }

    fn ledger_with(transactions: &[Transaction]) -> Ledger {
        let mut ledger = Ledger::open_in_memory().unwrap();
        ledger.append_many(transactions).unwrap();
        ledger
    }

    #[tokio::test]
    async fn test_buys_minus_sells_valued_at_spot() {
        let ledger = ledger_with(&[
            Transaction::new("bitcoin", "usd", 2.0, false),
            Transaction::new("bitcoin", "usd", 1.0, false),
            Transaction::new("bitcoin", "usd", 0.5, true),
        ]);

        let holdings = compute_holdings(&ledger, &FixedPrice(50000.0), "bitcoin", "usd")
            .await
            .unwrap();

        assert_eq!(holdings.bought, 3.0);
        assert_eq!(holdings.sold, 0.5);
        assert_eq!(holdings.net_amount, 2.5);
        assert_eq!(holdings.value, 125000.0);
    }

    #[tokio::test]
    async fn test_other_coins_and_currencies_are_ignored() {
        let ledger = ledger_with(&[
            Transaction::new("bitcoin", "usd", 1.0, false),
            Transaction::new("bitcoin", "eur", 4.0, false),
            Transaction::new("ethereum", "usd", 7.0, false),
        ]);

        let holdings = compute_holdings(&ledger, &FixedPrice(10.0), "bitcoin", "usd")
            .await
            .unwrap();

        assert_eq!(holdings.net_amount, 1.0);
        assert_eq!(holdings.value, 10.0);
    }

    #[tokio::test]
    async fn test_over_selling_yields_negative_holdings() {
        let ledger = ledger_with(&[
            Transaction::new("bitcoin", "usd", 1.0, false),
            Transaction::new("bitcoin", "usd", 3.0, true),
        ]);

        let holdings = compute_holdings(&ledger, &FixedPrice(100.0), "bitcoin", "usd")
            .await
            .unwrap();

        assert_eq!(holdings.net_amount, -2.0);
        assert_eq!(holdings.value, -200.0);
    }

    #[tokio::test]
    async fn test_empty_ledger_is_worth_nothing() {
        let ledger = ledger_with(&[]);
        let holdings = compute_holdings(&ledger, &FixedPrice(100.0), "bitcoin", "usd")
            .await
            .unwrap();
        assert_eq!(holdings.net_amount, 0.0);
        assert_eq!(holdings.value, 0.0);
    }

    #[tokio::test]
    async fn test_price_failure_propagates() {
        let ledger = ledger_with(&[Transaction::new("bitcoin", "usd", 1.0, false)]);
        let result = compute_holdings(&ledger, &Unreachable, "bitcoin", "usd").await;
        assert_eq!(result.unwrap_err().to_string(), "connection refused");
    }
}
