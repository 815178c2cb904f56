use crate::core::{PriceProvider, PriceQuote};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::{debug, error, instrument};

/// `{ "<coin_id>": { "<currency>": <price> } }`
type SimplePriceResponse = HashMap<String, HashMap<String, f64>>;

/// Spot prices from the CoinGecko `simple/price` endpoint.
pub struct CoinGeckoProvider {
    base_url: String,
}

impl CoinGeckoProvider {
    pub fn new(base_url: &str) -> Self {
        CoinGeckoProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PriceProvider for CoinGeckoProvider {
    #[instrument(
        name = "CoinGeckoPriceFetch",
        skip(self),
        fields(coin_id = %coin_id, currency = %currency)
    )]
    async fn fetch_price(&self, coin_id: &str, currency: &str) -> Result<PriceQuote> {
        let url = format!(
            "{}/simple/price?ids={}&vs_currencies={}",
            self.base_url, coin_id, currency
        );
        debug!("Requesting price data from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("cryptofolio/1.0")
            .build()?;
        let response = client.get(&url).send().await.map_err(|e| {
            anyhow!(
                "Request error: {} for {}/{} URL: {}",
                e,
                coin_id,
                currency,
                url
            )
        })?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for {}/{}",
                response.status(),
                coin_id,
                currency
            ));
        }

        let response_text = response
            .text()
            .await
            .with_context(|| format!("Failed to get response text for {coin_id}/{currency}"))?;

        let prices: SimplePriceResponse = match serde_json::from_str(&response_text) {
            Ok(data) => data,
            Err(e) => {
                error!(
                    error = ?e,
                    response = %response_text,
                    "Failed to parse price response"
                );
                return Err(e).with_context(|| {
                    format!("Failed to parse JSON response for {coin_id}/{currency}")
                });
            }
        };

        let price = prices
            .get(coin_id)
            .ok_or_else(|| anyhow!("No price data found for coin: {}", coin_id))?
            .get(currency)
            .copied()
            .ok_or_else(|| {
                anyhow!(
                    "No price data found for coin: {} in currency: {}",
                    coin_id,
                    currency
                )
            })?;

        debug!(price, "Received spot price");
        Ok(PriceQuote {
            coin_id: coin_id.to_string(),
            currency: currency.to_string(),
            price,
        })
    }
}
