//! Pricing abstractions and core types

use anyhow::Result;
use async_trait::async_trait;

/// A spot price for one coin, freshly fetched. Never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    pub coin_id: String,
    pub currency: String,
    pub price: f64,
}

#[async_trait]
pub trait PriceProvider: Send + Sync {
    async fn fetch_price(&self, coin_id: &str, currency: &str) -> Result<PriceQuote>;
}
