//! The ledger's only entity and its text representation.

use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// Pattern used for the `date` column and for exported files.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Column names of the flat-file format, in record order.
pub const RECORD_HEADER: [&str; 5] = ["coin_id", "currency", "amount", "sell", "date"];

/// A single buy or sell of a coin, quoted in a currency.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub coin_id: String,
    pub currency: String,
    pub amount: f64,
    pub is_sell: bool,
    pub timestamp: NaiveDateTime,
}

impl Transaction {
    /// Creates a transaction stamped with the current local time.
    pub fn new(coin_id: &str, currency: &str, amount: f64, is_sell: bool) -> Self {
        Self::at(coin_id, currency, amount, is_sell, Local::now().naive_local())
    }

    pub fn at(
        coin_id: &str,
        currency: &str,
        amount: f64,
        is_sell: bool,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            coin_id: coin_id.to_string(),
            currency: currency.to_string(),
            amount,
            is_sell,
            timestamp,
        }
    }

    /// Amount with sells counted negative.
    pub fn signed_amount(&self) -> f64 {
        if self.is_sell { -self.amount } else { self.amount }
    }

    pub fn kind(&self) -> &'static str {
        if self.is_sell { "sell" } else { "buy" }
    }

    /// Maps a raw `coin_id, currency, amount, sell, date` record to a transaction.
    ///
    /// Stricter than a plain pass-through: the amount must be finite, the sell
    /// flag must be `0` or `1` and the date must parse with [`parse_timestamp`].
    /// Rows failing any of these are rejected here instead of being stored in a
    /// form that later reads or `query_by` filters could not handle.
    pub fn from_record<'a, I>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let fields: Vec<&str> = fields.into_iter().collect();
        let [coin_id, currency, amount, sell, date] = fields.as_slice() else {
            bail!(
                "expected {} fields, found {}",
                RECORD_HEADER.len(),
                fields.len()
            );
        };

        let amount: f64 = amount
            .trim()
            .parse()
            .with_context(|| format!("invalid amount '{amount}'"))?;
        if !amount.is_finite() {
            bail!("invalid amount '{amount}'");
        }

        let is_sell = match sell.trim().parse::<i64>() {
            Ok(0) => false,
            Ok(1) => true,
            Ok(other) => bail!("invalid sell flag '{other}', expected 0 or 1"),
            Err(e) => return Err(e).with_context(|| format!("invalid sell flag '{sell}'")),
        };

        Ok(Self {
            coin_id: coin_id.to_string(),
            currency: currency.to_string(),
            amount,
            is_sell,
            timestamp: parse_timestamp(date)?,
        })
    }

    /// Inverse of [`Transaction::from_record`].
    pub fn to_record(&self) -> [String; 5] {
        [
            self.coin_id.clone(),
            self.currency.clone(),
            self.amount.to_string(),
            u8::from(self.is_sell).to_string(),
            format_timestamp(&self.timestamp),
        ]
    }
}

pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Accepts the stored pattern (fraction optional), its `T`-separated variant,
/// RFC 3339 and plain dates.
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime> {
    let text = text.trim();
    for pattern in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(text, pattern) {
            return Ok(timestamp);
        }
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Ok(timestamp.naive_local());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| anyhow!("invalid date '{text}'"))
}
