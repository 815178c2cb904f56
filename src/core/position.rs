//! Cumulative position series used by the chart.
use crate::core::Transaction;
use chrono::NaiveDateTime;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionPoint {
    pub timestamp: NaiveDateTime,
    pub cumulative_amount: f64,
}

/// Groups transactions by coin and accumulates their signed amounts in
/// timestamp order. Transactions sharing a timestamp keep their input order.
pub fn cumulative_positions(transactions: &[Transaction]) -> BTreeMap<String, Vec<PositionPoint>> {
    let mut by_coin: BTreeMap<String, Vec<&Transaction>> = BTreeMap::new();
    for tx in transactions {
        by_coin.entry(tx.coin_id.clone()).or_default().push(tx);
    }

    by_coin
        .into_iter()
        .map(|(coin_id, mut txs)| {
            txs.sort_by_key(|tx| tx.timestamp);
            let points: Vec<PositionPoint> = txs
                .iter()
                .scan(0.0, |running, tx| {
                    *running += tx.signed_amount();
                    Some(PositionPoint {
                        timestamp: tx.timestamp,
                        cumulative_amount: *running,
                    })
                })
                .collect();
            (coin_id, points)
        })
        .collect()
}
