use crate::core::Transaction;
use crate::store::Ledger;
use anyhow::Result;

/// Records a buy (or sell) stamped with the current time.
pub fn run(
    ledger: &mut Ledger,
    coin_id: &str,
    currency: &str,
    amount: f64,
    sell: bool,
) -> Result<Transaction> {
    let transaction = Transaction::new(coin_id, currency, amount, sell);
    ledger.append(&transaction)?;

    println!("Added {} of {} {}", transaction.kind(), amount, coin_id);
    Ok(transaction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_appends_to_ledger() {
        let mut ledger = Ledger::open_in_memory().unwrap();

        let added = run(&mut ledger, "ethereum", "eur", 3.25, true).unwrap();

        assert!(added.is_sell);
        assert_eq!(ledger.query_by("ethereum", "eur", true).unwrap().len(), 1);
        assert!(ledger.query_by("ethereum", "eur", false).unwrap().is_empty());
    }

    #[test]
    fn test_add_nan_fails_and_ledger_stays_readable() {
        let mut ledger = Ledger::open_in_memory().unwrap();
        run(&mut ledger, "bitcoin", "usd", 1.0, false).unwrap();

        assert!(run(&mut ledger, "bitcoin", "usd", f64::NAN, false).is_err());

        let all = ledger.query_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].amount, 1.0);
    }
}
