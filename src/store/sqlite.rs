//! Transaction ledger backed by SQLite.

use crate::core::transaction::{Transaction, format_timestamp, parse_timestamp};
use anyhow::{Context, Result, bail};
use rusqlite::{Connection, Row, params};
use std::path::Path;
use tracing::debug;

const CREATE_INVESTMENTS_SQL: &str = "CREATE TABLE IF NOT EXISTS investments (
    coin_id TEXT,
    currency TEXT,
    amount REAL,
    sell INT,
    date TIMESTAMP
)";

const INSERT_SQL: &str =
    "INSERT INTO investments (coin_id, currency, amount, sell, date) VALUES (?1, ?2, ?3, ?4, ?5)";

const SELECT_COLUMNS: &str = "SELECT coin_id, currency, amount, sell, date FROM investments";

/// Append-only store of transactions. There is no update or delete.
pub struct Ledger {
    conn: Connection,
}

impl Ledger {
    /// Opens (creating if needed) the database at `db_path` and ensures the
    /// schema exists.
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open database: {}", db_path.display()))?;
        debug!("Opened ledger at {}", db_path.display());

        let ledger = Self { conn };
        ledger.ensure_schema()?;
        Ok(ledger)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to create in-memory database")?;
        let ledger = Self { conn };
        ledger.ensure_schema()?;
        Ok(ledger)
    }

    /// Creates the `investments` table if it is absent. Safe to call repeatedly.
    pub fn ensure_schema(&self) -> Result<()> {
        self.conn
            .execute(CREATE_INVESTMENTS_SQL, [])
            .context("Failed to create investments table")?;
        Ok(())
    }

    pub fn append(&mut self, transaction: &Transaction) -> Result<()> {
        ensure_finite(transaction)?;
        insert(&self.conn, transaction).context("Failed to insert transaction")?;
        debug!(?transaction, "Appended transaction");
        Ok(())
    }

    /// Inserts all transactions in a single database transaction. Either every
    /// row is written or none is.
    pub fn append_many(&mut self, transactions: &[Transaction]) -> Result<usize> {
        transactions.iter().try_for_each(ensure_finite)?;
        let tx = self
            .conn
            .transaction()
            .context("Failed to begin transaction")?;
        for transaction in transactions {
            insert(&tx, transaction).context("Failed to insert transaction")?;
        }
        tx.commit().context("Failed to commit transactions")?;
        debug!(count = transactions.len(), "Appended transactions");
        Ok(transactions.len())
    }

    pub fn query_by(&self, coin_id: &str, currency: &str, is_sell: bool) -> Result<Vec<Transaction>> {
        let sql = format!("{SELECT_COLUMNS} WHERE coin_id = ?1 AND currency = ?2 AND sell = ?3");
        let mut stmt = self.conn.prepare(&sql).context("Failed to prepare query")?;

        let rows = stmt
            .query_map(params![coin_id, currency, is_sell as i64], read_row)
            .context("Failed to query transactions")?;
        collect_rows(rows)
    }

    pub fn query_all(&self) -> Result<Vec<Transaction>> {
        let mut stmt = self
            .conn
            .prepare(SELECT_COLUMNS)
            .context("Failed to prepare query")?;

        let rows = stmt
            .query_map([], read_row)
            .context("Failed to query transactions")?;
        collect_rows(rows)
    }
}

/// SQLite stores NaN as NULL, which no read could decode afterwards.
fn ensure_finite(transaction: &Transaction) -> Result<()> {
    if !transaction.amount.is_finite() {
        bail!(
            "Invalid amount {} for {}: must be a finite number",
            transaction.amount,
            transaction.coin_id
        );
    }
    Ok(())
}

fn insert(conn: &Connection, transaction: &Transaction) -> rusqlite::Result<usize> {
    conn.execute(
        INSERT_SQL,
        params![
            transaction.coin_id,
            transaction.currency,
            transaction.amount,
            transaction.is_sell as i64,
            format_timestamp(&transaction.timestamp),
        ],
    )
}

/// Raw column values; the date is decoded outside the row callback so that a
/// bad value surfaces as a descriptive error.
type RawRow = (String, String, f64, i64, String);

fn read_row(row: &Row<'_>) -> rusqlite::Result<RawRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
}

fn collect_rows<I>(rows: I) -> Result<Vec<Transaction>>
where
    I: Iterator<Item = rusqlite::Result<RawRow>>,
{
    rows.map(|row| -> Result<Transaction> {
        let (coin_id, currency, amount, sell, date) = row.context("Failed to read row")?;
        let timestamp = parse_timestamp(&date)
            .with_context(|| format!("Corrupt date in ledger row for {coin_id}"))?;
        Ok(Transaction {
            coin_id,
            currency,
            amount,
            is_sell: sell != 0,
            timestamp,
        })
    })
    .collect()
}
