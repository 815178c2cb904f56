pub mod sqlite;

pub use sqlite::Ledger;
