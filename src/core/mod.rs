//! Core business logic abstractions

pub mod config;
pub mod holdings;
pub mod log;
pub mod position;
pub mod price;
pub mod transaction;
pub mod transfer;

// Re-export main types for cleaner imports
pub use holdings::{Holdings, compute_holdings};
pub use price::{PriceProvider, PriceQuote};
pub use transaction::Transaction;
pub use transfer::{ImportReport, RejectedRow};
