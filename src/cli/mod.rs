//! User-facing commands and terminal helpers

pub mod add;
pub mod chart;
pub mod history;
pub mod price;
pub mod setup;
pub mod transfer;
pub mod ui;
pub mod value;
