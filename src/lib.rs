//! Spendwise categorizes personal bank transactions and aggregates spending.
//!
//! The core is in [`spends`]: [`has_token_exact`] matches a token inside a comma-separated
//! field, [`categorise_spends`] totals spending per category, and [`group_spends_category`]
//! splits it into EMI, Regular Spends and Irregular Spends. The rest of the crate loads
//! transactions from a JSON or CSV file, stores them behind [`TransactionRepository`] and drives
//! everything from the `spendwise` CLI.

pub mod args;
pub mod commands;
mod config;
mod error;
mod load;
pub mod model;
pub mod spends;
pub mod store;
mod utils;


pub use config::Config;
pub use error::{Error, ErrorType, Result};
pub use model::{
    GroupSpend, SpendCategory, SpendGroup, SpendRecord, Transaction, TransactionFilter,
};
pub use spends::{categorise_spends, classify, group_spends_category, has_token_exact};
pub use store::{MemoryStore, TransactionRepository};
