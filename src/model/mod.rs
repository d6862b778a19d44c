//! Types that represent the core data model, such as `Transaction` and `SpendGroup`.
mod filter;
mod record;
mod spend;
mod transaction;

pub use filter::{DateRange, TransactionFilter, TransactionKind};
pub use record::SpendRecord;
pub use spend::{GroupSpend, SpendCategory, SpendGroup};
pub use transaction::{Flag, NewTransaction, Transaction, TransactionType, TransactionUpdates};

pub(crate) use transaction::new_id;
