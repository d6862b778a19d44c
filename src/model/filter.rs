use crate::model::{SpendRecord, Transaction, TransactionType};
use chrono::NaiveDate;
use clap::Parser;
use serde::{Deserialize, Serialize};

/// Selects income (credits) or expenses (debits).
#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

serde_plain::derive_display_from_serialize!(TransactionKind);
serde_plain::derive_fromstr_from_deserialize!(TransactionKind);

impl TransactionKind {
    pub fn transaction_type(self) -> TransactionType {
        match self {
            TransactionKind::Income => TransactionType::Credit,
            TransactionKind::Expense => TransactionType::Debit,
        }
    }
}

/// An inclusive date range. Either end may be open.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }

    pub fn is_open(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Narrows down the transactions that a command looks at. Unset criteria match everything.
#[derive(Debug, Default, Clone, Parser, Serialize, Deserialize)]
pub struct TransactionFilter {
    /// Only income (credits) or only expenses (debits).
    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long, value_enum)]
    pub kind: Option<TransactionKind>,

    /// Exact category name.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    pub category: Option<String>,

    /// Exact account name.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    pub account: Option<String>,

    /// Smallest amount to include.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    pub min_amount: Option<f64>,

    /// Largest amount to include.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    pub max_amount: Option<f64>,

    /// First date to include, e.g. 2025-01-01.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last date to include, e.g. 2025-01-31.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Case-insensitive text to look for in the place, note, category and tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    pub search: Option<String>,
}

impl TransactionFilter {
    pub fn date_range(&self) -> DateRange {
        DateRange::new(self.from, self.to)
    }

    /// Returns true if `t` satisfies every criterion that is set.
    pub fn matches(&self, t: &Transaction) -> bool {
        if let Some(kind) = self.kind {
            if t.transaction_type() != kind.transaction_type() {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if t.category() != Some(category.as_str()) {
                return false;
            }
        }
        if let Some(account) = &self.account {
            if t.account() != account {
                return false;
            }
        }
        if let Some(min) = self.min_amount {
            if !(t.amount() >= min) {
                return false;
            }
        }
        if let Some(max) = self.max_amount {
            if !(t.amount() <= max) {
                return false;
            }
        }
        if !self.date_range().contains(t.date()) {
            return false;
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let found = [Some(t.place()), t.note(), t.category(), t.tags()]
                .into_iter()
                .flatten()
                .any(|haystack| haystack.to_lowercase().contains(&needle));
            if !found {
                return false;
            }
        }
        true
    }

    /// Returns the transactions in `data` that match, in their original order.
    pub fn apply<'a>(&self, data: &'a [Transaction]) -> Vec<&'a Transaction> {
        data.iter().filter(|t| self.matches(t)).collect()
    }
}
