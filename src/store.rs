//! Transaction storage behind a small repository interface.

use crate::config::DEFAULT_PAGE_SIZE;
use crate::error::{Error, ErrorType, IntoResult};
use crate::model::{
    NewTransaction, SpendRecord, Transaction, TransactionFilter, TransactionType,
    TransactionUpdates,
};
use crate::Result;
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Which page of results to return. Pages are numbered from 1.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
}

impl PageRequest {
    /// Page 0 is treated as page 1 and a page size of 0 as the default of 20.
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page: page.max(1),
            page_size: if page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size
            },
        }
    }

    fn start(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// One page of a filtered listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// The number of matches across all pages.
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub has_more: bool,
}

/// Money in and out over a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStats {
    /// The sum of all credits.
    pub total_income: f64,
    /// The sum of all debits that count as expenses.
    pub total_expense: f64,
    pub balance: f64,
    pub transaction_count: usize,
}

impl TransactionStats {
    pub fn from_transactions<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let mut stats = Self::default();
        for t in transactions {
            stats.transaction_count += 1;
            if t.transaction_type() == TransactionType::Credit {
                stats.total_income += t.amount();
            } else if t.is_eligible() {
                stats.total_expense += t.amount();
            }
        }
        stats.balance = stats.total_income - stats.total_expense;
        stats
    }
}

/// Read and write access to a collection of transactions.
///
/// Writes take `&mut self`, so an implementation has exactly one writer at a time and readers
/// always see a consistent collection.
pub trait TransactionRepository {
    /// Every transaction in storage order.
    fn all(&self) -> &[Transaction];

    fn get(&self, id: &str) -> Option<&Transaction> {
        self.all().iter().find(|t| t.id() == id)
    }

    fn list(&self, filter: &TransactionFilter, page: PageRequest) -> Page<Transaction> {
        let matches = filter.apply(self.all());
        let total = matches.len();
        let start = page.start();
        let items: Vec<Transaction> = matches
            .into_iter()
            .skip(start)
            .take(page.page_size)
            .cloned()
            .collect();
        Page {
            has_more: start.saturating_add(items.len()) < total,
            items,
            total,
            page: page.page,
            page_size: page.page_size,
        }
    }

    fn stats(&self, filter: &TransactionFilter) -> TransactionStats {
        TransactionStats::from_transactions(filter.apply(self.all()))
    }

    /// Adds a transaction with a generated ID and returns it. The amount must be finite.
    fn insert(&mut self, new: NewTransaction) -> Result<Transaction>;

    /// Applies `updates` to the transaction with `id` and returns the updated transaction. A new
    /// amount must be finite.
    fn update(&mut self, id: &str, updates: TransactionUpdates) -> Result<Transaction>;

    /// Removes every transaction in `ids`. Nothing is removed if any of them is unknown. Returns
    /// the removed IDs, without repeats, in the order given.
    fn delete(&mut self, ids: &[String]) -> Result<Vec<String>>;
}

/// A `TransactionRepository` that holds everything in memory. Callers load it from and save it to
/// the transactions file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    transactions: Vec<Transaction>,
}

impl MemoryStore {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    pub fn into_inner(self) -> Vec<Transaction> {
        self.transactions
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.transactions.iter().position(|t| t.id() == id)
    }
}

impl TransactionRepository for MemoryStore {
    fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    fn insert(&mut self, new: NewTransaction) -> Result<Transaction> {
        check_amount(new.amount)?;
        let transaction = Transaction::create(new);
        debug!("Inserting transaction {}", transaction.id());
        self.transactions.push(transaction.clone());
        Ok(transaction)
    }

    fn update(&mut self, id: &str, updates: TransactionUpdates) -> Result<Transaction> {
        if let Some(amount) = updates.amount {
            check_amount(amount)?;
        }
        let ix = self
            .position(id)
            .ok_or_else(|| anyhow!("There is no transaction with id '{id}'"))
            .pub_result(ErrorType::Request)?;
        let transaction = &mut self.transactions[ix];
        transaction.merge_updates(updates);
        debug!("Updated transaction {id}");
        Ok(transaction.clone())
    }

    fn delete(&mut self, ids: &[String]) -> Result<Vec<String>> {
        let mut unique: Vec<String> = Vec::with_capacity(ids.len());
        for id in ids {
            if self.position(id).is_none() {
                return Err(Error::new(
                    ErrorType::Request,
                    anyhow!("There is no transaction with id '{id}'"),
                ));
            }
            if !unique.contains(id) {
                unique.push(id.clone());
            }
        }
        let doomed: HashSet<&str> = unique.iter().map(String::as_str).collect();
        self.transactions.retain(|t| !doomed.contains(t.id()));
        debug!("Deleted {} transactions", unique.len());
        Ok(unique)
    }
}

/// NaN and infinities cannot be written to the transactions file.
fn check_amount(amount: f64) -> Result<()> {
    if amount.is_finite() {
        Ok(())
    } else {
        Err(Error::new(
            ErrorType::Request,
            anyhow!("The amount must be a finite number, got {amount}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Flag, TransactionKind};
    use crate::test::{date, sample_transactions, txn};

    fn store_of(n: usize) -> MemoryStore {
        MemoryStore::new(
            (1..=n)
                .map(|i| txn(&i.to_string(), i as f64, None))
                .collect(),
        )
    }

    fn ids(page: &Page<Transaction>) -> Vec<&str> {
        page.items.iter().map(|t| t.id()).collect()
    }

    #[test]
    fn test_page_request_defaults() {
        assert_eq!(PageRequest::new(0, 0), PageRequest::new(1, 20));
        assert_eq!(PageRequest::default().page_size, 20);
    }

    #[test]
    fn test_list_pages() {
        let store = store_of(5);
        let filter = TransactionFilter::default();

        let first = store.list(&filter, PageRequest::new(1, 2));
        assert_eq!(ids(&first), vec!["1", "2"]);
        assert_eq!(first.total, 5);
        assert!(first.has_more);

        let last = store.list(&filter, PageRequest::new(3, 2));
        assert_eq!(ids(&last), vec!["5"]);
        assert!(!last.has_more);

        let beyond = store.list(&filter, PageRequest::new(9, 2));
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total, 5);
        assert!(!beyond.has_more);
    }

    #[test]
    fn test_list_exact_page_boundary() {
        let store = store_of(4);
        let page = store.list(&TransactionFilter::default(), PageRequest::new(2, 2));
        assert_eq!(ids(&page), vec!["3", "4"]);
        assert!(!page.has_more);
    }

    #[test]
    fn test_list_with_filter() {
        let store = MemoryStore::new(sample_transactions());
        let filter = TransactionFilter {
            category: Some("FOOD".into()),
            ..Default::default()
        };
        let page = store.list(&filter, PageRequest::default());
        assert_eq!(ids(&page), vec!["2", "3"]);
        assert_eq!(page.total, 2);
    }

    #[test]
    fn test_stats() {
        let store = MemoryStore::new(sample_transactions());
        let stats = store.stats(&TransactionFilter::default());
        assert_eq!(stats.total_income, 1000.0);
        assert_eq!(stats.total_expense, 200.0);
        assert_eq!(stats.balance, 800.0);
        assert_eq!(stats.transaction_count, 4);
    }

    #[test]
    fn test_stats_ignores_non_expense_debits() {
        let mut transfer = txn("1", 70.0, None);
        transfer.expense = Flag::No;
        let store = MemoryStore::new(vec![transfer, txn("2", 30.0, None)]);
        let stats = store.stats(&TransactionFilter::default());
        assert_eq!(stats.total_expense, 30.0);
        assert_eq!(stats.balance, -30.0);
        assert_eq!(stats.transaction_count, 2);
    }

    #[test]
    fn test_stats_filtered() {
        let store = MemoryStore::new(sample_transactions());
        let filter = TransactionFilter {
            kind: Some(TransactionKind::Expense),
            to: Some(date(2025, 1, 15)),
            ..Default::default()
        };
        let stats = store.stats(&filter);
        assert_eq!(stats.total_income, 0.0);
        assert_eq!(stats.total_expense, 150.0);
        assert_eq!(stats.transaction_count, 2);
    }

    fn new_spend(amount: f64) -> NewTransaction {
        NewTransaction {
            date: date(2025, 4, 1),
            time: None,
            amount,
            transaction_type: TransactionType::Debit,
            place: Some("Cafe".into()),
            account: None,
            expense: None,
            income: None,
            irregular: false,
            category: Some("FOOD".into()),
            tags: None,
            note: None,
        }
    }

    #[test]
    fn test_insert_and_get() {
        let mut store = MemoryStore::default();
        let inserted = store.insert(new_spend(12.5)).unwrap();
        assert_eq!(store.all().len(), 1);
        assert_eq!(store.get(inserted.id()), Some(&inserted));
        assert!(inserted.is_eligible());
    }

    #[test]
    fn test_update() {
        let mut store = MemoryStore::new(sample_transactions());
        let updated = store
            .update(
                "3",
                TransactionUpdates {
                    amount: Some(75.0),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.amount(), 75.0);
        assert_eq!(store.get("3").unwrap().amount(), 75.0);
    }

    #[test]
    fn test_non_finite_amounts_rejected() {
        let mut store = MemoryStore::new(sample_transactions());
        for amount in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = store.insert(new_spend(amount)).unwrap_err();
            assert_eq!(err.error_type(), ErrorType::Request);

            let updates = TransactionUpdates {
                amount: Some(amount),
                ..Default::default()
            };
            let err = store.update("3", updates).unwrap_err();
            assert_eq!(err.error_type(), ErrorType::Request);
        }
        assert_eq!(store, MemoryStore::new(sample_transactions()));
    }

    #[test]
    fn test_update_unknown_id() {
        let mut store = MemoryStore::new(sample_transactions());
        let err = store
            .update("nope", TransactionUpdates::default())
            .unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Request);
    }

    #[test]
    fn test_delete() {
        let mut store = MemoryStore::new(sample_transactions());
        let deleted = store
            .delete(&["3".to_string(), "1".to_string(), "3".to_string()])
            .unwrap();
        assert_eq!(deleted, vec!["3", "1"]);
        let remaining: Vec<&str> = store.all().iter().map(|t| t.id()).collect();
        assert_eq!(remaining, vec!["2", "4"]);
    }

    #[test]
    fn test_delete_is_all_or_nothing() {
        let mut store = MemoryStore::new(sample_transactions());
        let err = store
            .delete(&["1".to_string(), "missing".to_string()])
            .unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Request);
        assert_eq!(store.all().len(), 4);
    }
}
