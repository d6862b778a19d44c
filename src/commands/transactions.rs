//! Listing and editing transactions.

use crate::args::{DeleteArgs, ListArgs, UpdateArgs};
use crate::commands::{open_store, plural, save_store, Out};
use crate::error::{Error, ErrorType};
use crate::model::{NewTransaction, SpendRecord, Transaction};
use crate::store::{Page, PageRequest, TransactionRepository};
use crate::utils::format_amount;
use crate::{Config, Result};
use anyhow::anyhow;

/// Returns one page of the transactions that pass `args.filter()`, in file order.
///
/// The page size comes from `--page-size` or, when that is not given, from `config.json`.
pub async fn list(config: Config, args: ListArgs) -> Result<Out<Page<Transaction>>> {
    let store = open_store(&config).await?;
    let request = PageRequest::new(
        args.page(),
        args.page_size().unwrap_or_else(|| config.page_size()),
    );
    let page = store.list(args.filter(), request);

    let message = format!(
        "Showing {} of {} transaction{} (page {}{})",
        page.items.len(),
        page.total,
        plural(page.total),
        page.page,
        if page.has_more { ", more available" } else { "" }
    );
    let text = transactions_table(config.currency(), &page.items);
    Ok(Out::new(message, page).with_text(text))
}

/// Adds a transaction and saves the transactions file.
pub async fn insert_transaction(config: Config, new: NewTransaction) -> Result<Out<Transaction>> {
    let mut store = open_store(&config).await?;
    let inserted = store.insert(new)?;
    save_store(&config, store).await?;
    let message = format!("Inserted transaction {}", inserted.id());
    Ok(Out::new(message, inserted))
}

/// Updates the transaction `args.id()` and saves the transactions file.
///
/// # Errors
///
/// - Returns a `Request` error if no fields to change are given or the ID is unknown.
pub async fn update_transaction(config: Config, args: UpdateArgs) -> Result<Out<Transaction>> {
    if args.updates().is_empty() {
        return Err(Error::new(
            ErrorType::Request,
            anyhow!("No fields to update were given for transaction '{}'", args.id()),
        ));
    }
    let mut store = open_store(&config).await?;
    let updated = store.update(args.id(), args.updates().clone())?;
    save_store(&config, store).await?;
    let message = format!("Updated transaction {}", updated.id());
    Ok(Out::new(message, updated))
}

/// Deletes every transaction in `args.ids()` and saves the transactions file. If any ID is
/// unknown nothing is deleted.
pub async fn delete_transactions(config: Config, args: DeleteArgs) -> Result<Out<Vec<String>>> {
    let mut store = open_store(&config).await?;
    let deleted = store.delete(args.ids())?;
    save_store(&config, store).await?;
    let count = deleted.len();
    let message = format!("Deleted {count} transaction{}", plural(count));
    Ok(Out::new(message, deleted))
}

fn transactions_table(currency: &str, transactions: &[Transaction]) -> String {
    let id_width = transactions
        .iter()
        .map(|t| t.id().chars().count())
        .chain(std::iter::once("ID".len()))
        .max()
        .unwrap_or_default();
    let mut out = format!(
        "{:<id_width$}  {:<10}  {:<2}  {:>14}  {:<16}  PLACE",
        "ID", "DATE", "", "AMOUNT", "CATEGORY"
    );
    for t in transactions {
        out.push_str(&format!(
            "\n{:<id_width$}  {:<10}  {:<2}  {:>14}  {:<16}  {}",
            t.id(),
            t.date().to_string(),
            t.transaction_type().to_string(),
            format_amount(currency, t.amount()),
            t.category().unwrap_or("-"),
            t.place()
        ));
    }
    out
}
