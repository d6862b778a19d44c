//! Spending reports.

use crate::args::{CategoriesArgs, ReportArgs};
use crate::commands::{open_store, plural, Out};
use crate::model::{GroupSpend, SpendCategory, SpendRecord};
use crate::spends::{categorise_spends, group_spends_category};
use crate::store::{TransactionRepository, TransactionStats};
use crate::utils::format_amount;
use crate::{Config, Result};

/// Totals eligible spending per category for the transactions that pass `args.filter()`.
///
/// # Returns
///
/// On success, returns an `Out` containing:
/// - A message with the number of categories found.
/// - The `SpendCategory` list, largest first unless `--no-sort` was given.
pub async fn categories(config: Config, args: CategoriesArgs) -> Result<Out<Vec<SpendCategory>>> {
    let store = open_store(&config).await?;
    let selected = args.filter().apply(store.all());
    let spends = categorise_spends(&selected, args.groups(), args.sort());

    let count = spends.len();
    let total: f64 = spends.iter().map(|s| s.total_amount).sum();
    let message = format!(
        "Found {count} spend categor{} totalling {}",
        if count == 1 { "y" } else { "ies" },
        format_amount(config.currency(), total)
    );
    let text = categories_table(config.currency(), &spends);
    Ok(Out::new(message, spends).with_text(text))
}

/// Splits eligible spending into EMI, Regular Spends and Irregular Spends for the transactions
/// that pass `args.filter()`.
pub async fn groups(config: Config, args: ReportArgs) -> Result<Out<[GroupSpend; 3]>> {
    let store = open_store(&config).await?;
    let selected = args.filter().apply(store.all());
    let groups = group_spends_category(&selected);

    let spends = selected.iter().filter(|t| t.is_eligible()).count();
    let total: f64 = groups.iter().map(|g| g.total_amount).sum();
    let message = format!(
        "Grouped {spends} spend{} totalling {}",
        plural(spends),
        format_amount(config.currency(), total)
    );
    let text = groups_table(config.currency(), &groups);
    Ok(Out::new(message, groups).with_text(text))
}

/// Sums income and expense for the transactions that pass `args.filter()`.
pub async fn stats(config: Config, args: ReportArgs) -> Result<Out<TransactionStats>> {
    let store = open_store(&config).await?;
    let stats = store.stats(args.filter());

    let message = format!(
        "Computed stats over {} transaction{}",
        stats.transaction_count,
        plural(stats.transaction_count)
    );
    let currency = config.currency();
    let text = format!(
        "Income:       {}\nExpense:      {}\nBalance:      {}\nTransactions: {}",
        format_amount(currency, stats.total_income),
        format_amount(currency, stats.total_expense),
        format_amount(currency, stats.balance),
        stats.transaction_count
    );
    Ok(Out::new(message, stats).with_text(text))
}

fn categories_table(currency: &str, spends: &[SpendCategory]) -> String {
    let amounts: Vec<String> = spends
        .iter()
        .map(|s| format_amount(currency, s.total_amount))
        .collect();
    let name_width = spends
        .iter()
        .map(|s| s.name.chars().count())
        .chain(std::iter::once("CATEGORY".len()))
        .max()
        .unwrap_or_default();
    let amount_width = amounts
        .iter()
        .map(|a| a.chars().count())
        .chain(std::iter::once("AMOUNT".len()))
        .max()
        .unwrap_or_default();

    let mut out = format!(
        "{:<name_width$}  {:>5}  {:>amount_width$}  {:>7}",
        "CATEGORY", "COUNT", "AMOUNT", "%"
    );
    for (spend, amount) in spends.iter().zip(amounts) {
        out.push_str(&format!(
            "\n{:<name_width$}  {:>5}  {:>amount_width$}  {:>7.2}",
            spend.name, spend.spends_count, amount, spend.percentage
        ));
    }
    out
}

fn groups_table(currency: &str, groups: &[GroupSpend]) -> String {
    let amounts: Vec<String> = groups
        .iter()
        .map(|g| format_amount(currency, g.total_amount))
        .collect();
    let amount_width = amounts
        .iter()
        .map(|a| a.chars().count())
        .chain(std::iter::once("AMOUNT".len()))
        .max()
        .unwrap_or_default();

    let mut out = format!("{:<16}  {:>amount_width$}  {:>4}", "GROUP", "AMOUNT", "%");
    for (group, amount) in groups.iter().zip(amounts) {
        out.push_str(&format!(
            "\n{:<16}  {:>amount_width$}  {:>4}",
            group.group.to_string(),
            amount,
            group.percentage
        ));
    }
    out
}
