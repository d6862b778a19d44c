//! Reading and writing the transactions file.
//!
//! The file is a JSON array of `Transaction` objects, or a CSV file when its extension is `.csv`.
//! The CSV header row is:
//!
//! `Id,Date,Time,Place,Amount,Type,Account,Expense,Income,Irregular Spends,Category,Tags,Note`
//!
//! Empty cells mean "not set". A row with an empty `Id` is given a generated one.

use crate::error::Res;
use crate::model::{new_id, Flag, Transaction, TransactionType};
use crate::utils;
use anyhow::{bail, Context};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum DataFormat {
    Json,
    Csv,
}

impl DataFormat {
    pub(crate) fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => DataFormat::Csv,
            _ => DataFormat::Json,
        }
    }
}

/// Reads every transaction in the file at `path`, keeping the file's order.
pub(crate) async fn read_transactions(path: &Path) -> Res<Vec<Transaction>> {
    let transactions = match DataFormat::from_path(path) {
        DataFormat::Json => utils::deserialize::<Vec<Transaction>>(path).await?,
        DataFormat::Csv => {
            let content = utils::read(path).await?;
            parse_csv(&content)
                .with_context(|| format!("Failed to parse CSV file at {}", path.display()))?
        }
    };
    check_unique_ids(&transactions)
        .with_context(|| format!("Invalid transactions file {}", path.display()))?;
    debug!(
        "Read {} transactions from {}",
        transactions.len(),
        path.display()
    );
    Ok(transactions)
}

/// Replaces the file at `path` with `transactions`, in the format given by its extension.
pub(crate) async fn write_transactions(path: &Path, transactions: &[Transaction]) -> Res<()> {
    check_finite_amounts(transactions)
        .with_context(|| format!("Refusing to write {}", path.display()))?;
    let data = match DataFormat::from_path(path) {
        DataFormat::Json => serde_json::to_string_pretty(transactions)
            .context("Unable to serialize transactions")?
            .into_bytes(),
        DataFormat::Csv => to_csv(transactions)?,
    };
    utils::replace(path, data).await?;
    debug!(
        "Wrote {} transactions to {}",
        transactions.len(),
        path.display()
    );
    Ok(())
}

fn check_unique_ids(transactions: &[Transaction]) -> Res<()> {
    let mut seen = HashSet::new();
    for t in transactions {
        if !seen.insert(t.id()) {
            bail!("The transaction id '{}' appears more than once", t.id())
        }
    }
    Ok(())
}

/// JSON has no NaN or infinity, so such an amount would be written as `null` and could not be
/// read back.
fn check_finite_amounts(transactions: &[Transaction]) -> Res<()> {
    match transactions.iter().find(|t| !t.amount.is_finite()) {
        Some(t) => bail!(
            "The transaction '{}' has the amount {}, which is not a finite number",
            t.id(),
            t.amount
        ),
        None => Ok(()),
    }
}

fn parse_csv(content: &str) -> Res<Vec<Transaction>> {
    let mut rdr = csv::Reader::from_reader(content.as_bytes());
    let mut transactions = Vec::new();
    for (ix, result) in rdr.deserialize().enumerate() {
        // Row 1 is the header.
        let row = ix + 2;
        let record: CsvRecord = result.with_context(|| format!("Unable to read row {row}"))?;
        let transaction =
            Transaction::try_from(record).with_context(|| format!("Invalid data in row {row}"))?;
        transactions.push(transaction);
    }
    Ok(transactions)
}

fn to_csv(transactions: &[Transaction]) -> Res<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for t in transactions {
        wtr.serialize(CsvRecord::from(t))
            .with_context(|| format!("Unable to write transaction '{}' as CSV", t.id()))?;
    }
    wtr.into_inner().context("Unable to flush CSV data")
}

/// One row of the CSV form of the transactions file. Every cell is kept as text and converted
/// with `TryFrom`.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct CsvRecord {
    id: String,
    date: String,
    time: String,
    place: String,
    amount: String,
    #[serde(rename = "Type")]
    transaction_type: String,
    account: String,
    expense: String,
    income: String,
    #[serde(rename = "Irregular Spends")]
    irregular_spends: String,
    category: String,
    tags: String,
    note: String,
}

impl TryFrom<CsvRecord> for Transaction {
    type Error = anyhow::Error;

    fn try_from(r: CsvRecord) -> Res<Self> {
        let id = match r.id.trim() {
            "" => new_id(),
            id => id.to_string(),
        };
        let date = NaiveDate::from_str(r.date.trim())
            .with_context(|| format!("Unable to parse Date '{}'", r.date))?;
        let amount = parse_amount(&r.amount)?;
        let transaction_type = TransactionType::from_str(r.transaction_type.trim())
            .with_context(|| format!("Type must be DR or CR, got '{}'", r.transaction_type))?;
        Ok(Self {
            id,
            date,
            time: r.time,
            place: r.place,
            amount,
            transaction_type,
            account: r.account,
            expense: parse_flag("Expense", &r.expense)?,
            income: parse_flag("Income", &r.income)?,
            irregular_spends: r.irregular_spends.trim() == "Yes",
            category: cell(r.category),
            tags: cell(r.tags),
            note: cell(r.note),
            is_reimbersable: None,
            reimbersed_tran_id: None,
        })
    }
}

impl From<&Transaction> for CsvRecord {
    fn from(t: &Transaction) -> Self {
        Self {
            id: t.id.clone(),
            date: t.date.to_string(),
            time: t.time.clone(),
            place: t.place.clone(),
            amount: t.amount.to_string(),
            transaction_type: t.transaction_type.to_string(),
            account: t.account.clone(),
            expense: t.expense.to_string(),
            income: t.income.to_string(),
            irregular_spends: if t.irregular_spends { "Yes" } else { "" }.to_string(),
            category: t.category.clone().unwrap_or_default(),
            tags: t.tags.clone().unwrap_or_default(),
            note: t.note.clone().unwrap_or_default(),
        }
    }
}

/// Bank exports write thousands separators, e.g. `1,250.50`.
fn parse_amount(s: &str) -> Res<f64> {
    let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        bail!("Amount is empty")
    }
    let amount =
        f64::from_str(&cleaned).with_context(|| format!("Unable to parse Amount '{s}'"))?;
    if !amount.is_finite() {
        bail!("Amount '{s}' is not a finite number")
    }
    Ok(amount)
}

fn parse_flag(column: &str, s: &str) -> Res<Flag> {
    match s.trim() {
        "" => Ok(Flag::NotApplicable),
        value => Flag::from_str(value)
            .with_context(|| format!("{column} must be Yes, No or -, got '{value}'")),
    }
}

fn cell(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
