use crate::model::SpendRecord;
use chrono::NaiveDate;
use clap::Parser;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Whether money left (`DR`) or entered (`CR`) the account.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
pub enum TransactionType {
    #[default]
    #[serde(rename = "DR")]
    #[value(name = "dr")]
    Debit,
    #[serde(rename = "CR")]
    #[value(name = "cr")]
    Credit,
}

serde_plain::derive_display_from_serialize!(TransactionType);
serde_plain::derive_fromstr_from_deserialize!(TransactionType);

/// The three-valued marker used by the `expense` and `income` columns.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
pub enum Flag {
    #[serde(rename = "Yes")]
    #[value(name = "yes")]
    Yes,
    #[serde(rename = "No")]
    #[value(name = "no")]
    No,
    /// Not applicable, written as `-`.
    #[default]
    #[serde(rename = "-")]
    #[value(name = "na", alias = "-")]
    NotApplicable,
}

serde_plain::derive_display_from_serialize!(Flag);
serde_plain::derive_fromstr_from_deserialize!(Flag);

impl Flag {
    pub fn is_yes(&self) -> bool {
        *self == Flag::Yes
    }
}

/// A single transaction as shown on the dashboard.
///
/// The JSON representation uses the dashboard's camelCase field names, for example:
/// ```json
/// {
///   "id": "tx_1",
///   "date": "2025-01-05",
///   "time": "09:14",
///   "place": "HDFC Home Loan",
///   "amount": 24500,
///   "type": "DR",
///   "account": "HDFC Savings",
///   "expense": "Yes",
///   "income": "No",
///   "irregularSpends": null,
///   "category": "EMI",
///   "tags": "home, loan",
///   "note": null
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    // Older exports use numeric ids, so we accept either. Records without one get a new id.
    #[serde(default = "new_id", deserialize_with = "string_or_number")]
    pub(crate) id: String,
    pub(crate) date: NaiveDate,
    #[serde(default)]
    pub(crate) time: String,
    #[serde(default)]
    pub(crate) place: String,
    pub(crate) amount: f64,
    #[serde(rename = "type")]
    pub(crate) transaction_type: TransactionType,
    #[serde(default)]
    pub(crate) account: String,
    #[serde(default)]
    pub(crate) expense: Flag,
    #[serde(default)]
    pub(crate) income: Flag,
    #[serde(default, with = "yes_or_null")]
    pub(crate) irregular_spends: bool,
    #[serde(default)]
    pub(crate) category: Option<String>,
    #[serde(default)]
    pub(crate) tags: Option<String>,
    #[serde(default)]
    pub(crate) note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) is_reimbersable: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "opt_string_or_number"
    )]
    pub(crate) reimbersed_tran_id: Option<String>,
}

impl Transaction {
    /// Creates a transaction with a freshly generated ID from `new`.
    pub fn create(new: NewTransaction) -> Self {
        let expense = new.expense.unwrap_or(match new.transaction_type {
            TransactionType::Debit => Flag::Yes,
            TransactionType::Credit => Flag::No,
        });
        let income = new.income.unwrap_or(match new.transaction_type {
            TransactionType::Debit => Flag::No,
            TransactionType::Credit => Flag::Yes,
        });
        Self {
            id: new_id(),
            date: new.date,
            time: new.time.unwrap_or_default(),
            place: new.place.unwrap_or_default(),
            amount: new.amount,
            transaction_type: new.transaction_type,
            account: new.account.unwrap_or_default(),
            expense,
            income,
            irregular_spends: new.irregular,
            category: non_empty(new.category),
            tags: non_empty(new.tags),
            note: non_empty(new.note),
            is_reimbersable: None,
            reimbersed_tran_id: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn place(&self) -> &str {
        &self.place
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn income(&self) -> Flag {
        self.income
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn is_reimbersable(&self) -> bool {
        self.is_reimbersable.unwrap_or(false)
    }

    pub fn reimbersed_tran_id(&self) -> Option<&str> {
        self.reimbersed_tran_id.as_deref()
    }

    /// Set any of the fields on `self` that are set in `update`. An empty string clears an
    /// optional text field.
    pub fn merge_updates(&mut self, update: TransactionUpdates) {
        if let Some(x) = update.date {
            self.date = x;
        }
        if let Some(x) = update.time {
            self.time = x;
        }
        if let Some(x) = update.place {
            self.place = x;
        }
        if let Some(x) = update.amount {
            self.amount = x;
        }
        if let Some(x) = update.transaction_type {
            self.transaction_type = x;
        }
        if let Some(x) = update.account {
            self.account = x;
        }
        if let Some(x) = update.expense {
            self.expense = x;
        }
        if let Some(x) = update.income {
            self.income = x;
        }
        if let Some(x) = update.irregular {
            self.irregular_spends = x;
        }
        if update.category.is_some() {
            self.category = non_empty(update.category);
        }
        if update.tags.is_some() {
            self.tags = non_empty(update.tags);
        }
        if update.note.is_some() {
            self.note = non_empty(update.note);
        }
    }
}

impl SpendRecord for Transaction {
    fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    fn expense(&self) -> Flag {
        self.expense
    }

    fn amount(&self) -> f64 {
        self.amount
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn tags(&self) -> Option<&str> {
        self.tags.as_deref()
    }

    fn irregular_spends(&self) -> bool {
        self.irregular_spends
    }
}

impl Display for Transaction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {} [{}]",
            self.date,
            self.transaction_type,
            self.amount,
            self.place,
            self.category.as_deref().unwrap_or("-")
        )
    }
}

/// The fields needed to create a new transaction. The ID is generated.
///
/// When `expense` is not given it defaults to `Yes` for debits and `No` for credits, and `income`
/// defaults the other way around.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
pub struct NewTransaction {
    /// The date of the transaction, e.g. 2025-01-31.
    #[arg(long)]
    pub date: NaiveDate,

    /// The time of the transaction as free text, e.g. 18:05.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    pub time: Option<String>,

    /// The amount of money. Amounts are not signed, the direction is given by --type.
    #[arg(long, value_parser = parse_finite_amount)]
    pub amount: f64,

    /// Debit (money out) or credit (money in).
    #[serde(rename = "type")]
    #[arg(long = "type", value_enum, ignore_case = true, default_value_t = TransactionType::Debit)]
    pub transaction_type: TransactionType,

    /// Where the money was spent or came from.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    pub place: Option<String>,

    /// The account name.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    pub account: Option<String>,

    /// Whether a debit counts as an expense.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long, value_enum, ignore_case = true)]
    pub expense: Option<Flag>,

    /// Whether a credit counts as income.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long, value_enum, ignore_case = true)]
    pub income: Option<Flag>,

    /// Mark the transaction as an irregular spend.
    #[serde(default)]
    #[arg(long)]
    pub irregular: bool,

    /// The category, e.g. FOOD or EMI.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    pub category: Option<String>,

    /// Comma separated tags, e.g. "EMI, car".
    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    pub tags: Option<String>,

    /// A free text note.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    pub note: Option<String>,
}

/// The fields to update in a transaction. Only set values will be changed, unset values will not
/// be changed. Passing an empty string for `category`, `tags` or `note` clears it.
#[derive(Debug, Default, Clone, Parser, Serialize, Deserialize)]
pub struct TransactionUpdates {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    pub date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    pub time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    pub place: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long, value_parser = parse_finite_amount)]
    pub amount: Option<f64>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    #[arg(long = "type", value_enum, ignore_case = true)]
    pub transaction_type: Option<TransactionType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    pub account: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long, value_enum, ignore_case = true)]
    pub expense: Option<Flag>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long, value_enum, ignore_case = true)]
    pub income: Option<Flag>,

    /// Set or clear the irregular spend marker, e.g. --irregular true
    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    pub irregular: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    pub tags: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    pub note: Option<String>,
}

impl TransactionUpdates {
    /// True when no field would be changed.
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.time.is_none()
            && self.place.is_none()
            && self.amount.is_none()
            && self.transaction_type.is_none()
            && self.account.is_none()
            && self.expense.is_none()
            && self.income.is_none()
            && self.irregular.is_none()
            && self.category.is_none()
            && self.tags.is_none()
            && self.note.is_none()
    }
}

/// Parses a command line amount. NaN and infinities are rejected because they cannot be stored.
fn parse_finite_amount(s: &str) -> std::result::Result<f64, String> {
    let amount: f64 = s.parse().map_err(|e| format!("'{s}' is not a number: {e}"))?;
    if amount.is_finite() {
        Ok(amount)
    } else {
        Err(format!("'{s}' is not a finite amount"))
    }
}

pub(crate) fn new_id() -> String {
    format!("tx_{}", Uuid::new_v4().simple())
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.is_empty())
}

/// The `irregularSpends` column is either `"Yes"` or null.
mod yes_or_null {
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if *value {
            serializer.serialize_some("Yes")
        } else {
            serializer.serialize_none()
        }
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: Option<String> = Option::deserialize(deserializer)?;
        Ok(value.as_deref() == Some("Yes"))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Integer(i64),
    Float(f64),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Integer(i) => i.to_string(),
            StringOrNumber::Float(f) => f.to_string(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(String::from)
}

fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<StringOrNumber> = Option::deserialize(deserializer)?;
    Ok(value.map(String::from))
}
