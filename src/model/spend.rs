use serde::{Deserialize, Serialize};

/// The three mutually exclusive buckets that every eligible spend falls into.
#[derive(
    Debug,
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
pub enum SpendGroup {
    #[serde(rename = "EMI")]
    #[value(name = "emi")]
    Emi,
    #[serde(rename = "Regular Spends")]
    #[value(name = "regular")]
    Regular,
    #[serde(rename = "Irregular Spends")]
    #[value(name = "irregular")]
    Irregular,
}

serde_plain::derive_display_from_serialize!(SpendGroup);
serde_plain::derive_fromstr_from_deserialize!(SpendGroup);

impl SpendGroup {
    /// All groups in their fixed report order.
    pub const ALL: [SpendGroup; 3] = [SpendGroup::Emi, SpendGroup::Regular, SpendGroup::Irregular];

    /// The position of the group in `ALL`.
    pub const fn index(self) -> usize {
        match self {
            SpendGroup::Emi => 0,
            SpendGroup::Regular => 1,
            SpendGroup::Irregular => 2,
        }
    }
}

/// Spending aggregated by category name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendCategory {
    pub name: String,
    pub spends_count: usize,
    pub total_amount: f64,
    /// Share of the included total in the range 0..=100, rounded to two decimals.
    pub percentage: f64,
}

/// Spending aggregated by `SpendGroup`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSpend {
    pub group: SpendGroup,
    pub total_amount: f64,
    /// Whole percent. The three group percentages sum to exactly 100 when there is any spending.
    pub percentage: i64,
}
