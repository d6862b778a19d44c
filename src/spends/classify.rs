use crate::model::{SpendGroup, SpendRecord};
use crate::spends::has_token_exact;

/// The marker that puts a spend into the EMI group.
pub const EMI_TOKEN: &str = "EMI";

/// How EMI spends are recognized.
///
/// The category report and the group report have always disagreed on this. The category report
/// looks for the `EMI` token in either the category or the tags, the group report only accepts a
/// category that is exactly `EMI`.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
pub enum EmiMatch {
    /// `EMI` is an element of the comma separated category or tags.
    #[default]
    Tokens,
    /// The whole category is exactly `EMI`. Tags are ignored.
    CategoryExact,
}

impl EmiMatch {
    pub fn is_emi<R>(self, record: &R) -> bool
    where
        R: SpendRecord + ?Sized,
    {
        match self {
            EmiMatch::Tokens => {
                has_token_exact(record.category(), EMI_TOKEN)
                    || has_token_exact(record.tags(), EMI_TOKEN)
            }
            EmiMatch::CategoryExact => record.category() == Some(EMI_TOKEN),
        }
    }
}

/// Assigns a record to exactly one `SpendGroup`.
///
/// EMI wins over the irregular marker, which wins over the default of `Regular`. Eligibility is
/// not checked here; callers skip ineligible records before classifying.
pub fn classify<R>(record: &R, emi: EmiMatch) -> SpendGroup
where
    R: SpendRecord + ?Sized,
{
    if emi.is_emi(record) {
        SpendGroup::Emi
    } else if record.irregular_spends() {
        SpendGroup::Irregular
    } else {
        SpendGroup::Regular
    }
}
