use crate::model::{Flag, TransactionType};

/// The read-only view of a transaction that the spend aggregators need.
///
/// `Transaction` implements this, but anything that exposes these fields can be aggregated.
pub trait SpendRecord {
    fn transaction_type(&self) -> TransactionType;

    fn expense(&self) -> Flag;

    /// The amount is expected to be non-negative. Non-finite values are not rejected, they
    /// propagate through the sums.
    fn amount(&self) -> f64;

    /// `None` means uncategorized.
    fn category(&self) -> Option<&str>;

    /// A free text, comma separated list of tags.
    fn tags(&self) -> Option<&str>;

    fn irregular_spends(&self) -> bool;

    /// A record takes part in spend aggregation only if it is a debit that is marked as an
    /// expense.
    fn is_eligible(&self) -> bool {
        self.transaction_type() == TransactionType::Debit && self.expense() == Flag::Yes
    }
}

impl<T> SpendRecord for &T
where
    T: SpendRecord + ?Sized,
{
    fn transaction_type(&self) -> TransactionType {
        (**self).transaction_type()
    }

    fn expense(&self) -> Flag {
        (**self).expense()
    }

    fn amount(&self) -> f64 {
        (**self).amount()
    }

    fn category(&self) -> Option<&str> {
        (**self).category()
    }

    fn tags(&self) -> Option<&str> {
        (**self).tags()
    }

    fn irregular_spends(&self) -> bool {
        (**self).irregular_spends()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::txn;

    #[test]
    fn test_eligibility() {
        let mut t = txn("1", 10.0, None);
        assert!(t.is_eligible());

        t.expense = Flag::No;
        assert!(!t.is_eligible());

        t.expense = Flag::NotApplicable;
        assert!(!t.is_eligible());

        t.expense = Flag::Yes;
        t.transaction_type = TransactionType::Credit;
        assert!(!t.is_eligible());
    }

    #[test]
    fn test_reference_forwards() {
        let t = txn("1", 10.0, Some("FOOD"));
        let r = &t;
        assert_eq!(SpendRecord::category(&r), Some("FOOD"));
        assert_eq!(SpendRecord::amount(&r), 10.0);
        assert!(SpendRecord::is_eligible(&r));
    }
}
