use crate::model::{SpendCategory, SpendGroup, SpendRecord};
use crate::spends::{classify, round_half_up, EmiMatch};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::trace;

/// The bucket name used for spends that have no category.
pub const UNCATEGORIZED: &str = "UNCATEGORIZED";

/// Aggregates eligible spends by category name.
///
/// - Only debits marked as expenses are considered.
/// - If `include_groups` is empty every group is included, otherwise only spends whose
///   `SpendGroup` (as decided by `EmiMatch::Tokens`) is listed are aggregated. Excluded spends do
///   not count towards the total that percentages are computed against.
/// - Spends without a category are collected under `UNCATEGORIZED`.
/// - `percentage` is the bucket's share of the included total, rounded to two decimals. It is 0
///   when the included total is not positive. Percentages are not corrected to sum to 100.
/// - With `sort` the result is ordered by `total_amount`, largest first. Ties, and the unsorted
///   result, keep the order in which each category was first seen.
pub fn categorise_spends<R>(
    records: &[R],
    include_groups: &[SpendGroup],
    sort: bool,
) -> Vec<SpendCategory>
where
    R: SpendRecord,
{
    let include_all = include_groups.is_empty();
    let mut buckets: Vec<SpendCategory> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut overall_total = 0.0;

    for record in records {
        if !record.is_eligible() {
            continue;
        }
        let group = classify(record, EmiMatch::Tokens);
        if !include_all && !include_groups.contains(&group) {
            continue;
        }

        let name = record.category().unwrap_or(UNCATEGORIZED);
        let amount = record.amount();
        match positions.get(name) {
            Some(&ix) => {
                let bucket = &mut buckets[ix];
                bucket.spends_count += 1;
                bucket.total_amount += amount;
            }
            None => {
                positions.insert(name, buckets.len());
                buckets.push(SpendCategory {
                    name: name.to_string(),
                    spends_count: 1,
                    total_amount: amount,
                    percentage: 0.0,
                });
            }
        }
        overall_total += amount;
    }

    if overall_total > 0.0 {
        for bucket in buckets.iter_mut() {
            bucket.percentage =
                round_half_up(bucket.total_amount / overall_total * 10000.0) / 100.0;
        }
    }

    if sort && buckets.len() > 1 {
        // Stable, so equal totals stay in first-seen order.
        buckets.sort_by(|a, b| {
            b.total_amount
                .partial_cmp(&a.total_amount)
                .unwrap_or(Ordering::Equal)
        });
    }

    trace!(
        "Aggregated {} records into {} categories, included total {overall_total}",
        records.len(),
        buckets.len()
    );
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Flag, Transaction, TransactionType};
    use crate::test::{sample_transactions, txn};

    fn names(spends: &[SpendCategory]) -> Vec<&str> {
        spends.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_empty_input() {
        let none: Vec<Transaction> = Vec::new();
        assert!(categorise_spends(&none, &[], true).is_empty());
    }

    #[test]
    fn test_all_ineligible_is_empty() {
        let mut credit = txn("1", 100.0, Some("SALARY"));
        credit.transaction_type = TransactionType::Credit;
        let mut transfer = txn("2", 100.0, Some("TRANSFER"));
        transfer.expense = Flag::No;
        let mut unknown = txn("3", 100.0, Some("X"));
        unknown.expense = Flag::NotApplicable;
        assert!(categorise_spends(&[credit, transfer, unknown], &[], true).is_empty());
    }

    #[test]
    fn test_concrete_scenario() {
        let spends = categorise_spends(&sample_transactions(), &[], true);
        assert_eq!(spends.len(), 2);
        // Both totals are 100, so the stable sort keeps first-seen order.
        assert_eq!(names(&spends), vec!["EMI", "FOOD"]);

        let emi = &spends[0];
        assert_eq!(emi.spends_count, 1);
        assert_eq!(emi.total_amount, 100.0);
        assert_eq!(emi.percentage, 50.0);

        let food = &spends[1];
        assert_eq!(food.spends_count, 2);
        assert_eq!(food.total_amount, 100.0);
        assert_eq!(food.percentage, 50.0);
    }

    #[test]
    fn test_uncategorized_bucket() {
        let data = vec![txn("1", 30.0, None), txn("2", 10.0, None)];
        let spends = categorise_spends(&data, &[], true);
        assert_eq!(spends.len(), 1);
        assert_eq!(spends[0].name, UNCATEGORIZED);
        assert_eq!(spends[0].spends_count, 2);
        assert_eq!(spends[0].total_amount, 40.0);
        assert_eq!(spends[0].percentage, 100.0);
    }

    #[test]
    fn test_sorted_by_total_descending() {
        let data = vec![
            txn("1", 5.0, Some("A")),
            txn("2", 50.0, Some("B")),
            txn("3", 20.0, Some("C")),
            txn("4", 40.0, Some("A")),
        ];
        let spends = categorise_spends(&data, &[], true);
        assert_eq!(names(&spends), vec!["B", "A", "C"]);
        for pair in spends.windows(2) {
            assert!(pair[0].total_amount >= pair[1].total_amount);
        }
    }

    #[test]
    fn test_unsorted_keeps_first_seen_order() {
        let data = vec![
            txn("1", 5.0, Some("A")),
            txn("2", 50.0, Some("B")),
            txn("3", 20.0, Some("C")),
        ];
        let spends = categorise_spends(&data, &[], false);
        assert_eq!(names(&spends), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_restrict_to_regular() {
        let spends = categorise_spends(&sample_transactions(), &[SpendGroup::Regular], true);
        // Only the regular FOOD spend is left, and it is the whole denominator.
        assert_eq!(spends.len(), 1);
        assert_eq!(spends[0].name, "FOOD");
        assert_eq!(spends[0].spends_count, 1);
        assert_eq!(spends[0].total_amount, 50.0);
        assert_eq!(spends[0].percentage, 100.0);
    }

    #[test]
    fn test_restrict_to_several_groups() {
        let spends = categorise_spends(
            &sample_transactions(),
            &[SpendGroup::Emi, SpendGroup::Irregular],
            true,
        );
        assert_eq!(names(&spends), vec!["EMI", "FOOD"]);
        assert_eq!(spends[1].total_amount, 50.0);
        assert_eq!(spends[0].percentage, 66.67);
        assert_eq!(spends[1].percentage, 33.33);
    }

    #[test]
    fn test_emi_from_tags_is_grouped_as_emi() {
        let mut car = txn("1", 80.0, Some("CAR"));
        car.tags = Some("loan, EMI".into());
        let data = vec![car, txn("2", 20.0, Some("FOOD"))];

        let emi_only = categorise_spends(&data, &[SpendGroup::Emi], true);
        assert_eq!(names(&emi_only), vec!["CAR"]);

        let regular_only = categorise_spends(&data, &[SpendGroup::Regular], true);
        assert_eq!(names(&regular_only), vec!["FOOD"]);
    }

    #[test]
    fn test_two_decimal_rounding() {
        let data = vec![
            txn("1", 1.0, Some("A")),
            txn("2", 1.0, Some("B")),
            txn("3", 1.0, Some("C")),
        ];
        let spends = categorise_spends(&data, &[], true);
        for s in &spends {
            assert_eq!(s.percentage, 33.33);
        }
    }

    #[test]
    fn test_percentages_within_bounds_and_totals_add_up() {
        let data: Vec<Transaction> = (0..40)
            .map(|i| {
                let mut t = txn(&i.to_string(), (i * 37 % 101) as f64 + 0.25, None);
                t.category = Some(format!("C{}", i % 7));
                t.irregular_spends = i % 3 == 0;
                if i % 5 == 0 {
                    t.tags = Some("x, EMI".into());
                }
                if i % 11 == 0 {
                    t.expense = Flag::No;
                }
                t
            })
            .collect();

        let eligible_total: f64 = data
            .iter()
            .filter(|t| t.is_eligible())
            .map(|t| t.amount())
            .sum();
        let spends = categorise_spends(&data, &[], true);
        let total: f64 = spends.iter().map(|s| s.total_amount).sum();
        assert!((total - eligible_total).abs() < 1e-9);
        for s in &spends {
            assert!((0.0..=100.0).contains(&s.percentage), "{s:?}");
        }
    }

    #[test]
    fn test_ineligible_records_do_not_matter() {
        let mut base = sample_transactions();
        let before = categorise_spends(&base, &[], true);

        // The credit in the sample is ineligible, so changing its other fields changes nothing.
        let credit = base
            .iter_mut()
            .find(|t| t.transaction_type == TransactionType::Credit)
            .unwrap();
        credit.amount = 99999.0;
        credit.category = Some("EMI".into());
        credit.irregular_spends = true;
        let after = categorise_spends(&base, &[], true);
        assert_eq!(before, after);
    }

    #[test]
    fn test_zero_total_gives_zero_percentages() {
        let data = vec![txn("1", 0.0, Some("A")), txn("2", 0.0, Some("B"))];
        let spends = categorise_spends(&data, &[], true);
        assert_eq!(spends.len(), 2);
        assert!(spends.iter().all(|s| s.percentage == 0.0));
    }

    #[test]
    fn test_nan_amount_propagates() {
        let data = vec![txn("1", f64::NAN, Some("A")), txn("2", 10.0, Some("B"))];
        let spends = categorise_spends(&data, &[], true);
        assert_eq!(spends.len(), 2);
        assert!(spends.iter().any(|s| s.total_amount.is_nan()));
        // The total is NaN, which is not positive, so no percentages are computed.
        assert!(spends.iter().all(|s| s.percentage == 0.0));
    }

    #[test]
    fn test_accepts_references() {
        let data = sample_transactions();
        let refs: Vec<&Transaction> = data.iter().collect();
        assert_eq!(
            categorise_spends(&refs, &[], true),
            categorise_spends(&data, &[], true)
        );
    }
}
