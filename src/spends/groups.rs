use crate::model::{GroupSpend, SpendGroup, SpendRecord};
use crate::spends::{classify, round_half_up, EmiMatch};
use tracing::trace;

/// Aggregates eligible spends into the three `SpendGroup`s.
///
/// Always returns one entry per group in the order EMI, Regular, Irregular, including groups with
/// nothing in them. Percentages are whole numbers. When there is any spending they are corrected
/// to sum to exactly 100 by giving the rounding drift to the group with the largest total. On a
/// tie for largest the group that comes first in report order gets it.
///
/// Unlike `categorise_spends`, a spend counts as EMI here only when its category is exactly `EMI`
/// (see `EmiMatch::CategoryExact`), and a NaN amount counts as 0.
pub fn group_spends_category<R>(records: &[R]) -> [GroupSpend; 3]
where
    R: SpendRecord,
{
    let mut totals = [0.0_f64; 3];

    for record in records {
        if !record.is_eligible() {
            continue;
        }
        let amount = record.amount();
        let amount = if amount.is_nan() { 0.0 } else { amount };
        totals[classify(record, EmiMatch::CategoryExact).index()] += amount;
    }

    let overall = totals[0] + totals[1] + totals[2];
    let mut result = SpendGroup::ALL.map(|group| GroupSpend {
        group,
        total_amount: totals[group.index()],
        percentage: 0,
    });

    if overall > 0.0 {
        for entry in result.iter_mut() {
            entry.percentage = round_half_up(entry.total_amount / overall * 100.0) as i64;
        }

        let drift = 100 - result.iter().map(|entry| entry.percentage).sum::<i64>();
        if drift != 0 {
            // Only a strictly larger total takes over, so ties go to the earlier group.
            let mut max_ix = 0;
            if totals[1] > totals[max_ix] {
                max_ix = 1;
            }
            if totals[2] > totals[max_ix] {
                max_ix = 2;
            }
            trace!("Correcting rounding drift of {drift} on {}", result[max_ix].group);
            result[max_ix].percentage += drift;
        }
    }

    result
}
