//! Spend categorization and aggregation.
//!
//! Everything in here is pure: the functions take a slice of records and return freshly built
//! aggregates. Nothing is cached and nothing is read from anywhere else, so they can be called
//! from any number of threads at once.

mod categories;
mod classify;
mod groups;
mod token;

pub use categories::{categorise_spends, UNCATEGORIZED};
pub use classify::{classify, EmiMatch, EMI_TOKEN};
pub use groups::group_spends_category;
pub use token::has_token_exact;

/// Rounds to the nearest integer with halves going toward positive infinity, so `2.5` becomes `3`
/// and `-2.5` becomes `-2`. NaN stays NaN.
pub(crate) fn round_half_up(x: f64) -> f64 {
    let rounded = x.round();
    // `f64::round` sends negative halves away from zero.
    if x - rounded == 0.5 {
        rounded + 1.0
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(2.4999), 2.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
        assert_eq!(round_half_up(0.0), 0.0);
        assert!(round_half_up(f64::NAN).is_nan());
        assert_eq!(round_half_up(f64::INFINITY), f64::INFINITY);
    }
}
