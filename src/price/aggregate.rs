use crate::models::{PriceStats, ProfileSummary};

/// Reduce accepted prices into count, mean, min and max.
///
/// The mean is rounded half-to-even on exact integer arithmetic, so
/// `[100, 101]` averages to 100 and `[101, 102]` to 102.
pub fn aggregate(values: &[i64]) -> ProfileSummary {
    let (Some(&min), Some(&max)) = (values.iter().min(), values.iter().max()) else {
        return ProfileSummary::NoData;
    };

    let count = values.len();
    let sum: i128 = values.iter().map(|&v| i128::from(v)).sum();
    let mean = round_half_even_div(sum, count as i128);

    ProfileSummary::Prices(PriceStats {
        count,
        mean,
        min,
        max,
    })
}

/// `numerator / denominator` rounded to the nearest integer, ties to even.
///
/// `denominator` must be positive.
pub fn round_half_even_div(numerator: i128, denominator: i128) -> i64 {
    let quotient = numerator.div_euclid(denominator);
    let remainder = numerator.rem_euclid(denominator);

    let rounded = match (2 * remainder).cmp(&denominator) {
        std::cmp::Ordering::Less => quotient,
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Equal if quotient % 2 == 0 => quotient,
        std::cmp::Ordering::Equal => quotient + 1,
    };
    rounded as i64
}
