use std::ops::RangeInclusive;

/// Realistic resale prices for the tracked motorcycles, in 만원.
///
/// Anything outside is extraction noise: quantities, percentages, or a
/// concatenated price range.
pub const PLAUSIBLE_PRICE_RANGE: RangeInclusive<i64> = 100..=10_000;

pub fn is_plausible(value: i64) -> bool {
    PLAUSIBLE_PRICE_RANGE.contains(&value)
}
