//! Price extraction stages: text normalization, plausibility filtering and
//! aggregation into a [`ProfileSummary`](crate::models::ProfileSummary).
//!
//! All prices are whole 만원 (10,000 KRW) as scraped; nothing here rescales.

pub mod aggregate;
pub mod normalize;
pub mod plausibility;

pub use aggregate::{aggregate, round_half_even_div};
pub use normalize::normalize;
pub use plausibility::{is_plausible, PLAUSIBLE_PRICE_RANGE};
