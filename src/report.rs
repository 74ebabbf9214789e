//! Report assembly over a whole watchlist sweep.

use chrono::{DateTime, TimeDelta, TimeZone};
use tracing::warn;

use crate::fetch::FetchOutcome;
use crate::models::{PriceStats, Profile};

/// Sent instead of a report when the watchlist is empty.
pub const EMPTY_WATCHLIST_NOTICE: &str = "등록된 기종 없음";

/// Shown for a profile with no usable data, whether the fetch failed or
/// simply found nothing.
pub const NO_DATA_NOTICE: &str = "매물 없거나 오류 발생";

pub const REPORT_TITLE: &str = "오늘 라이트바겐 중고 바이크 시세";

const KST_OFFSET_HOURS: i64 = 9;

/// Build the report body for `profiles`, calling `fetch` once per profile
/// in order.
///
/// Always returns text: failed profiles degrade to a no-data entry, and an
/// empty watchlist yields [`EMPTY_WATCHLIST_NOTICE`] alone.
pub fn build_report<F>(profiles: &[Profile], mut fetch: F) -> String
where
    F: FnMut(&Profile) -> FetchOutcome,
{
    if profiles.is_empty() {
        return EMPTY_WATCHLIST_NOTICE.to_string();
    }

    let mut entries = Vec::with_capacity(profiles.len());
    for profile in profiles {
        let Some(years) = profile.year_range else {
            warn!(profile = %profile.key, "skipping profile without a year range");
            continue;
        };

        let heading = format!("{} ({})", profile.display_name(), years);
        let entry = match fetch(profile) {
            Ok(summary) => match summary.stats() {
                Some(stats) => format_stats(&heading, stats),
                None => format_no_data(&heading),
            },
            // Already logged with its cause by the fetcher.
            Err(_) => format_no_data(&heading),
        };
        entries.push(entry);
    }

    entries.join("\n\n")
}

fn format_stats(heading: &str, stats: &PriceStats) -> String {
    format!(
        "📌 {heading}\n   • 평균: {}만원\n   • 최저: {}만원\n   • 최고: {}만원\n   • 매물: {}대",
        format_thousands(stats.mean),
        format_thousands(stats.min),
        format_thousands(stats.max),
        format_thousands(stats.count as i64),
    )
}

fn format_no_data(heading: &str) -> String {
    format!("{heading}: {NO_DATA_NOTICE}")
}

/// Dated first line of a delivered report, in Korean standard time.
pub fn report_header<Tz: TimeZone>(now: &DateTime<Tz>) -> String {
    let local = now.naive_utc() + TimeDelta::hours(KST_OFFSET_HOURS);
    format!("[{} KST] {REPORT_TITLE}", local.format("%Y-%m-%d %H:%M"))
}

/// `1234567` → `"1,234,567"`.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
