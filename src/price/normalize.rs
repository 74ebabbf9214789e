/// Unit suffix meaning "10,000 won". Checked before [`WON`] since it contains it.
pub const MAN_WON: &str = "만원";
pub const WON_SIGN: &str = "₩";
pub const WON: &str = "원";

const MARKERS: [&str; 3] = [MAN_WON, WON_SIGN, WON];

/// Characters removed from the numeric core: thousands separators and the
/// tilde used for price ranges.
const NOISE: [char; 2] = [',', '~'];

/// Parse a scraped text fragment into a price.
///
/// Returns `None` when the fragment carries no currency marker or when what
/// remains after stripping markers, separators and whitespace is not an
/// integer. Most fragments on a page are not prices, so a `None` here is the
/// common case and is not worth logging.
///
/// ```
/// use bikewatch::price::normalize;
/// assert_eq!(normalize("1,250만원"), Some(1250));
/// assert_eq!(normalize("discount"), None);
/// ```
pub fn normalize(fragment: &str) -> Option<i64> {
    if !MARKERS.iter().any(|m| fragment.contains(m)) {
        return None;
    }

    let mut stripped = fragment.to_string();
    for marker in MARKERS {
        stripped = stripped.replace(marker, "");
    }

    let digits: String = stripped
        .chars()
        .filter(|c| !c.is_whitespace() && !NOISE.contains(c))
        .collect();

    digits.parse::<i64>().ok()
}
