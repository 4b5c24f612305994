//! Duration decoding for provider documents.
//!
//! The extraction tool reports seconds as a number or a string (sometimes
//! fractional, sometimes quoted); the YouTube API reports ISO-8601 periods
//! such as `PT4M5S`. Both decoders return `None` on anything they cannot
//! read; the adapters turn that into a zero duration.

use std::sync::LazyLock;

use chrono::TimeDelta;
use regex::Regex;

/// `P[nW][nD][T[nH][nM][n[.f]S]]`. Year and month designators are not
/// accepted because they have no fixed length in seconds.
static ISO_PERIOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^P(?:(?<w>\d+)W)?(?:(?<d>\d+)D)?(?:T(?:(?<h>\d+)H)?(?:(?<m>\d+)M)?(?:(?<s>\d+)(?:[.,]\d+)?S)?)?$",
    )
    .unwrap()
});

/// Parse a seconds count from a raw JSON value's text.
///
/// Surrounding quotes and any fractional part are dropped, so `245`,
/// `"245"` and `"245.7"` all give 245.
pub fn parse_seconds(raw: &str) -> Option<u64> {
    let unquoted = raw.trim().trim_matches('"').trim();
    let whole = unquoted.split('.').next().unwrap_or_default();
    whole.parse::<u64>().ok()
}

/// Parse an ISO-8601 period into whole seconds.
pub fn parse_iso8601(period: &str) -> Option<u64> {
    let caps = ISO_PERIOD.captures(period.trim())?;

    // "P" and "PT" alone are not valid periods
    let has_component = ["w", "d", "h", "m", "s"]
        .iter()
        .any(|name| caps.name(name).is_some());
    if !has_component {
        return None;
    }

    let part = |name: &str| -> Option<i64> {
        caps.name(name)
            .map_or(Some(0), |m| m.as_str().parse::<i64>().ok())
    };

    let total = TimeDelta::try_weeks(part("w")?)?
        .checked_add(&TimeDelta::try_days(part("d")?)?)?
        .checked_add(&TimeDelta::try_hours(part("h")?)?)?
        .checked_add(&TimeDelta::try_minutes(part("m")?)?)?
        .checked_add(&TimeDelta::try_seconds(part("s")?)?)?;

    u64::try_from(total.num_seconds()).ok()
}
