//! Decide whether the daily digest is due.
//!
//! The digest is shown once per local calendar day. A caller records when the
//! employee was last active and asks here whether that moment falls before
//! the start of today.

use chrono::{DateTime, Duration, Local, NaiveTime, TimeZone};

/// Return `true` when the digest has not been shown yet today.
///
/// `last_active_at` is in seconds since the Unix epoch. A missing or zero
/// timestamp always means "show".
pub fn should_show_daily_news(last_active_at: Option<i64>) -> bool {
    should_show_daily_news_at(last_active_at, &Local::now())
}

/// Same as [`should_show_daily_news`], evaluated against an explicit `now`.
pub fn should_show_daily_news_at<Tz: TimeZone>(
    last_active_at: Option<i64>,
    now: &DateTime<Tz>,
) -> bool {
    match last_active_at {
        None | Some(0) => true,
        Some(ts) => ts < start_of_day(now),
    }
}

/// Epoch seconds of local midnight on the day containing `now`.
///
/// When midnight does not exist locally (a DST gap), the first valid instant
/// an hour later is used. When it exists twice, the earlier one wins.
pub fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> i64 {
    let tz = now.timezone();
    let midnight = now.date_naive().and_time(NaiveTime::MIN);

    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(midnight + Duration::hours(1))).earliest())
        .map(|t| t.timestamp())
        .unwrap_or_else(|| midnight.and_utc().timestamp())
}
