//! Wall-clock helpers shared by the stores and the views.
//!
//! `chrono` is built with `wasmbind`, so [`Utc::now`] and [`Local`] read the
//! browser clock and timezone on WASM and the OS on native.

use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{DateTime, Local, TimeZone, Utc};

/// Current time in milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// A fresh id for a post created locally, unique within this page's lifetime.
pub fn next_local_id() -> String {
    static SEQ: AtomicU32 = AtomicU32::new(0);
    let seq = SEQ.fetch_add(1, Ordering::Relaxed);
    format!("local-{:x}-{seq:04x}", now_millis())
}

/// "Postado em" date of a post, e.g. `14/10/2026`, in the viewer's timezone.
pub fn posted_on(created_at_ms: i64) -> String {
    posted_on_in(created_at_ms, &Local)
}

pub fn posted_on_in<Tz: TimeZone>(created_at_ms: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match at(created_at_ms, tz) {
        Some(dt) => dt.format("%d/%m/%Y").to_string(),
        None => String::new(),
    }
}

/// Dashboard time label: `HH:MM • Hoje`, `HH:MM • Ontem` or `HH:MM • dd/mm`.
pub fn time_label(created_at_ms: i64) -> String {
    time_label_in(created_at_ms, now_millis(), &Local)
}

pub fn time_label_in<Tz: TimeZone>(created_at_ms: i64, now_ms: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let (Some(created), Some(now)) = (at(created_at_ms, tz), at(now_ms, tz)) else {
        return String::new();
    };
    let time = created.format("%H:%M");
    let days = now.date_naive().signed_duration_since(created.date_naive()).num_days();
    match days {
        0 => format!("{time} • Hoje"),
        1 => format!("{time} • Ontem"),
        _ => format!("{time} • {}", created.format("%d/%m")),
    }
}

fn at<Tz: TimeZone>(ms: i64, tz: &Tz) -> Option<DateTime<Tz>> {
    DateTime::<Utc>::from_timestamp_millis(ms).map(|dt| dt.with_timezone(tz))
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2026-10-14T12:30:00Z
    const NOON: i64 = 1_791_981_000_000;
    const HOUR: i64 = 3_600_000;

    #[test]
    fn test_time_label_today_yesterday_older() {
        assert_eq!(time_label_in(NOON - HOUR, NOON, &Utc), "11:30 • Hoje");
        assert_eq!(time_label_in(NOON - 24 * HOUR, NOON, &Utc), "12:30 • Ontem");
        assert_eq!(time_label_in(NOON - 72 * HOUR, NOON, &Utc), "12:30 • 11/10");
    }

    #[test]
    fn test_posted_on_formats_day_month_year() {
        assert_eq!(posted_on_in(NOON, &Utc), "14/10/2026");
    }

    #[test]
    fn test_local_ids_are_unique() {
        assert_ne!(next_local_id(), next_local_id());
    }
}
