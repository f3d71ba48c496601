// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting and parsing.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Format a calendar date the way exercise logs show it, e.g. `Mon Jan 01 2024`.
pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
///
/// Nanosecond precision keeps creation order stable when sorted as strings.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Today's calendar date in UTC.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Parse a client-supplied date.
///
/// Accepts `YYYY-MM-DD` or an RFC3339 timestamp (reduced to its UTC day).
/// Returns `None` for anything else.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc).date_naive())
    })
}
