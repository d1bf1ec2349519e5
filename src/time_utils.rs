// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting and lenient parsing.

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Which end of a date range a bound belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundSide {
    Start,
    End,
}

/// Parse a user-typed date filter bound.
///
/// A plain `YYYY-MM-DD` covers the whole UTC day: a start bound begins at
/// midnight and an end bound runs to the last nanosecond of the day. A full
/// RFC3339 timestamp is used as given. Blank or malformed input yields
/// `None`, which callers treat as unbounded.
pub fn parse_date_bound(input: &str, side: BoundSide) -> Option<DateTime<Utc>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        let time = match side {
            BoundSide::Start => NaiveTime::MIN,
            BoundSide::End => NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)?,
        };
        return Some(date.and_time(time).and_utc());
    }

    match DateTime::parse_from_rfc3339(trimmed) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(e) => {
            tracing::debug!(input = trimmed, error = %e, "Ignoring malformed date bound");
            None
        }
    }
}
