//! Symbolic date-range tokens and their resolution to concrete intervals.
//!
//! The listing endpoint accepts human-friendly tokens such as `"yesterday"`
//! or `"last month"`. Each token resolves to a [`DateInterval`] anchored on
//! the calendar date of "now" (UTC midnight), never on the wall-clock time.
//! Unknown tokens resolve to `None`, meaning "apply no date filter".

use chrono::{Datelike, Days, NaiveDate, NaiveTime};
use serde::Serialize;

use crate::types::Timestamp;

/// A `created_at` interval: inclusive lower bound, exclusive upper bound.
///
/// Either side may be open (`None`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateInterval {
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
}

impl DateInterval {
    /// Whether `ts` lies within `[from, to)`.
    pub fn contains(&self, ts: Timestamp) -> bool {
        self.from.map_or(true, |from| ts >= from) && self.to.map_or(true, |to| ts < to)
    }
}

/// The recognized date-range tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRange {
    Today,
    Yesterday,
    LastWeek,
    EarlyThisMonth,
    LastMonth,
    EarlyThisYear,
    /// Everything created before the previous month began. This is the only
    /// token bounded above instead of below.
    LongTimeAgo,
}

impl DateRange {
    /// Parse a token. Matching is exact: `"Today"` or `" today"` are
    /// unrecognized and yield `None`, like any other unknown string.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "today" => Some(Self::Today),
            "yesterday" => Some(Self::Yesterday),
            "last week" => Some(Self::LastWeek),
            "early this month" => Some(Self::EarlyThisMonth),
            "last month" => Some(Self::LastMonth),
            "early this year" => Some(Self::EarlyThisYear),
            "long time ago" => Some(Self::LongTimeAgo),
            _ => None,
        }
    }

    /// Resolve this token against the calendar date of `now`.
    ///
    /// Returns `None` only if the date arithmetic leaves chrono's
    /// representable range, which cannot happen for realistic clocks.
    pub fn interval(self, now: Timestamp) -> Option<DateInterval> {
        let today = now.date_naive();
        let this_month = first_of_month(today)?;
        let prev_month = first_of_month(this_month.checked_sub_days(Days::new(1))?)?;

        let (from, to) = match self {
            Self::Today => (Some(today), None),
            Self::Yesterday => (Some(today.checked_sub_days(Days::new(1))?), Some(today)),
            Self::LastWeek => (Some(today.checked_sub_days(Days::new(7))?), None),
            Self::EarlyThisMonth => (Some(this_month), None),
            Self::LastMonth => (Some(prev_month), Some(this_month)),
            Self::EarlyThisYear => (Some(first_of_year(today)?), None),
            Self::LongTimeAgo => (None, Some(prev_month)),
        };

        Some(DateInterval {
            from: from.map(start_of_day),
            to: to.map(start_of_day),
        })
    }
}

/// Resolve a free-form date-range token to an interval anchored on `now`.
///
/// Unrecognized tokens yield `None`; callers treat that as "no filter".
pub fn resolve(token: &str, now: Timestamp) -> Option<DateInterval> {
    DateRange::parse(token)?.interval(now)
}

fn first_of_month(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(u64::from(date.day0())))
}

fn first_of_year(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(u64::from(date.ordinal0())))
}

fn start_of_day(date: NaiveDate) -> Timestamp {
    date.and_time(NaiveTime::MIN).and_utc()
}
