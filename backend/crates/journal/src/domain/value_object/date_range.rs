//! Calendar-day ranges
//!
//! All day boundaries are UTC midnights.

use chrono::{DateTime, Days, NaiveDate, Utc};

/// Longest range the weekly statistics endpoint accepts, in days
pub const MAX_RANGE_DAYS: i64 = 366;

/// Parse a `YYYY-MM-DD` day
pub fn parse_day(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Invalid date {value:?}, expected YYYY-MM-DD"))
}

/// UTC midnight at the start of `day`
pub fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// Half-open instant window `[from, until)`; either side may be open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeWindow {
    pub from: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl TimeWindow {
    /// Window covering the inclusive days `start..=end`
    pub fn from_days(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, String> {
        if let (Some(s), Some(e)) = (start, end)
            && s > e
        {
            return Err("start must not be after end".to_string());
        }

        Ok(Self {
            from: start.map(start_of_day),
            until: end.and_then(|d| d.checked_add_days(Days::new(1))).map(start_of_day),
        })
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| instant >= from) && self.until.is_none_or(|until| instant < until)
    }
}

/// Inclusive range of days, at most [`MAX_RANGE_DAYS`] long
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, String> {
        if start > end {
            return Err("startDate must not be after endDate".to_string());
        }
        let days = (end - start).num_days() + 1;
        if days > MAX_RANGE_DAYS {
            return Err(format!("Date range must not exceed {MAX_RANGE_DAYS} days"));
        }
        Ok(Self { start, end })
    }

    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Every day in the range, in order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    pub fn window(&self) -> TimeWindow {
        TimeWindow {
            from: Some(start_of_day(self.start)),
            until: self
                .end
                .checked_add_days(Days::new(1))
                .map(start_of_day),
        }
    }
}
