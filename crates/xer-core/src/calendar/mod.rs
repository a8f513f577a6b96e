mod packed;

pub use packed::CalendarDataError;

use crate::config::DEFAULT_HOURS_PER_DAY;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A span of working time within one day, in minutes after midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorkInterval {
    pub start: u16,
    pub end: u16,
}

impl WorkInterval {
    pub const END_OF_DAY: u16 = 24 * 60;

    /// `None` unless `start < end <= 24:00`.
    pub fn new(start: u16, end: u16) -> Option<Self> {
        (start < end && end <= Self::END_OF_DAY).then_some(Self { start, end })
    }

    pub fn from_hours(start: u16, end: u16) -> Option<Self> {
        Self::new(start.checked_mul(60)?, end.checked_mul(60)?)
    }

    pub fn minutes(&self) -> u32 {
        u32::from(self.end - self.start)
    }
}

/// The hour-count columns of a CALENDAR row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HourCounts {
    pub day: Option<f64>,
    pub week: Option<f64>,
    pub month: Option<f64>,
    pub year: Option<f64>,
}

/// Working time of a calendar: a weekly pattern plus dated exceptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkCalendar {
    /// Indexed from Monday.
    weekly: [Vec<WorkInterval>; 7],
    exceptions: BTreeMap<NaiveDate, Vec<WorkInterval>>,
    hours: HourCounts,
    fallback_day_hours: f64,
}

impl Default for WorkCalendar {
    fn default() -> Self {
        Self::empty(HourCounts::default(), DEFAULT_HOURS_PER_DAY)
    }
}

impl WorkCalendar {
    /// A calendar with no working time at all.
    pub fn empty(hours: HourCounts, fallback_day_hours: f64) -> Self {
        let fallback_day_hours = if fallback_day_hours.is_finite() && fallback_day_hours > 0.0 {
            fallback_day_hours
        } else {
            DEFAULT_HOURS_PER_DAY
        };
        Self {
            weekly: Default::default(),
            exceptions: BTreeMap::new(),
            hours,
            fallback_day_hours,
        }
    }

    /// Decodes a `clndr_data` value. Blank input gives an empty pattern.
    pub fn decode(
        raw: &str,
        hours: HourCounts,
        fallback_day_hours: f64,
    ) -> Result<Self, CalendarDataError> {
        let mut calendar = Self::empty(hours, fallback_day_hours);
        if raw.trim().is_empty() {
            return Ok(calendar);
        }

        let packed = packed::parse_calendar_data(raw)?;
        for (weekday, intervals) in packed.weekly {
            calendar.set_weekday(weekday, intervals);
        }
        for (date, intervals) in packed.exceptions {
            calendar.set_exception(date, intervals);
        }
        Ok(calendar)
    }

    pub fn set_weekday(&mut self, weekday: Weekday, intervals: Vec<WorkInterval>) {
        self.weekly[weekday.num_days_from_monday() as usize] = merge_intervals(intervals);
    }

    /// Replaces the working time of one date. An empty list makes it a
    /// non-working day.
    pub fn set_exception(&mut self, date: NaiveDate, intervals: Vec<WorkInterval>) {
        self.exceptions.insert(date, merge_intervals(intervals));
    }

    pub fn add_holiday(&mut self, date: NaiveDate) {
        self.set_exception(date, Vec::new());
    }

    pub fn weekday_pattern(&self, weekday: Weekday) -> &[WorkInterval] {
        &self.weekly[weekday.num_days_from_monday() as usize]
    }

    pub fn exceptions(&self) -> &BTreeMap<NaiveDate, Vec<WorkInterval>> {
        &self.exceptions
    }

    pub fn exception(&self, date: NaiveDate) -> Option<&[WorkInterval]> {
        self.exceptions.get(&date).map(Vec::as_slice)
    }

    /// Ordered working intervals of a date, exceptions taking precedence.
    pub fn work_minutes(&self, date: NaiveDate) -> &[WorkInterval] {
        match self.exceptions.get(&date) {
            Some(intervals) => intervals,
            None => self.weekday_pattern(date.weekday()),
        }
    }

    pub fn is_working(&self, date: NaiveDate) -> bool {
        self.minutes_on(date) > 0
    }

    /// Total working minutes of a date.
    pub fn minutes_on(&self, date: NaiveDate) -> u32 {
        self.work_minutes(date).iter().map(WorkInterval::minutes).sum()
    }

    pub fn working_hours_on(&self, date: NaiveDate) -> f64 {
        f64::from(self.minutes_on(date)) / 60.0
    }

    /// Hours in the weekly pattern, exceptions ignored.
    pub fn weekly_hours(&self) -> f64 {
        let minutes: u32 = self
            .weekly
            .iter()
            .flatten()
            .map(WorkInterval::minutes)
            .sum();
        f64::from(minutes) / 60.0
    }

    pub fn hour_counts(&self) -> HourCounts {
        self.hours
    }

    pub fn hours_per_day(&self) -> f64 {
        usable(self.hours.day).unwrap_or(self.fallback_day_hours)
    }

    pub fn hours_per_week(&self) -> f64 {
        usable(self.hours.week).unwrap_or_else(|| self.hours_per_day() * 5.0)
    }

    pub fn hours_per_month(&self) -> f64 {
        usable(self.hours.month).unwrap_or_else(|| self.hours_per_week() * 52.0 / 12.0)
    }

    pub fn hours_per_year(&self) -> f64 {
        usable(self.hours.year).unwrap_or_else(|| self.hours_per_week() * 52.0)
    }

    pub fn duration_in_days(&self, hours: f64) -> f64 {
        hours / self.hours_per_day()
    }

    /// The first working date after `from`, or `None` if the calendar never
    /// works again.
    pub fn next_working_day(&self, from: NaiveDate) -> Option<NaiveDate> {
        let horizon = self
            .exceptions
            .keys()
            .next_back()
            .copied()
            .filter(|last| *last > from)
            .unwrap_or(from)
            .checked_add_signed(Duration::days(7))?;

        let mut current = from.succ_opt()?;
        while current <= horizon {
            if self.is_working(current) {
                return Some(current);
            }
            current = current.succ_opt()?;
        }
        None
    }

    /// Working dates between `start` and `end`, both inclusive.
    pub fn working_days_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        start
            .iter_days()
            .take_while(|date| *date <= end)
            .filter(|date| self.is_working(*date))
            .collect()
    }

    pub fn count_working_days(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        start
            .iter_days()
            .take_while(|date| *date <= end)
            .filter(|date| self.is_working(*date))
            .count() as i64
    }
}

fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|hours| hours.is_finite() && *hours > 0.0)
}

/// Sorts intervals and merges the ones that overlap or touch.
fn merge_intervals(mut intervals: Vec<WorkInterval>) -> Vec<WorkInterval> {
    intervals.sort();
    let mut merged: Vec<WorkInterval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        match merged.last_mut() {
            Some(last) if interval.start <= last.end => last.end = last.end.max(interval.end),
            _ => merged.push(interval),
        }
    }
    merged
}

fn serial_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or(NaiveDate::MIN)
}

/// Converts a day serial (days since 1899-12-30) to a date.
pub fn serial_to_date(serial: i64) -> Option<NaiveDate> {
    serial_epoch().checked_add_signed(Duration::try_days(serial)?)
}

pub fn date_to_serial(date: NaiveDate) -> i64 {
    date.signed_duration_since(serial_epoch()).num_days()
}
