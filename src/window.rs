//! Time-window normalization: (date, time-of-day) pairs to comparable instants.
//!
//! Everything operates in one implicit local timezone, the way dates and
//! times are entered on the intake form. No timezone conversion happens.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Serialize, Serializer};

/// Time used when a date carries no time-of-day.
pub const MIDNIGHT: &str = "00:00";

/// A local date and time. Totally ordered; renders as `YYYY-MM-DDTHH:MM:SS`,
/// which sorts the same way as the value itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointInTime(NaiveDateTime);

impl PointInTime {
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self(date.and_time(time))
    }
}

impl fmt::Display for PointInTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S"))
    }
}

impl Serialize for PointInTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()
}

/// Parse a 24-hour clock string: `HH:MM`, `H:MM` or `HH:MM:SS`.
pub fn parse_clock(time: &str) -> Option<NaiveTime> {
    let time = time.trim();
    NaiveTime::parse_from_str(time, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
        .ok()
}

/// Combine a date and an optional time-of-day into a single instant.
///
/// Returns `None` when the date is absent, empty or not a calendar date, or
/// when a time is given but is not a clock value. A missing time is midnight.
pub fn normalize(date: Option<&str>, time: Option<&str>) -> Option<PointInTime> {
    let date = parse_date(date.filter(|d| !d.trim().is_empty())?)?;
    let time = match time.map(str::trim).filter(|t| !t.is_empty()) {
        Some(t) => parse_clock(t)?,
        None => parse_clock(MIDNIGHT)?,
    };
    Some(PointInTime::new(date, time))
}

/// A half-open window `[start, end)`. Either bound may be missing when the
/// source data was incomplete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: Option<PointInTime>,
    pub end: Option<PointInTime>,
}

impl Window {
    pub fn new(start: Option<PointInTime>, end: Option<PointInTime>) -> Self {
        Self { start, end }
    }

    /// Both bounds, if present.
    pub fn bounds(&self) -> Option<(PointInTime, PointInTime)> {
        Some((self.start?, self.end?))
    }

    pub fn is_complete(&self) -> bool {
        self.bounds().is_some()
    }

    /// Whether the two windows share any instant. An end equal to the other
    /// window's start does not count. `None` if either window is incomplete.
    pub fn overlaps(&self, other: &Window) -> Option<bool> {
        let (a_start, a_end) = self.bounds()?;
        let (b_start, b_end) = other.bounds()?;
        Some(a_start < b_end && a_end > b_start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(date: &str, time: &str) -> Option<PointInTime> {
        normalize(Some(date), Some(time))
    }

    fn window(date: &str, start: &str, end: &str) -> Window {
        Window::new(at(date, start), at(date, end))
    }

    #[test]
    fn renders_iso_local() {
        let p = at("2025-09-20", "10:00").unwrap();
        assert_eq!(p.to_string(), "2025-09-20T10:00:00");
    }

    #[test]
    fn missing_time_is_midnight() {
        let p = normalize(Some("2025-09-20"), None).unwrap();
        assert_eq!(p.to_string(), "2025-09-20T00:00:00");
        let q = normalize(Some("2025-09-20"), Some("  ")).unwrap();
        assert_eq!(p, q);
    }

    #[test]
    fn missing_or_empty_date_is_none() {
        assert_eq!(normalize(None, Some("10:00")), None);
        assert_eq!(normalize(Some(""), Some("10:00")), None);
        assert_eq!(normalize(Some("   "), None), None);
    }

    #[test]
    fn unreadable_values_are_none() {
        assert_eq!(normalize(Some("20/09/2025"), Some("10:00")), None);
        assert_eq!(normalize(Some("2025-02-30"), None), None);
        assert_eq!(normalize(Some("2025-09-20"), Some("noon")), None);
        assert_eq!(normalize(Some("2025-09-20"), Some("25:00")), None);
    }

    #[test]
    fn single_digit_hour_and_seconds_accepted() {
        assert_eq!(at("2025-09-20", "7:05"), at("2025-09-20", "07:05"));
        assert_eq!(at("2025-09-20", "07:05:00"), at("2025-09-20", "07:05"));
    }

    #[test]
    fn ordering_matches_rendering() {
        let a = at("2025-09-20", "23:59").unwrap();
        let b = at("2025-09-21", "00:00").unwrap();
        assert!(a < b);
        assert!(a.to_string() < b.to_string());
    }

    #[test]
    fn overlapping_windows() {
        let a = window("2025-09-20", "10:00", "12:00");
        let b = window("2025-09-20", "11:00", "13:00");
        assert_eq!(a.overlaps(&b), Some(true));
        assert_eq!(b.overlaps(&a), Some(true));
    }

    #[test]
    fn abutting_windows_do_not_overlap() {
        let a = window("2025-09-20", "10:00", "12:00");
        let b = window("2025-09-20", "12:00", "14:00");
        assert_eq!(a.overlaps(&b), Some(false));
        assert_eq!(b.overlaps(&a), Some(false));
    }

    #[test]
    fn contained_window_overlaps() {
        let outer = Window::new(at("2025-09-19", "00:00"), at("2025-09-22", "23:59"));
        let inner = window("2025-09-20", "10:00", "12:00");
        assert_eq!(outer.overlaps(&inner), Some(true));
    }

    #[test]
    fn incomplete_window_cannot_overlap() {
        let a = window("2025-09-20", "10:00", "12:00");
        let b = Window::new(at("2025-09-20", "09:00"), None);
        assert!(!b.is_complete());
        assert_eq!(a.overlaps(&b), None);
        assert_eq!(b.overlaps(&a), None);
    }
}
