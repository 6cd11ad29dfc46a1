//! Venue/time conflict detection against approved bookings.
//!
//! A request conflicts with a booking when both name the same venue and their
//! half-open windows share an instant. Detection runs in three passes:
//! venue join (identifier or case-folded name), a calendar-date pre-filter,
//! then a precise window overlap.
//!
//! The detector only reads. Keeping the approved set current is the caller's
//! job: the read of approved bookings, this check, and the write of a newly
//! approved booking must run as one atomic unit (a transaction or a lock at
//! the persistence boundary). A stale snapshot can approve a clash.

mod booking;
mod ledger;

pub use booking::{ApprovedBooking, BookingStatus, StoredBooking};
pub use ledger::BookingLedger;

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::Result;
use crate::request::EventRequest;
use crate::window::{self, PointInTime};

/// The join keys a request offers for finding bookings at the same venue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueKey {
    pub venue_id: Option<String>,
    /// Trimmed, lower-cased venue name; empty when none was given.
    pub location: String,
}

fn fold(text: &str) -> String {
    text.trim().to_lowercase()
}

impl VenueKey {
    pub fn of(request: &EventRequest) -> Self {
        Self {
            venue_id: request.venue_id.clone(),
            location: fold(&request.location),
        }
    }

    /// Either key matching is enough. Identifiers only match when both sides
    /// carry one; names only match when non-empty.
    pub fn matches(&self, booking: &ApprovedBooking) -> bool {
        let by_id = matches!(
            (self.venue_id.as_deref(), booking.venue_id.as_deref()),
            (Some(ours), Some(theirs)) if ours == theirs
        );
        by_id || (!self.location.is_empty() && fold(&booking.location) == self.location)
    }

    /// Neither an identifier nor a name to join on.
    pub fn is_empty(&self) -> bool {
        self.venue_id.is_none() && self.location.is_empty()
    }
}

/// An approved booking that overlaps the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collision {
    pub id: Option<i64>,
    pub venue_id: Option<String>,
    pub location: String,
    pub start: PointInTime,
    pub end: PointInTime,
}

/// A comparison that could not be made because a window was incomplete.
/// Each one means "no conflict reported" for that comparison, not "no
/// conflict exists".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WindowWarning {
    /// The request's own dates or times are missing or unreadable.
    RequestWindowIncomplete,
    /// The request names no venue id and no venue name, so no booking can
    /// be joined to it.
    NoVenueKey,
    /// A same-venue booking has missing or unreadable dates.
    BookingDatesUnreadable { id: Option<i64>, location: String },
    /// A same-venue booking on overlapping dates has unreadable times.
    BookingWindowIncomplete { id: Option<i64>, location: String },
}

impl fmt::Display for WindowWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowWarning::RequestWindowIncomplete => {
                write!(f, "request window incomplete; no conflict check possible")
            }
            WindowWarning::NoVenueKey => {
                write!(f, "request names no venue; no booking compared")
            }
            WindowWarning::BookingDatesUnreadable { id, location } => {
                write!(f, "booking {id:?} at {location:?} has unreadable dates")
            }
            WindowWarning::BookingWindowIncomplete { id, location } => {
                write!(f, "booking {id:?} at {location:?} has an incomplete window")
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConflictResult {
    pub conflict: bool,
    pub collisions: Vec<Collision>,
    pub warnings: Vec<WindowWarning>,
}

impl ConflictResult {
    /// True when some comparison was skipped, so a clean result is not
    /// conclusive.
    pub fn is_partial(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// First and last calendar day of a request, if both are readable.
pub fn request_dates(request: &EventRequest) -> Option<(NaiveDate, NaiveDate)> {
    let first = window::parse_date(request.start_date.as_deref()?)?;
    let last = window::parse_date(request.last_date()?)?;
    Some((first, last))
}

fn dates_intersect(a: (NaiveDate, NaiveDate), b: (NaiveDate, NaiveDate)) -> bool {
    a.0 <= b.1 && a.1 >= b.0
}

/// Check a request against a snapshot of approved bookings.
///
/// Every booking in `approved` is assumed to be approved; filtering out
/// pending, rejected and cancelled bookings happens before this call.
pub fn has_conflict(request: &EventRequest, approved: &[ApprovedBooking]) -> ConflictResult {
    let mut result = ConflictResult::default();
    let requested = request.window();

    let Some(dates) = request_dates(request).filter(|_| requested.is_complete()) else {
        log::warn!(
            "request at {:?} has an incomplete window; reporting no conflict",
            request.location
        );
        result.warnings.push(WindowWarning::RequestWindowIncomplete);
        return result;
    };

    let key = VenueKey::of(request);
    if key.is_empty() {
        result.warnings.push(WindowWarning::NoVenueKey);
    }
    for booking in approved.iter().filter(|b| key.matches(b)) {
        let Some(booked_dates) = booking.dates() else {
            result.warnings.push(WindowWarning::BookingDatesUnreadable {
                id: booking.id,
                location: booking.location.clone(),
            });
            continue;
        };
        if !dates_intersect(dates, booked_dates) {
            continue;
        }

        let held = booking.window();
        match (requested.overlaps(&held), held.bounds()) {
            (Some(true), Some((start, end))) => {
                log::debug!(
                    "conflict with booking {:?} at {:?} ({start} to {end})",
                    booking.id,
                    booking.location
                );
                result.collisions.push(Collision {
                    id: booking.id,
                    venue_id: booking.venue_id.clone(),
                    location: booking.location.clone(),
                    start,
                    end,
                });
            }
            (Some(_), _) => {}
            (None, _) => result.warnings.push(WindowWarning::BookingWindowIncomplete {
                id: booking.id,
                location: booking.location.clone(),
            }),
        }
    }

    for warning in &result.warnings {
        log::warn!("{warning}");
    }
    result.conflict = !result.collisions.is_empty();
    result
}

/// Read-only access to approved bookings, injected into [`ConflictDetector`].
///
/// Implementations return every approved booking that might match `venue`
/// between `first` and `last` inclusive. Over-returning is harmless since the
/// detector re-applies both filters; under-returning hides conflicts.
pub trait BookingSource: Send + Sync {
    fn approved_bookings(
        &self,
        venue: &VenueKey,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<ApprovedBooking>>;
}

impl<T: BookingSource + ?Sized> BookingSource for &T {
    fn approved_bookings(
        &self,
        venue: &VenueKey,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<ApprovedBooking>> {
        (**self).approved_bookings(venue, first, last)
    }
}

/// Conflict detection over an injected booking source.
pub struct ConflictDetector<S> {
    source: S,
}

impl<S: BookingSource> ConflictDetector<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Query the source for candidates and check the request against them.
    /// Only source failures are errors.
    pub fn check(&self, request: &EventRequest) -> Result<ConflictResult> {
        let Some((first, last)) = request_dates(request) else {
            return Ok(has_conflict(request, &[]));
        };
        let candidates = self
            .source
            .approved_bookings(&VenueKey::of(request), first, last)?;
        Ok(has_conflict(request, &candidates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn park_booking() -> ApprovedBooking {
        ApprovedBooking {
            id: Some(1),
            ..ApprovedBooking::at("Cotton Tree Park", "2025-09-20", "10:00", "12:00")
        }
    }

    #[test]
    fn overlap_case_insensitive_name() {
        let request = EventRequest::at("cotton tree park ", "2025-09-20", "11:00", "13:00");
        let result = has_conflict(&request, &[park_booking()]);
        assert!(result.conflict);
        assert_eq!(result.collisions.len(), 1);
        assert_eq!(result.collisions[0].id, Some(1));
        assert_eq!(result.collisions[0].start.to_string(), "2025-09-20T10:00:00");
        assert!(!result.is_partial());
    }

    #[test]
    fn abutting_is_not_a_conflict() {
        let request = EventRequest::at("Cotton Tree Park", "2025-09-20", "12:00", "14:00");
        let result = has_conflict(&request, &[park_booking()]);
        assert!(!result.conflict);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn identifier_alone_matches() {
        let booking = ApprovedBooking {
            venue_id: Some("F123".into()),
            ..ApprovedBooking::at("Cotton Tree Pk (north)", "2025-09-20", "10:00", "12:00")
        };
        let request = EventRequest {
            venue_id: Some("F123".into()),
            ..EventRequest::at("Cotton Tree Park", "2025-09-20", "11:00", "13:00")
        };
        assert!(has_conflict(&request, &[booking]).conflict);
    }

    #[test]
    fn name_matches_despite_different_identifiers() {
        let booking = ApprovedBooking {
            venue_id: Some("F999".into()),
            ..park_booking()
        };
        let request = EventRequest {
            venue_id: Some("F123".into()),
            ..EventRequest::at("Cotton Tree Park", "2025-09-20", "11:00", "13:00")
        };
        assert!(has_conflict(&request, &[booking]).conflict);
    }

    #[test]
    fn empty_names_never_join() {
        let booking = ApprovedBooking::at("", "2025-09-20", "10:00", "12:00");
        let request = EventRequest::at("", "2025-09-20", "11:00", "13:00");
        let result = has_conflict(&request, &[booking]);
        assert!(!result.conflict);
        assert_eq!(result.warnings, vec![WindowWarning::NoVenueKey]);
        assert!(result.is_partial());
    }

    #[test]
    fn identifier_without_name_is_keyed() {
        let request = EventRequest {
            venue_id: Some("F123".into()),
            ..EventRequest::at("", "2025-09-20", "11:00", "13:00")
        };
        assert!(has_conflict(&request, &[]).warnings.is_empty());
    }

    #[test]
    fn other_venue_ignored() {
        let request = EventRequest::at("Kings Beach", "2025-09-20", "11:00", "13:00");
        assert!(!has_conflict(&request, &[park_booking()]).conflict);
    }

    #[test]
    fn other_day_ignored() {
        let request = EventRequest::at("Cotton Tree Park", "2025-09-21", "10:00", "12:00");
        assert!(!has_conflict(&request, &[park_booking()]).conflict);
    }

    #[test]
    fn multi_day_booking_blocks_middle_day() {
        let booking = ApprovedBooking {
            end_date: Some("2025-09-22".into()),
            ..ApprovedBooking::at("Cotton Tree Park", "2025-09-19", "08:00", "18:00")
        };
        let request = EventRequest::at("Cotton Tree Park", "2025-09-21", "09:00", "10:00");
        assert!(has_conflict(&request, &[booking]).conflict);
    }

    #[test]
    fn request_without_times_blocks_whole_day() {
        let request = EventRequest {
            location: "Cotton Tree Park".into(),
            start_date: Some("2025-09-20".into()),
            ..EventRequest::default()
        };
        assert!(has_conflict(&request, &[park_booking()]).conflict);
    }

    #[test]
    fn missing_request_date_warns() {
        let request = EventRequest {
            location: "Cotton Tree Park".into(),
            start_time: Some("11:00".into()),
            ..EventRequest::default()
        };
        let result = has_conflict(&request, &[park_booking()]);
        assert!(!result.conflict);
        assert_eq!(result.warnings, vec![WindowWarning::RequestWindowIncomplete]);
    }

    #[test]
    fn unreadable_request_time_warns() {
        let request = EventRequest::at("Cotton Tree Park", "2025-09-20", "eleven", "13:00");
        let result = has_conflict(&request, &[park_booking()]);
        assert!(!result.conflict);
        assert!(result.is_partial());
    }

    #[test]
    fn unreadable_booking_is_skipped_with_warning() {
        let broken = ApprovedBooking {
            id: Some(2),
            ..ApprovedBooking::at("Cotton Tree Park", "20/09/2025", "10:00", "12:00")
        };
        let request = EventRequest::at("Cotton Tree Park", "2025-09-20", "11:00", "13:00");
        let result = has_conflict(&request, &[broken]);
        assert!(!result.conflict);
        assert_eq!(
            result.warnings,
            vec![WindowWarning::BookingDatesUnreadable {
                id: Some(2),
                location: "Cotton Tree Park".into()
            }]
        );
    }

    #[test]
    fn incomplete_booking_window_warns() {
        let broken = ApprovedBooking {
            id: Some(3),
            ..ApprovedBooking::at("Cotton Tree Park", "2025-09-20", "ten", "12:00")
        };
        let request = EventRequest::at("Cotton Tree Park", "2025-09-20", "11:00", "13:00");
        let result = has_conflict(&request, &[broken]);
        assert!(!result.conflict);
        assert!(matches!(
            result.warnings.as_slice(),
            [WindowWarning::BookingWindowIncomplete { id: Some(3), .. }]
        ));
    }

    #[test]
    fn all_collisions_reported() {
        let later = ApprovedBooking {
            id: Some(2),
            ..ApprovedBooking::at("Cotton Tree Park", "2025-09-20", "12:30", "15:00")
        };
        let request = EventRequest::at("Cotton Tree Park", "2025-09-20", "11:00", "13:00");
        let result = has_conflict(&request, &[park_booking(), later]);
        let ids: Vec<_> = result.collisions.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![Some(1), Some(2)]);
    }

    #[test]
    fn repeated_checks_agree() {
        let request = EventRequest::at("Cotton Tree Park", "2025-09-20", "11:00", "13:00");
        let snapshot = [park_booking()];
        assert_eq!(has_conflict(&request, &snapshot), has_conflict(&request, &snapshot));
    }

    struct Unavailable;

    impl BookingSource for Unavailable {
        fn approved_bookings(
            &self,
            _venue: &VenueKey,
            _first: NaiveDate,
            _last: NaiveDate,
        ) -> Result<Vec<ApprovedBooking>> {
            Err(Error::Source("database offline".into()))
        }
    }

    #[test]
    fn source_failure_propagates() {
        let detector = ConflictDetector::new(Unavailable);
        let request = EventRequest::at("Cotton Tree Park", "2025-09-20", "11:00", "13:00");
        assert!(matches!(detector.check(&request), Err(Error::Source(_))));
    }

    #[test]
    fn undated_request_skips_source() {
        let detector = ConflictDetector::new(Unavailable);
        let request = EventRequest {
            location: "Cotton Tree Park".into(),
            ..EventRequest::default()
        };
        let result = detector.check(&request).unwrap();
        assert!(!result.conflict);
        assert!(result.is_partial());
    }
}
