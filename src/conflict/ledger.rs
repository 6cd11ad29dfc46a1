use chrono::NaiveDate;

use crate::conflict::{ApprovedBooking, BookingSource, BookingStatus, StoredBooking, VenueKey};
use crate::error::Result;

/// In-memory booking records with their workflow status.
///
/// Serves as the [`BookingSource`] for the CLI and for callers that already
/// hold a snapshot. Only approved records are ever handed out.
#[derive(Debug, Clone, Default)]
pub struct BookingLedger {
    records: Vec<StoredBooking>,
}

impl BookingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, booking: ApprovedBooking, status: BookingStatus) {
        self.records.push(StoredBooking::new(booking, status));
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Snapshot of the bookings that hold a venue.
    pub fn approved(&self) -> Vec<ApprovedBooking> {
        self.records
            .iter()
            .filter(|r| r.status.blocks_venue())
            .map(|r| r.booking.clone())
            .collect()
    }
}

impl From<Vec<StoredBooking>> for BookingLedger {
    fn from(records: Vec<StoredBooking>) -> Self {
        Self { records }
    }
}

impl FromIterator<StoredBooking> for BookingLedger {
    fn from_iter<I: IntoIterator<Item = StoredBooking>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl BookingSource for BookingLedger {
    fn approved_bookings(
        &self,
        venue: &VenueKey,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<ApprovedBooking>> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.status.blocks_venue() && venue.matches(&r.booking))
            // Unreadable dates are passed through so the detector can warn.
            .filter(|r| {
                r.booking
                    .dates()
                    .is_none_or(|(start, end)| start <= last && end >= first)
            })
            .map(|r| r.booking.clone())
            .collect())
    }
}
