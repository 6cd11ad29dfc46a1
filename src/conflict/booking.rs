use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::request::{DEFAULT_END_TIME, lenient};
use crate::window::{self, Window};

/// A booking that already holds a venue. Only approved bookings may be
/// handed to the conflict detector; see [`StoredBooking`] for the filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "BookingRecord")]
pub struct ApprovedBooking {
    pub id: Option<i64>,
    pub venue_id: Option<String>,
    pub location: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// Wire shape of a booking row. Older column names sit beside the current
/// ones; the current name wins when non-empty.
#[derive(Deserialize, Default)]
#[serde(default)]
struct BookingRecord {
    #[serde(deserialize_with = "lenient::optional_number")]
    id: Option<i64>,
    #[serde(deserialize_with = "lenient::text")]
    venue_id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    arcgis_feature_id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    location: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    venue: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    start_date: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    end_date: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    start_time: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    end_time: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    finish_time: Option<String>,
}

impl From<BookingRecord> for ApprovedBooking {
    fn from(row: BookingRecord) -> Self {
        Self {
            id: row.id,
            venue_id: row.venue_id.or(row.arcgis_feature_id),
            location: row.location.or(row.venue).unwrap_or_default(),
            start_date: row.start_date,
            end_date: row.end_date,
            start_time: row.start_time,
            end_time: row.end_time.or(row.finish_time),
        }
    }
}

impl ApprovedBooking {
    /// A single-day booking at a named venue.
    pub fn at(location: &str, date: &str, start_time: &str, end_time: &str) -> Self {
        Self {
            location: location.to_string(),
            start_date: Some(date.to_string()),
            start_time: Some(start_time.to_string()),
            end_time: Some(end_time.to_string()),
            ..Self::default()
        }
    }

    pub fn last_date(&self) -> Option<&str> {
        self.end_date.as_deref().or(self.start_date.as_deref())
    }

    /// First and last calendar day, if both are readable.
    pub fn dates(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = window::parse_date(self.start_date.as_deref()?)?;
        let last = window::parse_date(self.last_date()?)?;
        Some((first, last))
    }

    /// The held window. Missing times get the same defaults as a request.
    pub fn window(&self) -> Window {
        Window::new(
            window::normalize(
                self.start_date.as_deref(),
                Some(self.start_time.as_deref().unwrap_or(window::MIDNIGHT)),
            ),
            window::normalize(
                self.last_date(),
                Some(self.end_time.as_deref().unwrap_or(DEFAULT_END_TIME)),
            ),
        )
    }
}

/// Workflow state of a stored booking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum BookingStatus {
    #[default]
    Approved,
    Pending,
    Rejected,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Approved => "Approved",
            BookingStatus::Pending => "Pending",
            BookingStatus::Rejected => "Rejected",
            BookingStatus::Cancelled => "Cancelled",
        }
    }

    /// Only approved bookings hold a venue.
    pub fn blocks_venue(self) -> bool {
        self == BookingStatus::Approved
    }
}

/// A booking as kept by the persistence layer, with its workflow status.
/// A record without a status is taken to be approved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoredBooking {
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(flatten)]
    pub booking: ApprovedBooking,
}

impl StoredBooking {
    pub fn new(booking: ApprovedBooking, status: BookingStatus) -> Self {
        Self { status, booking }
    }
}
