//! The event-permit application as submitted by an applicant.

pub mod lenient;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::window::{self, PointInTime, Window};

/// Finish time assumed for a request that names no end time.
pub const DEFAULT_END_TIME: &str = "23:59";

/// Alternative to `total_days` for events that run in blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DurationTag {
    /// Runs on at most two consecutive days.
    #[serde(rename = "<=2 days")]
    Consecutive,
    /// Runs on at most twelve non-consecutive days in twelve months.
    #[serde(rename = "<=12 days")]
    NonConsecutive,
}

impl DurationTag {
    pub fn as_str(self) -> &'static str {
        match self {
            DurationTag::Consecutive => "<=2 days",
            DurationTag::NonConsecutive => "<=12 days",
        }
    }
}

impl FromStr for DurationTag {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "<=2 days" | "≤2 days" | "≤2 consecutive days" | "<=2 consecutive days" => {
                Ok(DurationTag::Consecutive)
            }
            "<=12 days" | "≤12 days" | "≤12 non-consecutive days" | "<=12 non-consecutive days" => {
                Ok(DurationTag::NonConsecutive)
            }
            _ => Err(()),
        }
    }
}

impl fmt::Display for DurationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A yes/no risk attribute on the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Alcohol,
    HighRisk,
    TrafficManagement,
    VehicleAccess,
    AmplifiedSound,
    GroundPiercing,
    BuildingApproval,
    VergeTraversal,
}

impl Flag {
    pub fn is_set(self, request: &EventRequest) -> bool {
        match self {
            Flag::Alcohol => request.alcohol,
            Flag::HighRisk => request.high_risk,
            Flag::TrafficManagement => request.traffic_management,
            Flag::VehicleAccess => request.vehicle_access,
            Flag::AmplifiedSound => request.amplified_sound,
            Flag::GroundPiercing => request.ground_piercing,
            Flag::BuildingApproval => request.building_approval,
            Flag::VergeTraversal => request.verge_traversal,
        }
    }
}

/// An application as received from the intake surface.
///
/// Every field is optional on the wire and decoded permissively (see
/// [`lenient`]), so construction never fails on business data. Older form
/// names are read alongside the current ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "IntakeForm")]
pub struct EventRequest {
    pub event_name: Option<String>,
    /// Stable venue key (GIS feature id). Preferred over `location`.
    pub venue_id: Option<String>,
    /// Free-text venue name.
    pub location: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub attendance: i64,
    pub alcohol: bool,
    pub high_risk: bool,
    pub traffic_management: bool,
    pub vehicle_access: bool,
    pub amplified_sound: bool,
    pub noise_level: i64,
    /// As supplied; `None` when missing or unreadable. Displayed as at least
    /// one day (see [`EventRequest::display_days`]).
    pub total_days: Option<i64>,
    pub ground_piercing: bool,
    pub building_approval: bool,
    pub verge_traversal: bool,
    pub duration: Option<DurationTag>,
}

/// Wire shape of an application. Current and older field names are separate
/// keys here, since a form may send both; the current name wins when it is
/// non-empty.
#[derive(Deserialize, Default)]
#[serde(default)]
struct IntakeForm {
    #[serde(deserialize_with = "lenient::text")]
    event_name: Option<String>,
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
    #[serde(deserialize_with = "lenient::number")]
    attendance: i64,
    #[serde(deserialize_with = "lenient::flag")]
    alcohol: bool,
    #[serde(deserialize_with = "lenient::flag")]
    high_risk: bool,
    #[serde(deserialize_with = "lenient::flag")]
    traffic_management: bool,
    #[serde(deserialize_with = "lenient::flag")]
    traffic_mgmt: bool,
    #[serde(deserialize_with = "lenient::flag")]
    vehicle_access: bool,
    #[serde(deserialize_with = "lenient::flag")]
    amplified_sound: bool,
    #[serde(deserialize_with = "lenient::number")]
    noise_level: i64,
    #[serde(deserialize_with = "lenient::optional_number")]
    total_days: Option<i64>,
    #[serde(deserialize_with = "lenient::flag")]
    ground_piercing: bool,
    #[serde(deserialize_with = "lenient::flag")]
    building_approval: bool,
    #[serde(deserialize_with = "lenient::flag")]
    verge_traversal: bool,
    #[serde(deserialize_with = "lenient::flag")]
    verge_traverse: bool,
    #[serde(deserialize_with = "lenient::duration_tag")]
    duration: Option<DurationTag>,
}

impl From<IntakeForm> for EventRequest {
    fn from(form: IntakeForm) -> Self {
        Self {
            event_name: form.event_name,
            venue_id: form.venue_id.or(form.arcgis_feature_id),
            location: form.location.or(form.venue).unwrap_or_default(),
            start_date: form.start_date,
            end_date: form.end_date,
            start_time: form.start_time,
            end_time: form.end_time.or(form.finish_time),
            attendance: form.attendance,
            alcohol: form.alcohol,
            high_risk: form.high_risk,
            // A "yes" under either name is a yes.
            traffic_management: form.traffic_management || form.traffic_mgmt,
            vehicle_access: form.vehicle_access,
            amplified_sound: form.amplified_sound,
            noise_level: form.noise_level,
            total_days: form.total_days,
            ground_piercing: form.ground_piercing,
            building_approval: form.building_approval,
            verge_traversal: form.verge_traversal || form.verge_traverse,
            duration: form.duration,
        }
    }
}

impl EventRequest {
    /// A single-day request at a named venue.
    pub fn at(location: &str, date: &str, start_time: &str, end_time: &str) -> Self {
        Self {
            location: location.to_string(),
            start_date: Some(date.to_string()),
            start_time: Some(start_time.to_string()),
            end_time: Some(end_time.to_string()),
            ..Self::default()
        }
    }

    /// Last day of the event; the start date when no end date was given.
    pub fn last_date(&self) -> Option<&str> {
        self.end_date.as_deref().or(self.start_date.as_deref())
    }

    /// Event length for display. Never less than one day.
    pub fn display_days(&self) -> i64 {
        self.total_days.unwrap_or(1).max(1)
    }

    /// Event length as compared by the classifier: a missing value counts as 0.
    pub fn classified_days(&self) -> i64 {
        self.total_days.unwrap_or(0)
    }

    pub fn starts_at(&self) -> Option<PointInTime> {
        window::normalize(
            self.start_date.as_deref(),
            Some(self.start_time.as_deref().unwrap_or(window::MIDNIGHT)),
        )
    }

    pub fn ends_at(&self) -> Option<PointInTime> {
        window::normalize(
            self.last_date(),
            Some(self.end_time.as_deref().unwrap_or(DEFAULT_END_TIME)),
        )
    }

    /// The requested booking window with intake defaults applied.
    pub fn window(&self) -> Window {
        Window::new(self.starts_at(), self.ends_at())
    }
}
