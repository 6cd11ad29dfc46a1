pub mod decision;
pub mod report;

pub use decision::{Classification, Disposition, decide};
pub use report::{ChecklistItem, EligibilityReport};

use serde::Serialize;

use crate::config::Config;
use crate::conflict::{self, ApprovedBooking, BookingSource, ConflictDetector, ConflictResult};
use crate::error::{Error, Result};
use crate::request::EventRequest;
use crate::rules::{
    Rule, attendance::AttendanceRule, duration::DurationRule, flags, hours::FinishRule,
    hours::StartRule, noise::NoiseRule,
};
use crate::venue;
use crate::window::parse_clock;

/// Calendar hold to place downstream once a request is approved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reservation {
    pub title: String,
    pub day: String,
    /// Length shown on the calendar entry; at least one day.
    pub days: i64,
    pub start_time: Option<String>,
    pub finish_time: Option<String>,
}

impl Reservation {
    /// `None` when the request has no start date to reserve.
    fn for_request(request: &EventRequest) -> Option<Self> {
        let day = request.start_date.clone()?;
        let title = request
            .event_name
            .clone()
            .unwrap_or_else(|| request.location.clone());
        Some(Self {
            title,
            day,
            days: request.display_days(),
            start_time: request.start_time.clone(),
            finish_time: request.end_time.clone(),
        })
    }
}

/// Everything the core decided about one request.
#[derive(Debug, Clone, Serialize)]
pub struct Verdict {
    pub disposition: Disposition,
    pub classification: Classification,
    /// Ids of the rules that made the request assessable.
    pub triggers: Vec<&'static str>,
    pub eligibility: EligibilityReport,
    /// Self-assessable by the classifier yet failing the checklist. The two
    /// are allowed to disagree; this flags it for staff.
    pub checklist_disagrees: bool,
    pub conflict: ConflictResult,
    pub public_venue: bool,
    /// Present only for approved requests with a date.
    pub reservation: Option<Reservation>,
}

impl Verdict {
    /// One-line summary for logs.
    pub fn reason(&self) -> String {
        let mut parts = vec![self.classification.as_str().to_string()];
        if !self.triggers.is_empty() {
            parts.push(format!("triggered by {}", self.triggers.join(", ")));
        }
        parts.push(if self.conflict.conflict {
            format!("{} conflicting booking(s)", self.conflict.collisions.len())
        } else {
            "no conflict".to_string()
        });
        if self.conflict.is_partial() {
            parts.push(format!("{} window warning(s)", self.conflict.warnings.len()));
        }
        if self.checklist_disagrees {
            parts.push("checklist disagrees".to_string());
        }
        parts.join("; ")
    }
}

/// The shared rule table, built once from configuration.
pub struct RuleBook {
    rules: Vec<Box<dyn Rule>>,
    public_keywords: Vec<String>,
}

fn clock(field: &'static str, value: &str) -> Result<chrono::NaiveTime> {
    parse_clock(value).ok_or_else(|| Error::InvalidClock {
        field,
        value: value.to_string(),
    })
}

impl RuleBook {
    /// Build the rule table from configuration, in checklist order.
    pub fn from_config(config: &Config) -> Result<Self> {
        let t = &config.thresholds;
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(AttendanceRule::new(t.attendance_limit)),
            Box::new(flags::INFRASTRUCTURE),
            Box::new(flags::TRAFFIC),
            Box::new(DurationRule::new(t.max_consecutive_days)),
            Box::new(flags::HIGH_RISK),
            Box::new(StartRule::new(
                clock("earliest_start", &t.earliest_start)?,
                clock("earliest_amplified_start", &t.earliest_amplified_start)?,
            )),
            Box::new(FinishRule::new(clock("latest_finish", &t.latest_finish)?)),
            Box::new(flags::ALCOHOL),
            Box::new(NoiseRule::new(t.noise_limit_db)),
            Box::new(flags::VEHICLE_ACCESS),
            Box::new(flags::VERGE),
        ];
        Ok(Self {
            rules,
            public_keywords: config.venues.public_keywords.clone(),
        })
    }

    /// Rule table from the embedded defaults.
    pub fn standard() -> Self {
        Self::from_config(&Config::default_config())
            .expect("embedded default thresholds must be valid")
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    /// Ids of the rules that escalate this request.
    pub fn triggers(&self, request: &EventRequest) -> Vec<&'static str> {
        self.rules
            .iter()
            .filter(|rule| rule.escalates(request))
            .map(|rule| rule.id())
            .collect()
    }

    /// Risk tier. Starts self-assessable; any escalating rule makes it
    /// assessable and nothing brings it back.
    pub fn classify(&self, request: &EventRequest) -> Classification {
        let mut worst = Classification::SelfAssessable;
        for rule in &self.rules {
            if rule.escalates(request) {
                log::debug!("classification escalated by {}", rule.id());
                worst = worst.max(Classification::Assessable);
            }
        }
        worst
    }

    /// Itemized checklist over every rule, in table order.
    pub fn check_eligibility(&self, request: &EventRequest) -> EligibilityReport {
        EligibilityReport::new(
            self.rules
                .iter()
                .map(|rule| ChecklistItem {
                    id: rule.id(),
                    text: rule.text().to_string(),
                    passed: rule.check(request),
                })
                .collect(),
        )
    }

    /// Full assessment against a snapshot of approved bookings.
    pub fn assess(&self, request: &EventRequest, approved: &[ApprovedBooking]) -> Verdict {
        self.verdict(request, conflict::has_conflict(request, approved))
    }

    /// Full assessment against an injected booking source.
    pub fn assess_with<S: BookingSource>(
        &self,
        request: &EventRequest,
        detector: &ConflictDetector<S>,
    ) -> Result<Verdict> {
        Ok(self.verdict(request, detector.check(request)?))
    }

    fn verdict(&self, request: &EventRequest, conflict: ConflictResult) -> Verdict {
        let classification = self.classify(request);
        let eligibility = self.check_eligibility(request);
        let disposition = decide(classification, conflict.conflict);
        let checklist_disagrees =
            classification == Classification::SelfAssessable && !eligibility.eligible;
        if checklist_disagrees {
            let failed: Vec<_> = eligibility.failures().map(|item| item.id).collect();
            log::warn!(
                "self-assessable request fails checklist items: {}",
                failed.join(", ")
            );
        }
        let reservation = match disposition {
            Disposition::Approved => Reservation::for_request(request),
            Disposition::PendingReview => None,
        };
        Verdict {
            disposition,
            classification,
            triggers: self.triggers(request),
            eligibility,
            checklist_disagrees,
            public_venue: venue::looks_public(&request.location, &self.public_keywords),
            conflict,
            reservation,
        }
    }
}
