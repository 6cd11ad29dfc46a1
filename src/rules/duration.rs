use crate::request::EventRequest;
use crate::rules::{Contribution, Rule};

/// Event length.
///
/// The checklist accepts either duration tag, or a supplied, non-zero
/// `total_days` up to `max_days`. The classifier only looks at `total_days`
/// and counts a missing value as 0, so a request with neither passes the
/// classifier but fails the checklist. The two triggers differ on purpose and
/// must not be merged.
pub struct DurationRule {
    max_days: i64,
    text: String,
}

impl DurationRule {
    pub fn new(max_days: i64) -> Self {
        Self {
            max_days,
            text: format!(
                "Runs ≤{max_days} consecutive days OR ≤12 non-consecutive days in 12 months"
            ),
        }
    }
}

impl Rule for DurationRule {
    fn id(&self) -> &'static str {
        "duration"
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn check(&self, request: &EventRequest) -> bool {
        request.duration.is_some()
            || matches!(request.total_days, Some(days) if days != 0 && days <= self.max_days)
    }

    fn contribution(&self) -> Contribution {
        Contribution::Escalates
    }

    fn escalates(&self, request: &EventRequest) -> bool {
        request.classified_days() > self.max_days
    }
}
