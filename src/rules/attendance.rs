use crate::request::EventRequest;
use crate::rules::{Contribution, Rule};

/// Fewer than `limit` attendees at any one time.
pub struct AttendanceRule {
    limit: i64,
    text: String,
}

impl AttendanceRule {
    pub fn new(limit: i64) -> Self {
        Self {
            limit,
            text: format!("Expects <{limit} attendees at any one time"),
        }
    }
}

impl Rule for AttendanceRule {
    fn id(&self) -> &'static str {
        "attendance"
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn check(&self, request: &EventRequest) -> bool {
        request.attendance < self.limit
    }

    fn contribution(&self) -> Contribution {
        Contribution::Escalates
    }
}
