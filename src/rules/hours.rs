use chrono::NaiveTime;

use crate::request::EventRequest;
use crate::rules::{Contribution, Rule};
use crate::window::parse_clock;

/// Render a clock bound the way the checklist reads it, e.g. "5:30 am".
fn spoken(time: NaiveTime) -> String {
    time.format("%-I:%M %P").to_string()
}

/// The start time must be given and not before the earliest start. Amplified
/// sound moves the earliest start later.
pub struct StartRule {
    earliest: NaiveTime,
    earliest_amplified: NaiveTime,
    text: String,
}

impl StartRule {
    pub fn new(earliest: NaiveTime, earliest_amplified: NaiveTime) -> Self {
        Self {
            earliest,
            earliest_amplified,
            text: format!(
                "Does not start before {} (or {} if amplified)",
                spoken(earliest),
                spoken(earliest_amplified)
            ),
        }
    }
}

impl Rule for StartRule {
    fn id(&self) -> &'static str {
        "start_time"
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn check(&self, request: &EventRequest) -> bool {
        let bound = if request.amplified_sound {
            self.earliest_amplified
        } else {
            self.earliest
        };
        request
            .start_time
            .as_deref()
            .and_then(parse_clock)
            .is_some_and(|start| start >= bound)
    }

    fn contribution(&self) -> Contribution {
        Contribution::Informational
    }
}

/// The finish time, when given, must not be after the latest finish.
/// An unreadable finish time fails.
pub struct FinishRule {
    latest: NaiveTime,
    text: String,
}

impl FinishRule {
    pub fn new(latest: NaiveTime) -> Self {
        Self {
            latest,
            text: format!("Does not finish after {}", spoken(latest)),
        }
    }
}

impl Rule for FinishRule {
    fn id(&self) -> &'static str {
        "finish_time"
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn check(&self, request: &EventRequest) -> bool {
        match request.end_time.as_deref() {
            None => true,
            Some(end) => parse_clock(end).is_some_and(|end| end <= self.latest),
        }
    }

    fn contribution(&self) -> Contribution {
        Contribution::Informational
    }
}
