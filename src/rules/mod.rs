//! Attribute rules: one table drives both the classifier and the checklist.
//!
//! Every rule has a checklist line (its display text and a pass/fail check)
//! and a [`Contribution`] saying whether a failure also makes the request
//! assessable. Most rules escalate exactly when their check fails; the
//! duration rule keeps its own classifier trigger (see [`duration`]).

/// Attendance ceiling.
pub mod attendance;
/// Length of the event in days or as a duration tag.
pub mod duration;
/// Data-driven "must not be set" rules over yes/no attributes.
pub mod flags;
/// Earliest start and latest finish clock bounds.
pub mod hours;
/// Amplified sound level ceiling.
pub mod noise;

use crate::request::EventRequest;

/// How a rule feeds the risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contribution {
    /// Failing the rule makes the request assessable.
    Escalates,
    /// Shown on the checklist only.
    Informational,
}

/// A single eligibility rule.
pub trait Rule: Send + Sync {
    /// Stable identifier, used in reports and logs.
    fn id(&self) -> &'static str;

    /// Checklist text shown to the applicant.
    fn text(&self) -> &str;

    /// Whether the request satisfies this rule.
    fn check(&self, request: &EventRequest) -> bool;

    fn contribution(&self) -> Contribution;

    /// Whether this rule moves the request to assessable.
    fn escalates(&self, request: &EventRequest) -> bool {
        self.contribution() == Contribution::Escalates && !self.check(request)
    }
}
