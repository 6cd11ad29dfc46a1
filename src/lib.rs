//! permit-gate: the decision core behind event-permit intake.
//!
//! An application names a venue, a time window and a set of risk attributes.
//! Before it can be approved automatically two things must hold: its risk
//! classification is [`eval::Classification::SelfAssessable`], and its window
//! does not clash with an approved booking at the same venue. The result is
//! an [`eval::Disposition`]: `Approved` or `PendingReview`.
//!
//! # Architecture
//!
//! - **[`window`]**: Normalizes (date, time) pairs into comparable instants.
//! - **[`request`]**: The application, decoded permissively from form or JSON input.
//! - **[`rules`]**: One rule table feeding both the classifier and the checklist.
//! - **[`eval`]**: Rule book, classification, checklist, approval gate and verdict.
//! - **[`conflict`]**: Venue/time conflict detection over approved bookings.
//! - **[`config`]**: Thresholds: embedded defaults + user overlay merge.
//! - **[`logging`]**: Diagnostic log and decision records under `~/.local/share/permit-gate/`.
//!
//! Every evaluator is pure and synchronous. Persistence, notification and
//! the atomicity of "check then book" belong to the caller.

/// Conflict detection, booking records and the injected booking source.
pub mod conflict;
/// Threshold configuration, loading, and overlay merge logic.
pub mod config;
/// Error type for configuration, input and booking sources.
pub mod error;
/// Rule book, classification, checklist and the approval gate.
pub mod eval;
/// File-based logging.
pub mod logging;
/// The submitted application and its lenient decoding.
pub mod request;
/// Attribute rules shared by the classifier and the checklist.
pub mod rules;
/// Venue-name heuristics.
pub mod venue;
/// Date/time normalization and half-open windows.
pub mod window;

use conflict::ApprovedBooking;
use eval::{RuleBook, Verdict};
use request::EventRequest;

/// Assess a request against approved bookings using the default thresholds.
///
/// This is the main entry point for tests and simple usage. To apply a user
/// config or an injected booking source, build a [`RuleBook`] directly.
pub fn evaluate(request: &EventRequest, approved: &[ApprovedBooking]) -> Verdict {
    RuleBook::standard().assess(request, approved)
}
