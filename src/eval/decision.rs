use serde::Serialize;

/// Risk tier. Ordered so that escalation is `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Classification {
    /// Eligible for automatic approval.
    #[serde(rename = "Self-assessable")]
    SelfAssessable,
    /// Needs staff review.
    #[serde(rename = "Assessable")]
    Assessable,
}

impl Classification {
    pub fn as_str(self) -> &'static str {
        match self {
            Classification::SelfAssessable => "Self-assessable",
            Classification::Assessable => "Assessable",
        }
    }
}

/// Final automated outcome of a submitted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Disposition {
    Approved,
    #[serde(rename = "Pending")]
    PendingReview,
}

impl Disposition {
    pub fn as_str(self) -> &'static str {
        match self {
            Disposition::Approved => "approved",
            Disposition::PendingReview => "pending",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Disposition::Approved => "APPROVED",
            Disposition::PendingReview => "PENDING",
        }
    }
}

/// The approval gate: approved only when self-assessable and clash-free.
pub fn decide(classification: Classification, conflict: bool) -> Disposition {
    if classification == Classification::SelfAssessable && !conflict {
        Disposition::Approved
    } else {
        Disposition::PendingReview
    }
}
