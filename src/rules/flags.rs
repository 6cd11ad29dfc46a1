//! Data-driven rules over yes/no attributes.

use crate::request::{EventRequest, Flag};
use crate::rules::{Contribution, Rule};

/// Passes when none of its flags are set on the request.
pub struct FlagRule {
    id: &'static str,
    text: &'static str,
    flags: &'static [Flag],
    contribution: Contribution,
}

impl Rule for FlagRule {
    fn id(&self) -> &'static str {
        self.id
    }

    fn text(&self) -> &str {
        self.text
    }

    fn check(&self, request: &EventRequest) -> bool {
        !self.flags.iter().any(|flag| flag.is_set(request))
    }

    fn contribution(&self) -> Contribution {
        self.contribution
    }
}

pub const INFRASTRUCTURE: FlagRule = FlagRule {
    id: "infrastructure",
    text: "No infrastructure needing building approval and no ground piercing devices",
    flags: &[Flag::BuildingApproval, Flag::GroundPiercing],
    contribution: Contribution::Informational,
};

pub const TRAFFIC: FlagRule = FlagRule {
    id: "traffic",
    text: "No traffic management or road/carpark closures",
    flags: &[Flag::TrafficManagement],
    contribution: Contribution::Escalates,
};

pub const HIGH_RISK: FlagRule = FlagRule {
    id: "high_risk",
    text: "No firearms, fireworks, or other high-risk activities",
    flags: &[Flag::HighRisk],
    contribution: Contribution::Escalates,
};

pub const ALCOHOL: FlagRule = FlagRule {
    id: "alcohol",
    text: "No service or consumption of alcohol",
    flags: &[Flag::Alcohol],
    contribution: Contribution::Escalates,
};

pub const VEHICLE_ACCESS: FlagRule = FlagRule {
    id: "vehicle_access",
    text: "No vehicle/machinery access to public place",
    flags: &[Flag::VehicleAccess],
    contribution: Contribution::Escalates,
};

pub const VERGE: FlagRule = FlagRule {
    id: "verge",
    text: "No traversing over verge/kerb/pathway with vehicles",
    flags: &[Flag::VergeTraversal],
    contribution: Contribution::Informational,
};
