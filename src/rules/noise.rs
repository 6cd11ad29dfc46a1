use crate::request::EventRequest;
use crate::rules::{Contribution, Rule};

/// Amplified sound must stay at or below `limit_db`. Unamplified events pass
/// whatever noise level they report.
pub struct NoiseRule {
    limit_db: i64,
    text: String,
}

impl NoiseRule {
    pub fn new(limit_db: i64) -> Self {
        Self {
            limit_db,
            text: format!("No amplified noise >{limit_db} dBC @ 15 m"),
        }
    }
}

impl Rule for NoiseRule {
    fn id(&self) -> &'static str {
        "noise"
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn check(&self, request: &EventRequest) -> bool {
        !request.amplified_sound || request.noise_level <= self.limit_db
    }

    fn contribution(&self) -> Contribution {
        Contribution::Escalates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sound(amplified_sound: bool, noise_level: i64) -> EventRequest {
        EventRequest {
            amplified_sound,
            noise_level,
            ..EventRequest::default()
        }
    }

    #[test]
    fn amplified_boundary() {
        let rule = NoiseRule::new(95);
        assert!(rule.check(&sound(true, 95)));
        assert!(!rule.check(&sound(true, 96)));
        assert!(rule.escalates(&sound(true, 96)));
    }

    #[test]
    fn unamplified_noise_ignored() {
        let rule = NoiseRule::new(95);
        assert!(rule.check(&sound(false, 120)));
        assert!(!rule.escalates(&sound(false, 120)));
    }
}
