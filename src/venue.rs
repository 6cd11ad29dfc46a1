//! Venue-name heuristics.

/// Whether a free-text venue name looks like a civic or open space (a park,
/// beach, hall and so on). Case-insensitive substring match on `keywords`.
///
/// Informational only: GIS feature ids are the real authority on venues.
pub fn looks_public(location: &str, keywords: &[String]) -> bool {
    let location = location.trim().to_lowercase();
    !location.is_empty()
        && keywords
            .iter()
            .any(|keyword| location.contains(&keyword.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords() -> Vec<String> {
        ["park", "beach", "community centre"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn matches_keywords_case_insensitively() {
        assert!(looks_public("Cotton Tree PARK", &keywords()));
        assert!(looks_public("Maroochydore Community Centre", &keywords()));
    }

    #[test]
    fn private_and_empty_venues() {
        assert!(!looks_public("12 Smith St backyard", &keywords()));
        assert!(!looks_public("   ", &keywords()));
        assert!(!looks_public("Cotton Tree Park", &[]));
    }
}
