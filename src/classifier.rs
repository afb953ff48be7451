//! Locational vs informational query classification
//!
//! Two-tier phrase matching: strong locational phrases win immediately,
//! informational phrases force a text answer, and anything ambiguous
//! defaults to informational. False positives here would route live facts
//! into a map card, so the default stays conservative.

/// Phrases that mark a query as asking "where"
const LOCATION_PHRASES: &[&str] = &[
    "where is",
    "where are",
    "where can i find",
    "location of",
    "directions to",
    "how do i get to",
    "how to reach",
    "find the",
    "show me the",
    "map of",
];

/// Phrases that mark a query as asking "what"
const INFORMATIONAL_PHRASES: &[&str] = &[
    "what is",
    "what are",
    "how does",
    "how do i apply",
    "tell me about",
    "explain",
    "what programs",
    "what services",
    "who is",
    "when is",
    "when are",
];

/// Decide whether the query asks for a place.
///
/// Case-insensitive substring matching; locational phrases are checked
/// first, so "how do i get to" beats the informational "how do" family.
pub fn is_location_query(query: &str) -> bool {
    let query_lower = query.to_lowercase();

    if LOCATION_PHRASES.iter().any(|p| query_lower.contains(p)) {
        return true;
    }
    if INFORMATIONAL_PHRASES.iter().any(|p| query_lower.contains(p)) {
        return false;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_phrases() {
        assert!(is_location_query("Where is the library?"));
        assert!(is_location_query("where can I find the post office"));
        assert!(is_location_query("Directions to the sports hall please"));
        assert!(is_location_query("How do I get to the dormitories?"));
        assert!(is_location_query("show me the Grand Library"));
        assert!(is_location_query("map of campus"));
    }

    #[test]
    fn test_informational_phrases() {
        assert!(!is_location_query("What are the admission requirements?"));
        assert!(!is_location_query("Tell me about the engineering faculty"));
        assert!(!is_location_query("How does course registration work?"));
        assert!(!is_location_query("How do I apply for a scholarship?"));
        assert!(!is_location_query("Explain the grading system"));
    }

    #[test]
    fn test_location_list_wins_over_informational() {
        // "how do i get to" shares a prefix with "how do i apply"-style
        // phrases; the locational list is checked first
        assert!(is_location_query("How do I get to the admissions office?"));
    }

    #[test]
    fn test_ambiguous_defaults_to_informational() {
        // Known boundary: locational-adjacent phrasing without a strong
        // phrase stays informational
        assert!(!is_location_query("library hours"));
        assert!(!is_location_query("cafeteria"));
        assert!(!is_location_query(""));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(is_location_query("WHERE IS the bank?"));
        assert!(!is_location_query("WHAT IS the bank?"));
    }
}
