use crate::models::{MatchFilters, Person};

/// Check if a candidate survives the seeker's hard filters
///
/// Candidates failing any of these are dropped from the ranking entirely,
/// they are not merely scored low.
#[inline]
pub fn passes_filters(candidate: &Person, filters: &MatchFilters) -> bool {
    if candidate.role != filters.role_needed {
        return false;
    }

    if filters.only_verified && !candidate.verified {
        return false;
    }

    if !candidate.teaches(&filters.subject_id) {
        return false;
    }

    match filters.normalized_query() {
        Some(query) => matches_query(candidate, &query),
        None => true,
    }
}

/// Case-insensitive substring search over name, about, school and city
///
/// `query` must already be trimmed and lower-cased.
#[inline]
pub fn matches_query(candidate: &Person, query: &str) -> bool {
    candidate.search_haystack().contains(query)
}

/// Timeslot ids the candidate offers that the seeker asked for
pub fn shared_timeslots(candidate: &Person, filters: &MatchFilters) -> Vec<String> {
    candidate
        .available
        .iter()
        .filter(|slot| filters.time_ids.contains(slot))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, SessionDuration, SessionFormat};

    fn create_test_person(role: Role, verified: bool) -> Person {
        Person {
            id: "p1".to_string(),
            name: "Egor, grade 10".to_string(),
            city: "Vladivostok".to_string(),
            school: "School No. 12".to_string(),
            about: "Step by step algebra".to_string(),
            role,
            grade: 10,
            subjects: vec!["math".to_string(), "inf".to_string()],
            available: vec!["mon-19".to_string(), "wed-17".to_string()],
            rating: 4.8,
            reviews_count: 23,
            points: 1240,
            verified,
        }
    }

    fn create_test_filters() -> MatchFilters {
        MatchFilters {
            role_needed: Role::Mentor,
            seeker_grade: 8,
            subject_id: "math".to_string(),
            format: SessionFormat::Video,
            duration_min: SessionDuration::Twenty,
            time_ids: vec!["wed-17".to_string()],
            only_verified: true,
            query: String::new(),
        }
    }

    #[test]
    fn test_filters_pass() {
        let person = create_test_person(Role::Mentor, true);
        assert!(passes_filters(&person, &create_test_filters()));
    }

    #[test]
    fn test_filters_fail_role() {
        let person = create_test_person(Role::Student, true);
        assert!(!passes_filters(&person, &create_test_filters()));
    }

    #[test]
    fn test_filters_fail_unverified() {
        let person = create_test_person(Role::Mentor, false);
        assert!(!passes_filters(&person, &create_test_filters()));

        let mut filters = create_test_filters();
        filters.only_verified = false;
        assert!(passes_filters(&person, &filters));
    }

    #[test]
    fn test_filters_fail_subject() {
        let person = create_test_person(Role::Mentor, true);
        let mut filters = create_test_filters();
        filters.subject_id = "chem".to_string();

        assert!(!passes_filters(&person, &filters));
    }

    #[test]
    fn test_query_is_trimmed_and_case_insensitive() {
        let person = create_test_person(Role::Mentor, true);
        let mut filters = create_test_filters();

        filters.query = "  VLADIVOSTOK ".to_string();
        assert!(passes_filters(&person, &filters));

        filters.query = "moscow".to_string();
        assert!(!passes_filters(&person, &filters));

        filters.query = "   ".to_string();
        assert!(passes_filters(&person, &filters));
    }

    #[test]
    fn test_query_spans_joined_fields() {
        let person = create_test_person(Role::Mentor, true);
        // "... algebra School No. 12 ..." only exists in the joined haystack
        assert!(matches_query(&person, "algebra school"));
    }

    #[test]
    fn test_shared_timeslots() {
        let person = create_test_person(Role::Mentor, true);
        let shared = shared_timeslots(&person, &create_test_filters());

        assert_eq!(shared, vec!["wed-17"]);
    }
}
