use crate::model::{Location, SearchQuery};

pub const FALLBACK_COUNTRY_CODE: &str = "IN";

/// Major cities offered when no strategy found anything.
pub const FALLBACK_CITIES: [&str; 20] = [
    "Mumbai",
    "Delhi",
    "Bangalore",
    "Hyderabad",
    "Chennai",
    "Kolkata",
    "Pune",
    "Ahmedabad",
    "Jaipur",
    "Lucknow",
    "Kanpur",
    "Nagpur",
    "Indore",
    "Thane",
    "Bhopal",
    "Visakhapatnam",
    "Patna",
    "Vadodara",
    "Ghaziabad",
    "Ludhiana",
];

/// Fallback cities whose name contains the query, case-insensitively, without coordinates.
pub fn fallback_matches(query: &SearchQuery) -> Vec<Location> {
    let needle = query.to_lowercase();
    FALLBACK_CITIES
        .iter()
        .filter(|name| name.to_lowercase().contains(&needle))
        .map(|name| Location::unresolved(*name, FALLBACK_COUNTRY_CODE))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(query: &str) -> Vec<String> {
        fallback_matches(&SearchQuery::parse(query).unwrap())
            .into_iter()
            .map(|l| l.name)
            .collect()
    }

    #[test]
    fn substring_match_ignores_case() {
        assert_eq!(names("BHOP"), vec!["Bhopal"]);
        assert_eq!(names("pur"), vec!["Jaipur", "Kanpur", "Nagpur"]);
    }

    #[test]
    fn matches_are_unresolved_indian_cities() {
        let matches = fallback_matches(&SearchQuery::parse("thane").unwrap());

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].identity(), ("Thane", "IN"));
        assert!(!matches[0].has_coordinates());
    }

    #[test]
    fn unknown_query_matches_nothing() {
        assert!(names("Reykjavik").is_empty());
    }
}
