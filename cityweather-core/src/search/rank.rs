use std::cmp::Ordering;

use crate::model::{Location, SearchQuery};

/// Sort key for one location against a lowercased query.
///
/// Field order is priority order; `false` sorts before `true`, so the flags are negated.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct RankKey<'a> {
    not_exact: bool,
    not_contains: bool,
    not_prefix: bool,
    char_len: usize,
    name: &'a str,
}

impl<'a> RankKey<'a> {
    fn new(name: &'a str, query_lower: &str) -> Self {
        let lower = name.to_lowercase();
        Self {
            not_exact: lower != query_lower,
            not_contains: !lower.contains(query_lower),
            not_prefix: !lower.starts_with(query_lower),
            char_len: name.chars().count(),
            name,
        }
    }
}

/// Relevance order of two names for the lowercased query.
pub fn compare_names(a: &str, b: &str, query_lower: &str) -> Ordering {
    RankKey::new(a, query_lower).cmp(&RankKey::new(b, query_lower))
}

/// Stable relevance sort: exact match, substring, prefix, shorter name, then name.
pub fn rank(locations: &mut [Location], query: &SearchQuery) {
    let query_lower = query.to_lowercase();
    locations.sort_by(|a, b| compare_names(&a.name, &b.name, &query_lower));
}
