use crate::model::SearchQuery;

/// Suffix appended by [`StrategyKind::CountrySuffixed`]. Fixed bias toward Indian cities.
pub const COUNTRY_SUFFIX: &str = ", India";

/// Queries longer than this also get a [`StrategyKind::PrefixTruncated`] variant.
pub const PREFIX_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Exact,
    CountrySuffixed,
    PrefixTruncated,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Exact => "exact",
            StrategyKind::CountrySuffixed => "country-suffixed",
            StrategyKind::PrefixTruncated => "prefix-truncated",
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One query variant to send to the geocoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strategy {
    pub kind: StrategyKind,
    pub query: String,
}

/// Query variants in priority order.
pub fn plan(query: &SearchQuery) -> Vec<Strategy> {
    let mut strategies = vec![
        Strategy {
            kind: StrategyKind::Exact,
            query: query.as_str().to_string(),
        },
        Strategy {
            kind: StrategyKind::CountrySuffixed,
            query: format!("{query}{COUNTRY_SUFFIX}"),
        },
    ];

    if query.char_len() > PREFIX_LEN {
        strategies.push(Strategy {
            kind: StrategyKind::PrefixTruncated,
            query: query.prefix(PREFIX_LEN),
        });
    }

    strategies
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(strategies: &[Strategy]) -> Vec<StrategyKind> {
        strategies.iter().map(|s| s.kind).collect()
    }

    #[test]
    fn long_query_gets_three_strategies_in_order() {
        let q = SearchQuery::parse("Mumbai").unwrap();
        let strategies = plan(&q);

        assert_eq!(
            kinds(&strategies),
            vec![
                StrategyKind::Exact,
                StrategyKind::CountrySuffixed,
                StrategyKind::PrefixTruncated
            ]
        );
        assert_eq!(strategies[0].query, "Mumbai");
        assert_eq!(strategies[1].query, "Mumbai, India");
        assert_eq!(strategies[2].query, "Mum");
    }

    #[test]
    fn three_character_query_has_no_prefix_strategy() {
        let q = SearchQuery::parse("Goa").unwrap();
        assert_eq!(
            kinds(&plan(&q)),
            vec![StrategyKind::Exact, StrategyKind::CountrySuffixed]
        );
    }

    #[test]
    fn prefix_is_taken_in_characters() {
        let q = SearchQuery::parse("Åland").unwrap();
        assert_eq!(plan(&q)[2].query, "Åla");
    }
}
