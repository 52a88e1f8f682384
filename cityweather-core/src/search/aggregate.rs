use std::collections::HashSet;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::{
    geocode::GeocodeClient,
    model::{Location, SearchQuery},
};

use super::{
    fallback::fallback_matches,
    planner::Strategy,
};

/// Page size requested from the geocoder for every strategy.
pub const STRATEGY_PAGE_SIZE: u32 = 100;

/// What one strategy contributed. Failure detail is logged and dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum StrategyOutcome {
    Found(Vec<Location>),
    Failed,
}

impl StrategyOutcome {
    pub fn into_locations(self) -> Vec<Location> {
        match self {
            StrategyOutcome::Found(locations) => locations,
            StrategyOutcome::Failed => Vec::new(),
        }
    }
}

async fn run_strategy(client: &dyn GeocodeClient, strategy: &Strategy) -> StrategyOutcome {
    match client.search(&strategy.query, STRATEGY_PAGE_SIZE).await {
        Ok(locations) => {
            debug!(
                strategy = %strategy.kind,
                query = %strategy.query,
                count = locations.len(),
                "strategy returned results"
            );
            StrategyOutcome::Found(locations)
        }
        Err(err) => {
            warn!(
                strategy = %strategy.kind,
                query = %strategy.query,
                error = %err,
                "strategy failed"
            );
            StrategyOutcome::Failed
        }
    }
}

/// Appends locations whose identity is not in the accumulator yet; first seen wins.
#[derive(Debug, Default)]
pub struct Merger {
    seen: HashSet<(String, String)>,
    merged: Vec<Location>,
}

impl Merger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, candidates: Vec<Location>) {
        for location in candidates {
            let key = (location.name.clone(), location.country_code.clone());
            if self.seen.insert(key) {
                self.merged.push(location);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.merged.is_empty()
    }

    pub fn into_locations(self) -> Vec<Location> {
        self.merged
    }
}

/// Runs all strategies concurrently, merges them in plan order and applies the fallback list.
pub async fn aggregate(
    client: &dyn GeocodeClient,
    query: &SearchQuery,
    strategies: &[Strategy],
) -> Vec<Location> {
    // join_all yields outcomes in input order, whatever order the calls complete in.
    let outcomes = join_all(strategies.iter().map(|s| run_strategy(client, s))).await;

    let mut merger = Merger::new();
    for outcome in outcomes {
        merger.extend(outcome.into_locations());
    }

    if merger.is_empty() {
        let fallback = fallback_matches(query);
        debug!(
            query = %query,
            count = fallback.len(),
            "no strategy matched, using fallback cities"
        );
        merger.extend(fallback);
    }

    merger.into_locations()
}
