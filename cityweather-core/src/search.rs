//! City search and disambiguation.
//!
//! A query runs through four stages:
//! - [`planner`] turns the input into query variants
//! - [`aggregate`] sends them to the geocoder and merges the answers by identity
//! - [`rank`] orders the merged list by relevance
//! - [`backfill`] looks up coordinates for entries that have none

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::{
    error::SearchError,
    geocode::GeocodeClient,
    model::{Location, SearchQuery},
};

pub mod aggregate;
pub mod backfill;
pub mod fallback;
pub mod planner;
pub mod rank;

/// Request/response search over a geocoding client.
#[derive(Debug, Clone)]
pub struct CitySearch {
    client: Arc<dyn GeocodeClient>,
}

impl CitySearch {
    pub fn new(client: Arc<dyn GeocodeClient>) -> Self {
        Self { client }
    }

    /// Ranked, deduplicated locations for `raw`.
    ///
    /// Blank input yields an empty list without touching the network. Only a
    /// missing credential makes the search fail; per-strategy failures just
    /// contribute nothing.
    pub async fn search(&self, raw: &str) -> Result<Vec<Location>, SearchError> {
        self.client.check_credentials()?;

        let Some(query) = SearchQuery::parse(raw) else {
            return Ok(Vec::new());
        };

        let strategies = planner::plan(&query);
        debug!(query = %query, strategies = strategies.len(), "searching cities");

        let mut locations = aggregate::aggregate(self.client.as_ref(), &query, &strategies).await;
        rank::rank(&mut locations, &query);
        backfill::backfill(self.client.as_ref(), &mut locations).await;

        info!(query = %query, count = locations.len(), "city search finished");
        for (index, location) in locations.iter().take(5).enumerate() {
            debug!(rank = index + 1, location = %location.display_name(), "top result");
        }

        Ok(locations)
    }
}

/// Result of [`SearchSession::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchUpdate {
    /// The run was still the latest; this many results are now visible.
    Applied(usize),
    /// A newer submit or clear happened first; the results were dropped.
    Superseded,
}

/// Visible search results that only the latest search may replace.
///
/// Front ends that search on every keystroke hold one of these instead of calling
/// [`CitySearch`] directly.
#[derive(Debug)]
pub struct SearchSession {
    engine: CitySearch,
    generation: AtomicU64,
    results: Mutex<Vec<Location>>,
}

impl SearchSession {
    pub fn new(engine: CitySearch) -> Self {
        Self {
            engine,
            generation: AtomicU64::new(0),
            results: Mutex::new(Vec::new()),
        }
    }

    /// Starts a new search, hiding previous results until it completes.
    pub async fn submit(&self, raw: &str) -> Result<SearchUpdate, SearchError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.results.lock().await.clear();

        let outcome = self.engine.search(raw).await;

        let mut results = self.results.lock().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "discarding superseded search");
            return Ok(SearchUpdate::Superseded);
        }

        let locations = outcome?;
        let count = locations.len();
        *results = locations;
        Ok(SearchUpdate::Applied(count))
    }

    /// Snapshot of the visible results.
    pub async fn results(&self) -> Vec<Location> {
        self.results.lock().await.clone()
    }

    /// Empties the results and invalidates any search still in flight.
    pub async fn clear(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.results.lock().await.clear();
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocode::MockGeocoder;
    use std::time::Duration;

    fn engine(mock: &MockGeocoder) -> CitySearch {
        CitySearch::new(Arc::new(mock.clone()))
    }

    #[tokio::test]
    async fn blank_query_makes_no_calls() {
        let mock = MockGeocoder::new();

        let results = engine(&mock).search("   ").await.unwrap();

        assert!(results.is_empty());
        assert_eq!(mock.call_count().await, 0);
    }

    #[tokio::test]
    async fn missing_credentials_fail_before_any_call() {
        let mock = MockGeocoder::new().without_credentials();

        let err = engine(&mock).search("Mumbai").await.unwrap_err();

        assert!(matches!(err, SearchError::CredentialMissing));
        assert_eq!(mock.call_count().await, 0);
    }

    #[tokio::test]
    async fn ranked_then_backfilled() {
        let mock = MockGeocoder::new()
            .with_locations("Lucknow, IN", vec![Location::new("Lucknow", 26.85, 80.95, "IN", None)]);

        let results = engine(&mock).search("luck").await.unwrap();

        assert_eq!(results, vec![Location::new("Lucknow", 26.85, 80.95, "IN", None)]);
        let queries: Vec<String> = mock.calls().await.into_iter().map(|(q, _)| q).collect();
        assert_eq!(queries, vec!["luck", "luck, India", "luc", "Lucknow, IN"]);
    }

    #[tokio::test]
    async fn session_publishes_latest_results() {
        let mock = MockGeocoder::new()
            .with_locations("Pune", vec![Location::new("Pune", 18.52, 73.85, "IN", None)]);
        let session = SearchSession::new(engine(&mock));

        let update = session.submit("Pune").await.unwrap();

        assert_eq!(update, SearchUpdate::Applied(1));
        assert_eq!(session.results().await[0].name, "Pune");

        session.clear().await;
        assert!(session.results().await.is_empty());
    }

    #[tokio::test]
    async fn older_search_finishing_first_is_discarded() {
        let mock = MockGeocoder::new()
            .with_locations("Jai", vec![Location::new("Jaisalmer", 26.9, 70.9, "IN", None)])
            .with_delay("Jai", Duration::from_millis(100))
            .with_locations("Jaipur", vec![Location::new("Jaipur", 26.91, 75.79, "IN", None)]);
        let session = SearchSession::new(engine(&mock));

        let (slow, fast) = tokio::join!(session.submit("Jai"), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            session.submit("Jaipur").await
        });

        assert_eq!(slow.unwrap(), SearchUpdate::Superseded);
        assert!(matches!(fast.unwrap(), SearchUpdate::Applied(_)));

        let visible = session.results().await;
        assert_eq!(visible[0].name, "Jaipur");
        assert_eq!(session.generation(), 2);
    }

    #[tokio::test]
    async fn older_search_finishing_last_stays_hidden() {
        let mock = MockGeocoder::new()
            .with_locations("Agra", vec![Location::new("Agra", 27.17, 78.0, "IN", None)])
            .with_delay("Agra", Duration::from_millis(80))
            .with_locations("Delhi", vec![Location::new("Delhi", 28.61, 77.21, "IN", None)]);
        let session = SearchSession::new(engine(&mock));

        let (old, new) = tokio::join!(session.submit("Agra"), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            let update = session.submit("Delhi").await;
            // The newer search is already visible while the older one is still pending.
            assert_eq!(session.results().await[0].name, "Delhi");
            update
        });

        assert_eq!(new.unwrap(), SearchUpdate::Applied(1));
        assert_eq!(old.unwrap(), SearchUpdate::Superseded);

        let visible: Vec<String> = session.results().await.into_iter().map(|l| l.name).collect();
        assert_eq!(visible, vec!["Delhi"]);
    }

    #[tokio::test]
    async fn clear_invalidates_in_flight_search() {
        let mock = MockGeocoder::new()
            .with_locations("Agra", vec![Location::new("Agra", 27.17, 78.0, "IN", None)])
            .with_delay("Agra", Duration::from_millis(60));
        let session = SearchSession::new(engine(&mock));

        let (update, ()) = tokio::join!(session.submit("Agra"), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            session.clear().await;
        });

        assert_eq!(update.unwrap(), SearchUpdate::Superseded);
        assert!(session.results().await.is_empty());
    }
}
