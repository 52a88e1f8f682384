//! Deterministic in-memory geocoder for tests.
//!
//! Replies are keyed by the exact query string. Queries with no canned reply
//! return an empty list. Every call is recorded, so tests can assert how many
//! strategies or backfill lookups were issued.

use async_trait::async_trait;
use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::sync::Mutex;

use crate::{
    error::{GeocodeError, SearchError},
    model::Location,
};

use super::GeocodeClient;

#[derive(Debug, Clone)]
enum MockReply {
    Locations(Vec<Location>),
    Failure { status: u16 },
}

#[derive(Debug, Clone, Default)]
pub struct MockGeocoder {
    replies: HashMap<String, MockReply>,
    delays: HashMap<String, Duration>,
    credentials_missing: bool,
    calls: Arc<Mutex<Vec<(String, u32)>>>,
}

impl MockGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `query` with `locations`, truncated to the requested limit.
    pub fn with_locations(mut self, query: impl Into<String>, locations: Vec<Location>) -> Self {
        self.replies.insert(query.into(), MockReply::Locations(locations));
        self
    }

    /// Answer `query` with a non-success HTTP status.
    pub fn with_failure(mut self, query: impl Into<String>, status: u16) -> Self {
        self.replies.insert(query.into(), MockReply::Failure { status });
        self
    }

    /// Sleep before answering `query`.
    pub fn with_delay(mut self, query: impl Into<String>, delay: Duration) -> Self {
        self.delays.insert(query.into(), delay);
        self
    }

    pub fn without_credentials(mut self) -> Self {
        self.credentials_missing = true;
        self
    }

    /// `(query, limit)` pairs in the order calls started.
    pub async fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

#[async_trait]
impl GeocodeClient for MockGeocoder {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<Location>, GeocodeError> {
        self.calls.lock().await.push((query.to_string(), limit));

        if let Some(delay) = self.delays.get(query) {
            tokio::time::sleep(*delay).await;
        }

        match self.replies.get(query) {
            Some(MockReply::Locations(locations)) => {
                Ok(locations.iter().take(limit as usize).cloned().collect())
            }
            Some(MockReply::Failure { status }) => Err(GeocodeError::Status {
                status: *status,
                body: "mock failure".to_string(),
            }),
            None => Ok(Vec::new()),
        }
    }

    fn check_credentials(&self) -> Result<(), SearchError> {
        if self.credentials_missing {
            Err(SearchError::CredentialMissing)
        } else {
            Ok(())
        }
    }
}
