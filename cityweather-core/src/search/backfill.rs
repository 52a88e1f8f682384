use futures::future::join_all;
use tracing::{debug, warn};

use crate::{geocode::GeocodeClient, model::Location};

pub const BACKFILL_PAGE_SIZE: u32 = 1;

/// `location` with coordinates from the first geocoder hit, or unchanged.
async fn backfill_one(client: &dyn GeocodeClient, location: &Location) -> Location {
    let query = format!("{}, {}", location.name, location.country_code);

    match client.search(&query, BACKFILL_PAGE_SIZE).await {
        Ok(hits) => match hits.first() {
            Some(hit) => {
                debug!(%query, lat = hit.latitude, lon = hit.longitude, "backfilled coordinates");
                location.with_coordinates(hit.latitude, hit.longitude)
            }
            None => {
                debug!(%query, "backfill lookup found nothing");
                location.clone()
            }
        },
        Err(err) => {
            warn!(%query, error = %err, "backfill lookup failed");
            location.clone()
        }
    }
}

/// Looks up coordinates for every location that has none, concurrently.
///
/// List order is preserved. A lookup that fails or finds nothing leaves its
/// entry at (0, 0).
pub async fn backfill(client: &dyn GeocodeClient, locations: &mut [Location]) {
    let pending: Vec<usize> = locations
        .iter()
        .enumerate()
        .filter(|(_, l)| !l.has_coordinates())
        .map(|(i, _)| i)
        .collect();

    if pending.is_empty() {
        return;
    }

    let current: &[Location] = locations;
    let filled = join_all(pending.iter().map(|&i| backfill_one(client, &current[i]))).await;

    for (i, location) in pending.into_iter().zip(filled) {
        locations[i] = location;
    }
}
