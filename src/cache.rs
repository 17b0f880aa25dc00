// Time-based cache of the combined remote dataset.
//
// Only the fetched CSV data is cached; the stats engine always computes
// fresh from whatever events it is handed.

use crate::event::PlateAppearanceEvent;
use std::time::{Duration, Instant};
use tracing::info;

#[derive(Debug)]
pub struct DatasetCache {
    ttl: Duration,
    entry: Option<(Instant, Vec<PlateAppearanceEvent>)>,
}

impl DatasetCache {
    pub fn new(ttl: Duration) -> DatasetCache {
        DatasetCache { ttl, entry: None }
    }

    /// The cached dataset, or `None` when nothing is stored or the entry
    /// has outlived its TTL.
    pub fn get(&self) -> Option<&[PlateAppearanceEvent]> {
        match &self.entry {
            Some((loaded_at, events)) if loaded_at.elapsed() < self.ttl => {
                Some(events.as_slice())
            }
            _ => None,
        }
    }

    /// Replace the cached dataset, restarting the TTL clock.
    pub fn store(&mut self, events: Vec<PlateAppearanceEvent>) {
        info!("caching {} events for {:?}", events.len(), self.ttl);
        self.entry = Some((Instant::now(), events));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{GameLevel, Handedness, PlayResult};
    use chrono::NaiveDate;

    fn make_event(batter: &str) -> PlateAppearanceEvent {
        PlateAppearanceEvent {
            batter: batter.to_string(),
            team: "TOK".to_string(),
            pitcher_throws: Handedness::Right,
            level: GameLevel::A,
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            result: PlayResult::Single,
        }
    }

    #[test]
    fn empty_cache_misses() {
        let cache = DatasetCache::new(Duration::from_secs(3600));
        assert!(cache.get().is_none());
    }

    #[test]
    fn stored_dataset_hits_within_ttl() {
        let mut cache = DatasetCache::new(Duration::from_secs(3600));
        cache.store(vec![make_event("Sato"), make_event("Tanaka")]);

        let events = cache.get().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].batter, "Sato");
    }

    #[test]
    fn zero_ttl_expires_immediately() {
        let mut cache = DatasetCache::new(Duration::ZERO);
        cache.store(vec![make_event("Sato")]);
        assert!(cache.get().is_none());
    }

    #[test]
    fn store_replaces_previous_dataset() {
        let mut cache = DatasetCache::new(Duration::from_secs(3600));
        cache.store(vec![make_event("Sato")]);
        cache.store(vec![make_event("Tanaka"), make_event("Suzuki")]);

        let events = cache.get().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].batter, "Tanaka");
    }
}
