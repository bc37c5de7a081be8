//! Keyed result cache for one logical query.
//!
//! The cache tracks which key is current, at most one in-flight request per
//! key, and a generation number per request. A response is applied only if
//! its ticket is still the in-flight request of its key *and* that key is
//! still current; anything else is stale and dropped.
//!
//! Entries are keyed in a `BTreeMap` so traversal (and logging) is stable.

use crate::error::FetchError;
use crate::keys::QueryKind;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::rc::Rc;

/// What a subscriber currently sees for its key.
#[derive(Debug)]
pub enum QueryState<V> {
    /// No key: the query is not eligible.
    Absent,
    Pending,
    Ready(Rc<V>),
    Failed(FetchError),
}

impl<V> Clone for QueryState<V> {
    fn clone(&self) -> Self {
        match self {
            QueryState::Absent => QueryState::Absent,
            QueryState::Pending => QueryState::Pending,
            QueryState::Ready(value) => QueryState::Ready(Rc::clone(value)),
            QueryState::Failed(err) => QueryState::Failed(err.clone()),
        }
    }
}

impl<V> QueryState<V> {
    pub fn ready(&self) -> Option<&Rc<V>> {
        match self {
            QueryState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            QueryState::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, QueryState::Pending)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, QueryState::Absent)
    }
}

/// Handle for one issued request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket<K> {
    pub key: K,
    pub generation: u64,
}

/// Result of handing a response back to the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Stale,
}

#[derive(Debug)]
struct Entry<V> {
    result: Option<Result<Rc<V>, FetchError>>,
    in_flight: Option<u64>,
}

impl<V> Entry<V> {
    fn empty() -> Self {
        Self {
            result: None,
            in_flight: None,
        }
    }

    fn is_idle(&self) -> bool {
        self.result.is_none() && self.in_flight.is_none()
    }
}

#[derive(Debug)]
pub struct QueryCache<K, V> {
    kind: QueryKind,
    /// Keep successful results of superseded keys (static geometry).
    retain: bool,
    current: Option<K>,
    next_generation: u64,
    requests_issued: u64,
    entries: BTreeMap<K, Entry<V>>,
}

impl<K: Ord + Clone + Debug, V> QueryCache<K, V> {
    /// Cache that forgets a result as soon as its key is superseded.
    pub fn new(kind: QueryKind) -> Self {
        Self {
            kind,
            retain: false,
            current: None,
            next_generation: 1,
            requests_issued: 0,
            entries: BTreeMap::new(),
        }
    }

    /// Cache that keeps successful results for every key it has seen.
    pub fn retained(kind: QueryKind) -> Self {
        Self {
            retain: true,
            ..Self::new(kind)
        }
    }

    pub fn kind(&self) -> QueryKind {
        self.kind
    }

    pub fn current_key(&self) -> Option<&K> {
        self.current.as_ref()
    }

    /// Total requests issued over the cache's lifetime.
    pub fn requests_issued(&self) -> u64 {
        self.requests_issued
    }

    /// Make `key` current. Returns a ticket when a request must be issued:
    /// never for `None`, never while the key already has a result or a
    /// request in flight.
    pub fn subscribe(&mut self, key: Option<K>) -> Option<Ticket<K>> {
        if key != self.current {
            if let Some(previous) = self.current.take() {
                self.release(&previous);
            }
            self.current = key.clone();
        }
        let key = key?;
        let entry = self.entries.entry(key.clone()).or_insert_with(Entry::empty);
        if entry.result.is_some() || entry.in_flight.is_some() {
            return None;
        }
        Some(self.issue(key))
    }

    /// Re-issue the current key's request, unless one is already in flight.
    pub fn refetch(&mut self) -> Option<Ticket<K>> {
        let key = self.current.clone()?;
        let entry = self.entries.entry(key.clone()).or_insert_with(Entry::empty);
        if entry.in_flight.is_some() {
            return None;
        }
        Some(self.issue(key))
    }

    pub fn complete(&mut self, ticket: Ticket<K>, result: Result<V, FetchError>) -> Completion {
        let is_current = self.current.as_ref() == Some(&ticket.key);
        let Some(entry) = self.entries.get_mut(&ticket.key) else {
            log::debug!("{}: dropping response for unknown key {:?}", self.kind, ticket.key);
            return Completion::Stale;
        };
        if entry.in_flight != Some(ticket.generation) {
            log::debug!(
                "{}: dropping response generation {} for {:?}",
                self.kind,
                ticket.generation,
                ticket.key
            );
            return Completion::Stale;
        }
        entry.in_flight = None;

        if !is_current {
            log::debug!("{}: dropping response for superseded {:?}", self.kind, ticket.key);
            if entry.is_idle() {
                self.entries.remove(&ticket.key);
            }
            return Completion::Stale;
        }

        if let Err(err) = &result {
            log::warn!("{} failed for {:?}: {}", self.kind, ticket.key, err);
        }
        entry.result = Some(result.map(Rc::new));
        Completion::Applied
    }

    pub fn state(&self) -> QueryState<V> {
        let Some(key) = self.current.as_ref() else {
            return QueryState::Absent;
        };
        match self.entries.get(key) {
            Some(Entry {
                result: Some(Ok(value)),
                ..
            }) => QueryState::Ready(Rc::clone(value)),
            Some(Entry {
                result: Some(Err(err)),
                in_flight: None,
            }) => QueryState::Failed(err.clone()),
            _ => QueryState::Pending,
        }
    }

    fn issue(&mut self, key: K) -> Ticket<K> {
        let generation = self.next_generation;
        self.next_generation += 1;
        self.requests_issued += 1;
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.in_flight = Some(generation);
        }
        log::debug!("{}: issuing generation {} for {:?}", self.kind, generation, key);
        Ticket { key, generation }
    }

    /// Forget what the superseded key holds. Its in-flight request is
    /// abandoned too: a later return to the key issues a fresh generation,
    /// and the orphaned response fails the generation check.
    fn release(&mut self, key: &K) {
        let Some(entry) = self.entries.get_mut(key) else {
            return;
        };
        let keep = self.retain && matches!(entry.result, Some(Ok(_)));
        if !keep {
            entry.result = None;
        }
        entry.in_flight = None;
        if entry.is_idle() {
            self.entries.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache() -> QueryCache<&'static str, u32> {
        QueryCache::new(QueryKind::Snapshot)
    }

    #[test]
    fn absent_key_issues_nothing() {
        let mut cache = cache();
        assert!(cache.subscribe(None).is_none());
        assert!(cache.state().is_absent());
        assert_eq!(cache.requests_issued(), 0);
    }

    #[test]
    fn unchanged_key_issues_one_request() {
        let mut cache = cache();
        let ticket = cache.subscribe(Some("k1")).unwrap();
        for _ in 0..10 {
            assert!(cache.subscribe(Some("k1")).is_none());
        }
        assert!(cache.state().is_pending());
        assert_eq!(cache.complete(ticket, Ok(7)), Completion::Applied);
        assert!(cache.subscribe(Some("k1")).is_none());
        assert_eq!(cache.requests_issued(), 1);
        assert_eq!(cache.state().ready().map(|v| **v), Some(7));
    }

    #[test]
    fn superseded_response_is_dropped() {
        let mut cache = cache();
        let first = cache.subscribe(Some("k1")).unwrap();
        let second = cache.subscribe(Some("k2")).unwrap();
        assert_ne!(first.generation, second.generation);

        assert_eq!(cache.complete(first, Ok(1)), Completion::Stale);
        assert!(cache.state().is_pending());

        assert_eq!(cache.complete(second, Ok(2)), Completion::Applied);
        assert_eq!(cache.state().ready().map(|v| **v), Some(2));
    }

    #[test]
    fn returning_to_superseded_key_issues_fresh_generation() {
        let mut cache = cache();
        let first = cache.subscribe(Some("k1")).unwrap();
        let _second = cache.subscribe(Some("k2")).unwrap();
        let third = cache.subscribe(Some("k1")).unwrap();
        assert_ne!(first.generation, third.generation);

        assert_eq!(cache.complete(first, Ok(1)), Completion::Stale);
        assert!(cache.state().is_pending());
        assert_eq!(cache.complete(third, Ok(3)), Completion::Applied);
        assert_eq!(cache.state().ready().map(|v| **v), Some(3));
        assert_eq!(cache.requests_issued(), 3);
    }

    #[test]
    fn abandoned_request_does_not_block_the_key() {
        let mut cache = cache();
        let _lost = cache.subscribe(Some("Groundwater")).unwrap();
        cache.subscribe(Some("Rivers"));

        let reissued = cache.subscribe(Some("Groundwater"));
        assert!(reissued.is_some());
        assert!(cache.refetch().is_none());

        let reissued = reissued.unwrap();
        assert_eq!(cache.complete(reissued, Ok(5)), Completion::Applied);
        assert_eq!(cache.state().ready().map(|v| **v), Some(5));
        assert!(cache.refetch().is_some());
    }

    #[test]
    fn retained_key_keeps_value_when_refetch_is_abandoned() {
        let mut cache: QueryCache<&'static str, u32> = QueryCache::retained(QueryKind::Features);
        let first = cache.subscribe(Some("Rivers")).unwrap();
        cache.complete(first, Ok(1));
        let _lost = cache.refetch().unwrap();
        cache.subscribe(Some("Lakes"));

        assert!(cache.subscribe(Some("Rivers")).is_none());
        assert_eq!(cache.state().ready().map(|v| **v), Some(1));
        assert!(cache.refetch().is_some());
    }

    #[test]
    fn superseded_result_is_replaced_not_kept() {
        let mut cache = cache();
        let first = cache.subscribe(Some("k1")).unwrap();
        cache.complete(first, Ok(1));
        let second = cache.subscribe(Some("k2")).unwrap();
        assert!(cache.state().is_pending());
        cache.complete(second, Ok(2));
        assert!(cache.subscribe(Some("k1")).is_some());
    }

    #[test]
    fn retained_cache_serves_previous_keys() {
        let mut cache: QueryCache<&str, u32> = QueryCache::retained(QueryKind::Features);
        let first = cache.subscribe(Some("Rivers")).unwrap();
        cache.complete(first, Ok(1));
        let second = cache.subscribe(Some("Groundwater")).unwrap();
        cache.complete(second, Ok(2));
        assert!(cache.subscribe(Some("Rivers")).is_none());
        assert_eq!(cache.state().ready().map(|v| **v), Some(1));
        assert_eq!(cache.requests_issued(), 2);
    }

    #[test]
    fn failure_is_not_retried_until_key_changes() {
        let mut cache = cache();
        let ticket = cache.subscribe(Some("k1")).unwrap();
        cache.complete(ticket, Err(FetchError("timeout".to_string())));
        assert_eq!(cache.state().error().map(|e| e.0.as_str()), Some("timeout"));
        assert!(cache.subscribe(Some("k1")).is_none());

        cache.subscribe(Some("k2"));
        assert!(cache.subscribe(Some("k1")).is_some());
    }

    #[test]
    fn manual_refetch_reissues_current_key() {
        let mut cache = cache();
        let ticket = cache.subscribe(Some("k1")).unwrap();
        assert!(cache.refetch().is_none());
        cache.complete(ticket, Err(FetchError("boom".to_string())));

        let retry = cache.refetch().unwrap();
        assert!(cache.state().is_pending());
        assert_eq!(cache.complete(retry, Ok(3)), Completion::Applied);
        assert_eq!(cache.state().ready().map(|v| **v), Some(3));
    }

    #[test]
    fn refetch_keeps_showing_previous_value() {
        let mut cache = cache();
        let ticket = cache.subscribe(Some("k1")).unwrap();
        cache.complete(ticket, Ok(1));
        let retry = cache.refetch().unwrap();
        assert_eq!(cache.state().ready().map(|v| **v), Some(1));
        let stale = Ticket {
            key: "k1",
            generation: retry.generation - 1,
        };
        assert_eq!(cache.complete(stale, Ok(9)), Completion::Stale);
        cache.complete(retry, Ok(2));
        assert_eq!(cache.state().ready().map(|v| **v), Some(2));
    }
}
