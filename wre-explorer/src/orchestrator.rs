//! Fetch orchestration: one keyed cache per downstream query.
//!
//! The orchestrator never performs I/O itself. [`Orchestrator::sync`] turns
//! the current [`QueryKeys`] into [`FetchJob`]s; the caller runs them against
//! a [`Backend`] (on whatever executor it has) and hands each
//! [`FetchOutcome`] back through [`Orchestrator::apply`].

use crate::cache::{Completion, QueryCache, QueryState, Ticket};
use crate::error::FetchError;
use crate::keys::{CategoryKey, ForecastKey, MetadataKey, QueryKeys, QueryKind, SnapshotKey};
use wre_api::{DatasetInfo, EntitySnapshot, ForecastResult, GeoShapes, WaterFeatures};

/// The backend queries the explorer depends on.
///
/// Futures are not required to be `Send`; the explorer is single-threaded
/// and the browser client cannot provide them.
#[allow(async_fn_in_trait)]
pub trait Backend {
    async fn dataset_info(&self, key: &MetadataKey) -> anyhow::Result<DatasetInfo>;
    async fn entity_snapshot(&self, key: &SnapshotKey) -> anyhow::Result<EntitySnapshot>;
    async fn water_features(&self, key: &CategoryKey) -> anyhow::Result<WaterFeatures>;
    async fn water_shapes(&self, key: &CategoryKey) -> anyhow::Result<GeoShapes>;
    async fn forecast(&self, key: &ForecastKey) -> anyhow::Result<ForecastResult>;
}

/// A request the orchestrator wants issued.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchJob {
    Metadata(Ticket<MetadataKey>),
    Snapshot(Ticket<SnapshotKey>),
    Features(Ticket<CategoryKey>),
    Shapes(Ticket<CategoryKey>),
    Forecast(Ticket<ForecastKey>),
}

/// A finished request, tagged with the ticket it was issued under.
#[derive(Debug)]
pub enum FetchOutcome {
    Metadata(Ticket<MetadataKey>, Result<DatasetInfo, FetchError>),
    Snapshot(Ticket<SnapshotKey>, Result<EntitySnapshot, FetchError>),
    Features(Ticket<CategoryKey>, Result<WaterFeatures, FetchError>),
    Shapes(Ticket<CategoryKey>, Result<GeoShapes, FetchError>),
    Forecast(Ticket<ForecastKey>, Result<ForecastResult, FetchError>),
}

impl FetchJob {
    pub fn kind(&self) -> QueryKind {
        match self {
            FetchJob::Metadata(_) => QueryKind::Metadata,
            FetchJob::Snapshot(_) => QueryKind::Snapshot,
            FetchJob::Features(_) => QueryKind::Features,
            FetchJob::Shapes(_) => QueryKind::Shapes,
            FetchJob::Forecast(_) => QueryKind::Forecast,
        }
    }

    /// Run the request. Failures are captured in the outcome, never returned.
    pub async fn run<B: Backend>(self, backend: &B) -> FetchOutcome {
        match self {
            FetchJob::Metadata(ticket) => {
                let result = backend.dataset_info(&ticket.key).await;
                FetchOutcome::Metadata(ticket, result.map_err(FetchError::from))
            }
            FetchJob::Snapshot(ticket) => {
                let result = backend.entity_snapshot(&ticket.key).await;
                FetchOutcome::Snapshot(ticket, result.map_err(FetchError::from))
            }
            FetchJob::Features(ticket) => {
                let result = backend.water_features(&ticket.key).await;
                FetchOutcome::Features(ticket, result.map_err(FetchError::from))
            }
            FetchJob::Shapes(ticket) => {
                let result = backend.water_shapes(&ticket.key).await;
                FetchOutcome::Shapes(ticket, result.map_err(FetchError::from))
            }
            FetchJob::Forecast(ticket) => {
                let result = backend.forecast(&ticket.key).await;
                FetchOutcome::Forecast(ticket, result.map_err(FetchError::from))
            }
        }
    }
}

impl FetchOutcome {
    pub fn kind(&self) -> QueryKind {
        match self {
            FetchOutcome::Metadata(..) => QueryKind::Metadata,
            FetchOutcome::Snapshot(..) => QueryKind::Snapshot,
            FetchOutcome::Features(..) => QueryKind::Features,
            FetchOutcome::Shapes(..) => QueryKind::Shapes,
            FetchOutcome::Forecast(..) => QueryKind::Forecast,
        }
    }
}

#[derive(Debug)]
pub struct Orchestrator {
    metadata: QueryCache<MetadataKey, DatasetInfo>,
    snapshot: QueryCache<SnapshotKey, EntitySnapshot>,
    features: QueryCache<CategoryKey, WaterFeatures>,
    shapes: QueryCache<CategoryKey, GeoShapes>,
    forecast: QueryCache<ForecastKey, ForecastResult>,
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl Orchestrator {
    pub fn new() -> Self {
        Self {
            metadata: QueryCache::new(QueryKind::Metadata),
            snapshot: QueryCache::new(QueryKind::Snapshot),
            features: QueryCache::retained(QueryKind::Features),
            shapes: QueryCache::retained(QueryKind::Shapes),
            forecast: QueryCache::new(QueryKind::Forecast),
        }
    }

    /// Subscribe only the metadata query. Metadata gates every other key, so
    /// it is synced before the rest are resolved.
    pub fn sync_metadata(&mut self, key: Option<MetadataKey>) -> Option<FetchJob> {
        self.metadata.subscribe(key).map(FetchJob::Metadata)
    }

    /// Subscribe every query to its current key and collect the requests
    /// that must be issued.
    pub fn sync(&mut self, keys: &QueryKeys) -> Vec<FetchJob> {
        let jobs: Vec<FetchJob> = [
            self.sync_metadata(keys.metadata.clone()),
            self.snapshot
                .subscribe(keys.snapshot.clone())
                .map(FetchJob::Snapshot),
            self.features
                .subscribe(keys.features.clone())
                .map(FetchJob::Features),
            self.shapes.subscribe(keys.shapes.clone()).map(FetchJob::Shapes),
            self.forecast
                .subscribe(keys.forecast.clone())
                .map(FetchJob::Forecast),
        ]
        .into_iter()
        .flatten()
        .collect();

        if !jobs.is_empty() {
            log::debug!(
                "Issuing {} request(s): {:?}",
                jobs.len(),
                jobs.iter().map(FetchJob::kind).collect::<Vec<_>>()
            );
        }
        jobs
    }

    pub fn apply(&mut self, outcome: FetchOutcome) -> Completion {
        match outcome {
            FetchOutcome::Metadata(ticket, result) => self.metadata.complete(ticket, result),
            FetchOutcome::Snapshot(ticket, result) => self.snapshot.complete(ticket, result),
            FetchOutcome::Features(ticket, result) => self.features.complete(ticket, result),
            FetchOutcome::Shapes(ticket, result) => self.shapes.complete(ticket, result),
            FetchOutcome::Forecast(ticket, result) => self.forecast.complete(ticket, result),
        }
    }

    /// Explicitly re-issue one query for its current key.
    pub fn refetch(&mut self, kind: QueryKind) -> Option<FetchJob> {
        match kind {
            QueryKind::Metadata => self.metadata.refetch().map(FetchJob::Metadata),
            QueryKind::Snapshot => self.snapshot.refetch().map(FetchJob::Snapshot),
            QueryKind::Features => self.features.refetch().map(FetchJob::Features),
            QueryKind::Shapes => self.shapes.refetch().map(FetchJob::Shapes),
            QueryKind::Forecast => self.forecast.refetch().map(FetchJob::Forecast),
        }
    }

    pub fn metadata(&self) -> QueryState<DatasetInfo> {
        self.metadata.state()
    }

    pub fn snapshot(&self) -> QueryState<EntitySnapshot> {
        self.snapshot.state()
    }

    pub fn features(&self) -> QueryState<WaterFeatures> {
        self.features.state()
    }

    pub fn shapes(&self) -> QueryState<GeoShapes> {
        self.shapes.state()
    }

    pub fn forecast(&self) -> QueryState<ForecastResult> {
        self.forecast.state()
    }

    pub fn requests_issued(&self, kind: QueryKind) -> u64 {
        match kind {
            QueryKind::Metadata => self.metadata.requests_issued(),
            QueryKind::Snapshot => self.snapshot.requests_issued(),
            QueryKind::Features => self.features.requests_issued(),
            QueryKind::Shapes => self.shapes.requests_issued(),
            QueryKind::Forecast => self.forecast.requests_issued(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(year: i32) -> QueryKeys {
        QueryKeys {
            metadata: Some(MetadataKey {
                filename: "C11-2005-2024.csv".to_string(),
            }),
            snapshot: Some(SnapshotKey {
                filename: "C11-2005-2024.csv".to_string(),
                year,
                indicator: None,
                category: None,
            }),
            features: Some(CategoryKey {
                category: "Rivers".to_string(),
            }),
            shapes: Some(CategoryKey {
                category: "Rivers".to_string(),
            }),
            forecast: None,
        }
    }

    #[test]
    fn sync_issues_one_job_per_eligible_key() {
        let mut orchestrator = Orchestrator::new();
        let jobs = orchestrator.sync(&keys(2024));
        let kinds: Vec<QueryKind> = jobs.iter().map(FetchJob::kind).collect();
        assert_eq!(
            kinds,
            vec![
                QueryKind::Metadata,
                QueryKind::Snapshot,
                QueryKind::Features,
                QueryKind::Shapes
            ]
        );
        assert!(orchestrator.forecast().is_absent());
    }

    #[test]
    fn repeated_sync_is_a_no_op() {
        let mut orchestrator = Orchestrator::new();
        orchestrator.sync(&keys(2024));
        for _ in 0..5 {
            assert!(orchestrator.sync(&keys(2024)).is_empty());
        }
        for kind in QueryKind::ALL {
            let expected = u64::from(kind != QueryKind::Forecast);
            assert_eq!(orchestrator.requests_issued(kind), expected, "{kind}");
        }
    }

    #[test]
    fn year_change_only_reissues_snapshot() {
        let mut orchestrator = Orchestrator::new();
        orchestrator.sync(&keys(2024));
        let jobs = orchestrator.sync(&keys(2023));
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].kind(), QueryKind::Snapshot);
    }

    #[test]
    fn stale_snapshot_outcome_is_dropped() {
        let mut orchestrator = Orchestrator::new();
        let first = orchestrator.sync(&keys(2024));
        let second = orchestrator.sync(&keys(2023));

        let FetchJob::Snapshot(old) = first[1].clone() else {
            panic!("expected snapshot job");
        };
        let FetchJob::Snapshot(new) = second[0].clone() else {
            panic!("expected snapshot job");
        };

        let late = EntitySnapshot {
            year: Some(2024),
            ..EntitySnapshot::default()
        };
        assert_eq!(
            orchestrator.apply(FetchOutcome::Snapshot(old, Ok(late))),
            Completion::Stale
        );
        assert!(orchestrator.snapshot().is_pending());

        let fresh = EntitySnapshot {
            year: Some(2023),
            ..EntitySnapshot::default()
        };
        assert_eq!(
            orchestrator.apply(FetchOutcome::Snapshot(new, Ok(fresh))),
            Completion::Applied
        );
        let shown = orchestrator.snapshot();
        assert_eq!(shown.ready().and_then(|s| s.year), Some(2023));
    }

    #[test]
    fn refetch_after_failure() {
        let mut orchestrator = Orchestrator::new();
        let jobs = orchestrator.sync(&keys(2024));
        let FetchJob::Shapes(ticket) = jobs[3].clone() else {
            panic!("expected shapes job");
        };
        orchestrator.apply(FetchOutcome::Shapes(
            ticket,
            Err(FetchError("connection refused".to_string())),
        ));
        assert!(orchestrator.shapes().error().is_some());
        assert!(orchestrator.sync(&keys(2024)).is_empty());

        let retry = orchestrator.refetch(QueryKind::Shapes);
        assert_eq!(retry.map(|j| j.kind()), Some(QueryKind::Shapes));
        assert!(orchestrator.refetch(QueryKind::Forecast).is_none());
    }
}
