//! The explorer: selection, keys and fetches kept consistent per event.
//!
//! Every mutator runs one event through [`reduce`], re-derives the query
//! keys and syncs the caches, then returns the requests that must be issued.
//! Completions come back through [`Explorer::apply`], which may unlock more
//! requests (metadata gates every other key).

use crate::cache::{Completion, QueryState};
use crate::config::ExplorerConfig;
use crate::keys::{self, QueryKeys, QueryKind};
use crate::orchestrator::{Backend, FetchJob, FetchOutcome, Orchestrator};
use crate::selection::{reduce, Section, SelectionEvent, SelectionState};
use std::collections::VecDeque;
use std::rc::Rc;
use wre_api::{Dataset, DatasetInfo};

#[derive(Debug)]
pub struct Explorer {
    config: ExplorerConfig,
    state: SelectionState,
    keys: QueryKeys,
    orchestrator: Orchestrator,
}

impl Explorer {
    pub fn new(config: ExplorerConfig) -> Self {
        Self {
            state: SelectionState::new(&config),
            config,
            keys: QueryKeys::default(),
            orchestrator: Orchestrator::new(),
        }
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn keys(&self) -> &QueryKeys {
        &self.keys
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    /// Metadata of the selected dataset, once it has arrived.
    pub fn metadata(&self) -> Option<Rc<DatasetInfo>> {
        self.orchestrator.metadata().ready().cloned()
    }

    pub fn metadata_state(&self) -> QueryState<DatasetInfo> {
        self.orchestrator.metadata()
    }

    pub fn select_dataset(&mut self, dataset: Dataset) -> Vec<FetchJob> {
        self.dispatch(SelectionEvent::SelectDataset(dataset))
    }

    pub fn set_year(&mut self, year: i32) -> Vec<FetchJob> {
        self.dispatch(SelectionEvent::SetYear(year))
    }

    pub fn set_category(&mut self, category: impl Into<String>) -> Vec<FetchJob> {
        self.dispatch(SelectionEvent::SetCategory(category.into()))
    }

    pub fn set_entity(&mut self, entity: impl Into<String>) -> Vec<FetchJob> {
        self.dispatch(SelectionEvent::SetEntity(entity.into()))
    }

    pub fn set_indicator(&mut self, indicator: impl Into<String>) -> Vec<FetchJob> {
        self.dispatch(SelectionEvent::SetIndicator(indicator.into()))
    }

    pub fn set_horizon(&mut self, years: u32) -> Vec<FetchJob> {
        self.dispatch(SelectionEvent::SetHorizon(years))
    }

    pub fn set_section(&mut self, section: Section) -> Vec<FetchJob> {
        self.dispatch(SelectionEvent::SetSection(section))
    }

    pub fn dispatch(&mut self, event: SelectionEvent) -> Vec<FetchJob> {
        log::debug!("Selection event: {:?}", event);
        let metadata = self.metadata();
        self.state = reduce(&self.state, event, metadata.as_deref(), &self.config);
        self.refresh()
    }

    /// Hand a finished request back. Stale outcomes change nothing.
    pub fn apply(&mut self, outcome: FetchOutcome) -> Vec<FetchJob> {
        let kind = outcome.kind();
        match self.orchestrator.apply(outcome) {
            Completion::Applied => {
                log::debug!("Applied {} response", kind);
                self.refresh()
            }
            Completion::Stale => Vec::new(),
        }
    }

    /// Explicit retry of one query for its current key.
    pub fn refetch(&mut self, kind: QueryKind) -> Vec<FetchJob> {
        self.orchestrator.refetch(kind).into_iter().collect()
    }

    /// Run `jobs` and everything they unlock until nothing is left in
    /// flight. Requests run one after another.
    pub async fn settle<B: Backend>(&mut self, backend: &B, jobs: Vec<FetchJob>) {
        let mut queue: VecDeque<FetchJob> = jobs.into();
        while let Some(job) = queue.pop_front() {
            let outcome = job.run(backend).await;
            queue.extend(self.apply(outcome));
        }
    }

    fn refresh(&mut self) -> Vec<FetchJob> {
        let mut jobs: Vec<FetchJob> = self
            .orchestrator
            .sync_metadata(keys::metadata_key(&self.state))
            .into_iter()
            .collect();

        let metadata = self.metadata();
        if let Some(info) = metadata.as_deref() {
            self.state = reduce(
                &self.state,
                SelectionEvent::MetadataArrived,
                Some(info),
                &self.config,
            );
        }

        self.keys = keys::resolve(&self.state, metadata.as_deref(), &self.config);
        jobs.extend(self.orchestrator.sync(&self.keys));
        jobs
    }
}
