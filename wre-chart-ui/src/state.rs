//! Application state managed via Dioxus context.
//!
//! `AppState` bundles the reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with
//! `use_context::<AppState>()` and change the selection through
//! [`AppState::dispatch`], which also issues whatever requests the change
//! makes necessary.

use dioxus::core::spawn_forever;
use dioxus::prelude::*;
use wre_api::{ApiClient, Dataset};
use wre_explorer::{Explorer, ExplorerConfig, FetchJob, QueryKind};

/// Shared application state for the explorer app.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Selection, query keys and cached results
    pub explorer: Signal<Explorer>,
    /// Backend client (None if the base URL was rejected)
    pub client: Signal<Option<ApiClient>>,
    /// Datasets offered by the backend
    pub datasets: Signal<Vec<Dataset>>,
    /// Whether the dataset list is still loading
    pub loading: Signal<bool>,
    /// Error message if the dataset list could not be loaded
    pub error_msg: Signal<Option<String>>,
}

impl AppState {
    /// Create a new AppState for `config`.
    pub fn new(config: ExplorerConfig) -> Self {
        let (client, error) = match ApiClient::new(&config.api_url) {
            Ok(client) => (Some(client), None),
            Err(e) => (None, Some(format!("{e:#}"))),
        };
        Self {
            explorer: Signal::new(Explorer::new(config)),
            client: Signal::new(client),
            datasets: Signal::new(Vec::new()),
            loading: Signal::new(error.is_none()),
            error_msg: Signal::new(error),
        }
    }

    /// Apply one selection change and issue the requests it unlocks.
    pub fn dispatch(mut self, update: impl FnOnce(&mut Explorer) -> Vec<FetchJob>) {
        let jobs = update(&mut self.explorer.write());
        self.schedule(jobs);
    }

    /// Retry one query for the current selection.
    pub fn refetch(self, kind: QueryKind) {
        self.dispatch(|explorer| explorer.refetch(kind));
    }

    /// Run each job on its own root-scoped task; completions feed back into
    /// the explorer and may schedule follow-up jobs.
    /// Jobs must outlive the component whose handler scheduled them.
    pub fn schedule(self, jobs: Vec<FetchJob>) {
        if jobs.is_empty() {
            return;
        }
        let Some(client) = self.client.read().clone() else {
            log::warn!("No backend client; dropping {} request(s)", jobs.len());
            return;
        };
        for job in jobs {
            let mut state = self;
            let client = client.clone();
            spawn_forever(async move {
                let outcome = job.run(&client).await;
                let follow_up = state.explorer.write().apply(outcome);
                state.schedule(follow_up);
            });
        }
    }

    /// Fetch the dataset list and select the first dataset.
    pub fn load_datasets(mut self) {
        let Some(client) = self.client.read().clone() else {
            return;
        };
        spawn(async move {
            match client.get_datasets().await {
                Ok(list) => {
                    let first = list.datasets.first().cloned();
                    self.datasets.set(list.datasets);
                    self.loading.set(false);
                    if let Some(dataset) = first {
                        self.dispatch(|explorer| explorer.select_dataset(dataset));
                    }
                }
                Err(e) => {
                    log::error!("Failed to load datasets: {:#}", e);
                    self.error_msg
                        .set(Some(format!("Failed to load datasets: {e:#}")));
                    self.loading.set(false);
                }
            }
        });
    }
}
