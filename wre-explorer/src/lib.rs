//! Selection engine for the water resources dataset explorer.
//!
//! A user event flows through four stages:
//!
//! 1. [`selection::reduce`] applies it to the [`SelectionState`] and restores
//!    every invariant (year in range, category valid, entity reset).
//! 2. [`keys::resolve`] derives one key per downstream query, or `None` when
//!    the query is not eligible.
//! 3. The [`Orchestrator`] syncs its per-query caches to those keys and
//!    returns the [`FetchJob`]s that must be issued.
//! 4. Completed jobs come back as [`FetchOutcome`]s; stale ones are dropped.
//!
//! [`Explorer`] runs the whole cycle. Nothing here performs I/O: callers run
//! jobs against a [`Backend`], which the `api` feature implements for the
//! HTTP client.

#[cfg(feature = "api")]
mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod explorer;
pub mod keys;
pub mod orchestrator;
pub mod selection;
pub mod view;

pub use cache::{Completion, QueryState};
pub use config::ExplorerConfig;
pub use error::{ExplorerIssue, FetchError};
pub use explorer::Explorer;
pub use keys::{QueryKeys, QueryKind};
pub use orchestrator::{Backend, FetchJob, FetchOutcome, Orchestrator};
pub use selection::{Section, SelectionEvent, SelectionState};
pub use view::{ExplorerView, ForecastView, IndicatorOption, MapView, Panel};
