//! Core types for the water resources dataset backend.
//!
//! Every struct mirrors one JSON body of the backend contract and derives
//! `Serialize`/`Deserialize`. The HTTP client lives behind the `api` feature
//! so pure consumers (data processing, tests) do not pull in `reqwest`.

pub mod dataset;
pub mod forecast;
pub mod snapshot;
pub mod water;

#[cfg(feature = "api")]
pub mod client;

pub use dataset::{Dataset, DatasetInfo, DatasetList, YearRange};
pub use forecast::{ForecastPoint, ForecastRequest, ForecastResult, HistoricalPoint, TimeSeries};
pub use snapshot::EntitySnapshot;
pub use water::{GeoShapes, ShapeFeature, WaterFeature, WaterFeatures};

#[cfg(feature = "api")]
pub use client::ApiClient;
