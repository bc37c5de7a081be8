//! Error types for the explorer.
//!
//! None of these are fatal: each one degrades a single view section while the
//! others keep working.

use crate::keys::QueryKind;
use std::fmt;

/// A failed backend fetch, as reported to the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError(pub String);

impl FetchError {
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        Self(format!("{err:#}"))
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fetch error: {}", self.0)
    }
}

impl std::error::Error for FetchError {}

impl From<anyhow::Error> for FetchError {
    fn from(err: anyhow::Error) -> Self {
        Self::from_anyhow(&err)
    }
}

/// Why a section shows a placeholder or a warning instead of data.
#[derive(Debug, Clone, PartialEq)]
pub enum ExplorerIssue {
    /// Dataset metadata has not arrived yet.
    MetadataUnavailable,
    /// The query has no key in the current selection; nothing to show.
    QueryIneligible(QueryKind),
    /// The backend request failed; a new selection retries it.
    FetchFailure { kind: QueryKind, error: FetchError },
    /// The backend answered for another year than the one requested.
    YearMismatch { requested: i32, resolved: i32 },
    /// The snapshot arrived but holds no finite values.
    EmptyValues,
}

impl ExplorerIssue {
    /// Issues that block their section rather than annotate it.
    pub fn is_blocking(&self) -> bool {
        !matches!(
            self,
            ExplorerIssue::YearMismatch { .. } | ExplorerIssue::EmptyValues
        )
    }
}

impl fmt::Display for ExplorerIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExplorerIssue::MetadataUnavailable => write!(f, "Dataset metadata is loading"),
            ExplorerIssue::QueryIneligible(kind) => {
                write!(f, "Nothing to show for {kind} with the current selection")
            }
            ExplorerIssue::FetchFailure { kind, error } => {
                write!(f, "Insufficient data for {kind}: {}", error.0)
            }
            ExplorerIssue::YearMismatch {
                requested,
                resolved,
            } => write!(
                f,
                "No data for {requested}. Showing values for {resolved}."
            ),
            ExplorerIssue::EmptyValues => write!(f, "No data to visualize"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_mismatch_names_both_years() {
        let issue = ExplorerIssue::YearMismatch {
            requested: 2024,
            resolved: 2023,
        };
        assert_eq!(issue.to_string(), "No data for 2024. Showing values for 2023.");
        assert!(!issue.is_blocking());
    }

    #[test]
    fn fetch_failure_is_blocking() {
        let issue = ExplorerIssue::FetchFailure {
            kind: QueryKind::Forecast,
            error: FetchError::from(anyhow::anyhow!("400 Bad Request")),
        };
        assert!(issue.is_blocking());
        assert_eq!(issue.to_string(), "Insufficient data for forecast: 400 Bad Request");
    }
}
