//! Outcome of fetching the records changed in a time window.

use serde::{Deserialize, Serialize};
use simpleforce_client::Result;

use crate::sobject::SObject;

/// Body of `sobjects/{type}/updated/`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdatedRecords {
    /// Ids of records created or updated in the window.
    pub ids: Vec<String>,
    /// The last time covered by the answer.
    #[serde(rename = "latestDateCovered", default)]
    pub latest_date_covered: Option<String>,
}

/// Result of fetching one id.
#[derive(Debug)]
pub struct FetchOutcome {
    /// Position of the id in the server's list.
    pub index: usize,
    /// The record id.
    pub id: String,
    /// The fetched record, or why it could not be fetched.
    pub result: Result<SObject>,
}

/// Per-id outcomes of [`crate::ForceClient::fetch_updated`], in the server's order.
///
/// A failed fetch does not fail the batch; pick a policy with
/// [`BatchFetch::into_lenient`] or [`BatchFetch::into_strict`].
#[derive(Debug)]
pub struct BatchFetch {
    latest_date_covered: Option<String>,
    outcomes: Vec<FetchOutcome>,
}

impl BatchFetch {
    pub(crate) fn new(latest_date_covered: Option<String>, mut outcomes: Vec<FetchOutcome>) -> Self {
        outcomes.sort_by_key(|outcome| outcome.index);
        Self {
            latest_date_covered,
            outcomes,
        }
    }

    /// Number of ids the server returned.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Returns true if the window held no changes.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// The `latestDateCovered` value reported by the server.
    pub fn latest_date_covered(&self) -> Option<&str> {
        self.latest_date_covered.as_deref()
    }

    /// Every outcome, ordered by index.
    pub fn outcomes(&self) -> &[FetchOutcome] {
        &self.outcomes
    }

    /// The outcomes whose fetch failed.
    pub fn failures(&self) -> impl Iterator<Item = &FetchOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.result.is_err())
    }

    /// One slot per id; failed fetches leave `None`.
    pub fn into_lenient(self) -> Vec<Option<SObject>> {
        self.outcomes
            .into_iter()
            .map(|outcome| outcome.result.ok())
            .collect()
    }

    /// All records, or the first failure in index order.
    pub fn into_strict(self) -> Result<Vec<SObject>> {
        self.outcomes
            .into_iter()
            .map(|outcome| outcome.result)
            .collect()
    }
}
