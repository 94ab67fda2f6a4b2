use serde::{Deserialize, Serialize};

use crate::{BenchmarkId, JobOutcome};

/// The resolved, validated, deduplicated benchmark identifiers for one run.
///
/// Never empty: a resolution yielding zero items is a validation failure
/// upstream, not a valid empty list. Immutable once built; both the
/// provisioning and execution stages consume it in this order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobList {
    items: Vec<BenchmarkId>,
}

impl JobList {
    /// Wraps an already deduplicated, trimmed id sequence.
    ///
    /// Returns `None` for an empty sequence so the invariant cannot be
    /// bypassed by construction.
    pub fn new(items: Vec<BenchmarkId>) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Self { items })
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BenchmarkId> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[BenchmarkId] {
        &self.items
    }
}

impl<'a> IntoIterator for &'a JobList {
    type Item = &'a BenchmarkId;
    type IntoIter = std::slice::Iter<'a, BenchmarkId>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Per-job entry in the final run report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: BenchmarkId,
    pub outcome: JobOutcome,
    /// Opaque detail: harness exit text, endpoint message or an output
    /// reference. The controller never interprets it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_list_rejects_empty() {
        assert!(JobList::new(Vec::new()).is_none());
    }

    #[test]
    fn job_list_preserves_order() {
        let list = JobList::new(vec!["b".to_string(), "a".to_string()]).unwrap();
        let ids: Vec<&str> = list.iter().map(String::as_str).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn record_skips_absent_detail() {
        let record = JobRecord {
            id: "memory_bound".to_string(),
            outcome: JobOutcome::Succeeded,
            detail: None,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("detail"));
        assert!(json.contains(r#""outcome":"succeeded""#));
    }

    #[test]
    fn record_serde_roundtrip() {
        let record = JobRecord {
            id: "synthetic_2c".to_string(),
            outcome: JobOutcome::Failed,
            detail: Some("harness exited with code 2".to_string()),
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: JobRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, record.id);
        assert_eq!(back.outcome, record.outcome);
        assert_eq!(back.detail, record.detail);
    }
}
