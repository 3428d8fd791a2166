//! Status aggregation: roll a snapshot of child statuses into a count
//! table, one overall status, and a completion percentage.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::CoreError;
use crate::status::{Status, StatusSet};
use crate::task::ChildStatus;

/// Count table over the configured status set.
///
/// Every member of the set has an entry, so statuses with zero occurrences
/// still show up in reports. The sum of all counts equals the number of
/// observations tallied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    counts: BTreeMap<Status, u64>,
}

impl StatusCounts {
    /// Count for one status (0 if the status has no entry).
    pub fn get(&self, status: Status) -> u64 {
        self.counts.get(&status).copied().unwrap_or(0)
    }

    /// Total number of observations tallied.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate entries in status order.
    pub fn iter(&self) -> impl Iterator<Item = (Status, u64)> + '_ {
        self.counts.iter().map(|(status, count)| (*status, *count))
    }

    /// The table keyed by status description, for display and reports.
    pub fn by_description(&self) -> BTreeMap<&'static str, u64> {
        self.counts
            .iter()
            .map(|(status, count)| (status.description(), *count))
            .collect()
    }
}

/// Aggregate status derived from a task's children.
///
/// Computed fresh on every call and never persisted on the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverallStatus {
    /// The task has no observed children yet.
    ///
    /// Children are appended over time, so this is an expected transient
    /// state a waiter polls through, not an error and not a real [`Status`].
    NoChildren,

    /// Status the children aggregate to.
    Aggregated(Status),
}

impl OverallStatus {
    /// True when the aggregate is a terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OverallStatus::Aggregated(status) if status.is_terminal())
    }

    /// The aggregate as a plain status, if there were any children.
    pub fn as_status(&self) -> Option<Status> {
        match self {
            OverallStatus::NoChildren => None,
            OverallStatus::Aggregated(status) => Some(*status),
        }
    }

    /// The aggregate as a plain status, failing with
    /// [`CoreError::EmptyChildSet`] when the task has no children.
    pub fn require_status(&self) -> Result<Status, CoreError> {
        self.as_status().ok_or(CoreError::EmptyChildSet)
    }
}

/// Rolls many child statuses into one parent view.
///
/// Holds the status set it tallies over as explicit configuration; use
/// [`Aggregator::default`] for the standard set.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    set: StatusSet,
}

impl Aggregator {
    /// Create an aggregator over the given status set.
    pub fn new(set: StatusSet) -> Self {
        Self { set }
    }

    /// The configured status set.
    pub fn status_set(&self) -> &StatusSet {
        &self.set
    }

    /// Build the count table for a snapshot of child observations.
    ///
    /// Every set member gets an entry (possibly 0); observations are
    /// tallied on top. The sum of counts always equals the snapshot length.
    pub fn counts(&self, children: &[ChildStatus]) -> StatusCounts {
        let mut counts: BTreeMap<Status, u64> = self.set.iter().map(|s| (s, 0)).collect();
        for child in children {
            *counts.entry(child.status).or_insert(0) += 1;
        }
        StatusCounts { counts }
    }

    /// Derive the overall status for a snapshot of child observations.
    ///
    /// Unanimous children yield their shared status. Otherwise any failed
    /// child dominates partial progress and the aggregate is
    /// [`Status::Error`]; every other mix collapses to [`Status::Waiting`].
    pub fn overall(&self, children: &[ChildStatus]) -> OverallStatus {
        if children.is_empty() {
            return OverallStatus::NoChildren;
        }

        let counts = self.counts(children);
        let total = children.len() as u64;

        for (status, count) in counts.iter() {
            if count == total {
                return OverallStatus::Aggregated(status);
            }
        }

        if counts.get(Status::Error) > 0 {
            OverallStatus::Aggregated(Status::Error)
        } else {
            OverallStatus::Aggregated(Status::Waiting)
        }
    }

    /// Completion percentage: completed children over all children, in
    /// `[0, 100]`.
    ///
    /// The denominator is always the child count, never the number of
    /// distinct status kinds, so the figure stays meaningful when children
    /// disagree. Fails with [`CoreError::DivisionUndefined`] when there are
    /// no children, since 0 would be indistinguishable from "nothing
    /// finished yet".
    pub fn percent_done(&self, children: &[ChildStatus]) -> Result<f64, CoreError> {
        if children.is_empty() {
            return Err(CoreError::DivisionUndefined);
        }
        let completed = self.counts(children).get(Status::Completed);
        Ok(completed as f64 * 100.0 / children.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::JobId;

    fn observed(statuses: &[Status]) -> Vec<ChildStatus> {
        statuses
            .iter()
            .map(|s| ChildStatus::new(JobId::generate(), *s))
            .collect()
    }

    #[test]
    fn test_counts_cover_whole_set() {
        let agg = Aggregator::default();
        let counts = agg.counts(&observed(&[Status::Running, Status::Running]));

        assert_eq!(counts.len(), Status::ALL.len());
        assert_eq!(counts.get(Status::Running), 2);
        assert_eq!(counts.get(Status::Completed), 0);
        assert_eq!(counts.total(), 2);
    }

    #[test]
    fn test_counts_sum_matches_observations() {
        let agg = Aggregator::default();
        let snapshot = observed(&[
            Status::Hold,
            Status::Waiting,
            Status::Waiting,
            Status::Completed,
            Status::Error,
        ]);
        assert_eq!(agg.counts(&snapshot).total(), snapshot.len() as u64);
    }

    #[test]
    fn test_counts_empty_snapshot_is_all_zero() {
        let agg = Aggregator::default();
        let counts = agg.counts(&[]);
        assert_eq!(counts.len(), Status::ALL.len());
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn test_counts_by_description() {
        let agg = Aggregator::default();
        let counts = agg.counts(&observed(&[Status::Completed]));
        let table = counts.by_description();
        assert_eq!(table.get(Status::Completed.description()), Some(&1));
        assert_eq!(table.len(), Status::ALL.len());
    }

    #[test]
    fn test_overall_unanimous_returns_shared_status() {
        let agg = Aggregator::default();
        for status in Status::ALL {
            let snapshot = observed(&[status, status, status]);
            assert_eq!(agg.overall(&snapshot), OverallStatus::Aggregated(status));
        }
    }

    #[test]
    fn test_overall_all_completed() {
        // Scenario: [COMPLETED, COMPLETED, COMPLETED]
        let agg = Aggregator::default();
        let snapshot = observed(&[Status::Completed, Status::Completed, Status::Completed]);
        let overall = agg.overall(&snapshot);
        assert_eq!(overall, OverallStatus::Aggregated(Status::Completed));
        assert!(overall.is_terminal());
        assert_eq!(agg.percent_done(&snapshot).unwrap(), 100.0);
    }

    #[test]
    fn test_overall_error_dominates_mixed() {
        // Scenario: [COMPLETED, ERROR, WAITING]
        let agg = Aggregator::default();
        let snapshot = observed(&[Status::Completed, Status::Error, Status::Waiting]);
        assert_eq!(
            agg.overall(&snapshot),
            OverallStatus::Aggregated(Status::Error)
        );
    }

    #[test]
    fn test_overall_mixed_error_free_collapses_to_waiting() {
        // Scenario: [RUNNING, COMPLETED] has no terminal convergence path yet.
        let agg = Aggregator::default();
        let snapshot = observed(&[Status::Running, Status::Completed]);
        let overall = agg.overall(&snapshot);
        assert_eq!(overall, OverallStatus::Aggregated(Status::Waiting));
        assert!(!overall.is_terminal());
    }

    #[test]
    fn test_overall_unanimous_running_stays_running() {
        // Scenario: [RUNNING, RUNNING] converges on RUNNING, still not terminal.
        let agg = Aggregator::default();
        let overall = agg.overall(&observed(&[Status::Running, Status::Running]));
        assert_eq!(overall, OverallStatus::Aggregated(Status::Running));
        assert!(!overall.is_terminal());
    }

    #[test]
    fn test_overall_empty_is_no_children_every_time() {
        let agg = Aggregator::default();
        assert_eq!(agg.overall(&[]), OverallStatus::NoChildren);
        assert_eq!(agg.overall(&[]), OverallStatus::NoChildren);
        assert!(!agg.overall(&[]).is_terminal());
    }

    #[test]
    fn test_require_status_on_empty_fails() {
        let agg = Aggregator::default();
        let err = agg.overall(&[]).require_status().unwrap_err();
        assert!(matches!(err, CoreError::EmptyChildSet));
    }

    #[test]
    fn test_percent_done_uses_child_count_denominator() {
        let agg = Aggregator::default();
        // 1 of 4 children completed: 25%, regardless of how many status
        // kinds appear in the snapshot.
        let snapshot = observed(&[
            Status::Completed,
            Status::Running,
            Status::Waiting,
            Status::Error,
        ]);
        assert_eq!(agg.percent_done(&snapshot).unwrap(), 25.0);
    }

    #[test]
    fn test_percent_done_empty_is_undefined() {
        let agg = Aggregator::default();
        let err = agg.percent_done(&[]).unwrap_err();
        assert!(matches!(err, CoreError::DivisionUndefined));
    }

    #[test]
    fn test_narrow_status_set_still_tallies() {
        let agg = Aggregator::new(StatusSet::new([Status::Waiting, Status::Completed]));
        let counts = agg.counts(&observed(&[Status::Waiting, Status::Completed]));
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.total(), 2);
    }
}
