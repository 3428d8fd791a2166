//! The closed status model shared by tasks and their child jobs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Status of a task or child job.
///
/// The set of valid statuses is closed and known at startup. Raw labels from
/// outside this enumeration are rejected at the boundary
/// ([`Status::from_name`]); an unrecognized label is never coerced into a
/// valid state. Identity is the wire name; the description is display-only.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Created but not yet released for execution.
    #[default]
    Hold,
    /// Waiting to run, or a mixed set of children still converging.
    Waiting,
    /// Actively executing.
    Running,
    /// Finished successfully.
    Completed,
    /// Finished with a failure.
    Error,
}

impl Status {
    /// All valid statuses, in lifecycle order.
    pub const ALL: [Status; 5] = [
        Status::Hold,
        Status::Waiting,
        Status::Running,
        Status::Completed,
        Status::Error,
    ];

    /// Unique wire name of this status.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hold => "HOLD",
            Self::Waiting => "WAITING",
            Self::Running => "RUNNING",
            Self::Completed => "COMPLETED",
            Self::Error => "ERROR",
        }
    }

    /// Human-readable description, used as the key when count tables are
    /// rendered for display.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Hold => "On hold",
            Self::Waiting => "Waiting to run",
            Self::Running => "Running",
            Self::Completed => "Completed",
            Self::Error => "Failed with an error",
        }
    }

    /// Returns true if no further transition is expected from this status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Error)
    }

    /// Look up a status by its wire name.
    ///
    /// Fails with [`CoreError::UnknownStatus`] for any name outside the
    /// closed set.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "HOLD" => Ok(Self::Hold),
            "WAITING" => Ok(Self::Waiting),
            "RUNNING" => Ok(Self::Running),
            "COMPLETED" => Ok(Self::Completed),
            "ERROR" => Ok(Self::Error),
            other => Err(CoreError::UnknownStatus(other.to_string())),
        }
    }

    /// Validate a persisted status record against the closed set.
    pub fn from_raw(raw: &RawStatus) -> Result<Self, CoreError> {
        Self::from_name(&raw.name)
    }

    /// The persisted document form of this status.
    pub fn to_raw(&self) -> RawStatus {
        RawStatus {
            name: self.name().to_string(),
            description: self.description().to_string(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Status {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Persisted representation of a status: name plus display description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStatus {
    /// Unique status name.
    pub name: String,
    /// Display description stored alongside the name.
    pub description: String,
}

/// Ordered, closed collection of valid statuses.
///
/// Injected into the aggregator as configuration rather than read from a
/// process-wide global, so tests can run against a narrower set. Count
/// tables are zero-initialized from it, keeping zero-occurrence statuses
/// visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSet {
    members: Vec<Status>,
}

impl StatusSet {
    /// The standard set: every member of [`Status::ALL`], in order.
    pub fn standard() -> Self {
        Self {
            members: Status::ALL.to_vec(),
        }
    }

    /// Build a set from explicit members. Order is preserved, duplicates
    /// are dropped.
    pub fn new(members: impl IntoIterator<Item = Status>) -> Self {
        let mut deduped = Vec::new();
        for status in members {
            if !deduped.contains(&status) {
                deduped.push(status);
            }
        }
        Self { members: deduped }
    }

    /// Number of statuses in the set.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if the set has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns true if the set contains the given status.
    pub fn contains(&self, status: Status) -> bool {
        self.members.contains(&status)
    }

    /// Iterate members in set order.
    pub fn iter(&self) -> impl Iterator<Item = Status> + '_ {
        self.members.iter().copied()
    }
}

impl Default for StatusSet {
    fn default() -> Self {
        Self::standard()
    }
}
