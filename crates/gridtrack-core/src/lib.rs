//! GridTrack Core Domain Types
//!
//! This crate contains pure domain types with no dependencies on:
//! - Network/document-store backends
//! - Async runtime specifics
//!
//! A task fans out into many child jobs executed elsewhere; everything here
//! interprets an already-fetched snapshot of those children. The aggregation
//! core never mutates a task or its jobs.

pub mod aggregate;
pub mod error;
pub mod ids;
pub mod job;
pub mod status;
pub mod task;

// Re-export commonly used types
pub use aggregate::{Aggregator, OverallStatus, StatusCounts};
pub use error::CoreError;
pub use ids::{JobId, TaskId};
pub use job::Job;
pub use status::{RawStatus, Status, StatusSet};
pub use task::{ChildStatus, Task};
