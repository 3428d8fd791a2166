//! GridTrack wait controller.
//!
//! Polls an external [`StatusSource`] until a task's aggregate status turns
//! terminal or a timeout elapses. Poll-based by construction; there is no
//! push notification of status changes.

pub mod config;
pub mod source;
pub mod waiter;

pub use config::WaitConfig;
pub use source::StatusSource;
pub use waiter::Waiter;
