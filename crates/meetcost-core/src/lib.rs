//! Domain layer for meetcost.
//!
//! Participants, topics and the session aggregate, the cost model, the pure
//! transitions that drive a meeting, and the read-side views built from it.
//! Nothing in this crate performs I/O or reads the clock on its own.

pub mod clock;
pub mod config;
pub mod cost;
pub mod error;
pub mod participant;
pub mod session;
pub mod summary;
pub mod topic;

// Re-export common error type
pub use error::MeetcostError;
