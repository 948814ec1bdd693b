//! Session domain module.
//!
//! This module contains the session aggregate, the actions that change it,
//! and the repository interface used to persist it.
//!
//! # Module Structure
//!
//! - `model`: the `Session` aggregate and its read-side queries
//! - `action`: `SessionAction`, `Session::apply`, `reduce` and `TransitionError`
//! - `screen`: view selection for front ends
//! - `repository`: `SnapshotRepository` trait for the persisted snapshot

mod action;
mod model;
mod repository;
mod screen;

// Re-export public API
pub use action::{Outcome, SessionAction, TransitionError, reduce};
pub use model::Session;
pub use repository::SnapshotRepository;
pub use screen::Screen;
