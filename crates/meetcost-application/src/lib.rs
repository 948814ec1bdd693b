//! Application layer for meetcost.
//!
//! This crate drives a meeting over time: it owns the live session, persists
//! it after every change and runs the periodic accrual tick, coordinating the
//! domain and infrastructure layers.

pub mod meeting;
pub mod setup_usecase;

pub use meeting::MeetingController;
pub use setup_usecase::{ImportSummary, SetupUseCase};
