//! Participant domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cost;

/// Someone sitting in the meeting, priced by their annual salary.
///
/// Participants are immutable: the rate is derived once at creation and never
/// recomputed, so the burn rate of a session only changes when the participant
/// list is replaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    /// Unique participant identifier (UUID format)
    pub id: String,
    pub name: String,
    /// Job title, display only
    pub title: String,
    /// Annual salary, strictly positive
    pub annual_salary: f64,
    /// Cost per second derived from `annual_salary`
    pub rate_per_second: f64,
}

impl Participant {
    /// Creates a participant with a fresh id and a derived rate.
    pub fn new(name: impl Into<String>, title: impl Into<String>, annual_salary: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            title: title.into(),
            annual_salary,
            rate_per_second: cost::rate_per_second(annual_salary),
        }
    }
}
