//! Topic domain model.
//!
//! A topic is one agenda item. It carries its own share of the meeting cost and
//! the time spent on it.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Lifecycle status of a topic.
///
/// `Completed` is terminal: no action moves a topic out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicStatus {
    /// On the agenda, never started.
    Pending,
    /// Currently accruing cost.
    Active,
    /// Started at least once, not accruing.
    Paused,
    /// Closed by the user.
    Completed,
}

impl TopicStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TopicStatus::Pending => "pending",
            TopicStatus::Active => "active",
            TopicStatus::Paused => "paused",
            TopicStatus::Completed => "completed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TopicStatus::Completed)
    }
}

impl fmt::Display for TopicStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    /// Unique topic identifier (UUID format)
    pub id: String,
    pub title: String,
    pub status: TopicStatus,
    /// Cost charged to this topic so far
    pub accumulated_cost: f64,
    /// Seconds spent on this topic so far (fractional)
    pub duration_seconds: f64,
}

impl Topic {
    /// Creates a pending topic with nothing accrued.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            status: TopicStatus::Pending,
            accumulated_cost: 0.0,
            duration_seconds: 0.0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == TopicStatus::Active
    }

    pub fn is_completed(&self) -> bool {
        self.status.is_terminal()
    }

    /// Whether the topic ever ran. Only these appear on the final summary.
    pub fn has_run(&self) -> bool {
        self.duration_seconds > 0.0
    }
}
