//! Session domain model.
//!
//! This module contains the Session aggregate: everything the tool knows about
//! the meeting in progress.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cost;
use crate::participant::Participant;
use crate::topic::{Topic, TopicStatus};

/// The meeting in progress.
///
/// A session contains:
/// - The participants, whose salaries set the burn rate
/// - The agenda, in order, with per-topic cost and duration
/// - The currently active topic, if any
/// - The running total of the meeting cost
/// - Whether the meeting has ended
/// - The instant of the last accrual tick
///
/// This is the "pure" domain model that business logic operates on,
/// independent of any specific storage format or version. All changes go
/// through `Session::apply`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Session {
    /// Participants in insertion order
    pub participants: Vec<Participant>,
    /// Agenda order
    pub topics: Vec<Topic>,
    /// The single topic currently accruing cost
    pub active_topic_id: Option<String>,
    /// Always equal to the sum of the topics' accumulated cost
    pub total_meeting_cost: f64,
    pub is_meeting_ended: bool,
    /// Instant of the last accrual; `None` means the next tick charges nothing
    pub last_tick: Option<DateTime<Utc>>,
}

impl Session {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn burn_rate_per_second(&self) -> f64 {
        cost::burn_rate_per_second(&self.participants)
    }

    pub fn burn_rate_per_minute(&self) -> f64 {
        cost::burn_rate_per_minute(&self.participants)
    }

    pub fn topic(&self, topic_id: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == topic_id)
    }

    pub(crate) fn topic_index(&self, topic_id: &str) -> Option<usize> {
        self.topics.iter().position(|t| t.id == topic_id)
    }

    pub fn active_topic(&self) -> Option<&Topic> {
        self.active_topic_id
            .as_deref()
            .and_then(|id| self.topic(id))
    }

    /// Whether the periodic tick has anything to do.
    pub fn is_accruing(&self) -> bool {
        self.active_topic_id.is_some() && !self.is_meeting_ended
    }

    pub fn has_participants(&self) -> bool {
        !self.participants.is_empty()
    }

    /// Sum of every topic's duration, including topics that are not completed.
    pub fn total_duration_seconds(&self) -> f64 {
        self.topics.iter().map(|t| t.duration_seconds).sum()
    }

    pub fn completed_topic_count(&self) -> usize {
        self.topics.iter().filter(|t| t.is_completed()).count()
    }

    /// Sum of the per-topic costs. Equal to `total_meeting_cost` up to float
    /// rounding.
    pub fn itemized_cost(&self) -> f64 {
        self.topics.iter().map(|t| t.accumulated_cost).sum()
    }

    /// Prepares a session read back from storage.
    ///
    /// The tick instant is dropped so the time the tool was closed is never
    /// charged, and a dangling or contradictory active pointer is cleared: a
    /// topic is `active` only while `active_topic_id` names it.
    pub fn restored(mut self) -> Self {
        self.last_tick = None;

        let pointer_is_valid = !self.is_meeting_ended
            && self
                .active_topic_id
                .as_deref()
                .and_then(|id| self.topic(id))
                .is_some_and(|t| !t.is_completed());
        if !pointer_is_valid {
            self.active_topic_id = None;
        }

        let active_id = self.active_topic_id.clone();
        for topic in &mut self.topics {
            let referenced = active_id.as_deref() == Some(topic.id.as_str());
            if referenced {
                topic.status = TopicStatus::Active;
            } else if topic.is_active() {
                topic.status = TopicStatus::Paused;
            }
        }

        self
    }
}
