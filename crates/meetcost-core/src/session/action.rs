//! Session transitions.
//!
//! Every change to a [`Session`] is expressed as a [`SessionAction`] and applied
//! with [`Session::apply`] (in place) or [`reduce`] (state in, state out).
//!
//! Acting on a topic id that does not exist is a silent no-op
//! ([`Outcome::Ignored`]). Acting against a precondition is a
//! [`TransitionError`]: in particular a topic cannot be started while another
//! one is active. The caller pauses or stops the running topic first.

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::model::Session;
use crate::cost;
use crate::participant::Participant;
use crate::topic::{Topic, TopicStatus};

/// Something that happens to the meeting.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    /// Appends a pending topic to the agenda.
    AddTopic { title: String },
    /// Makes a topic the active one and starts timing it.
    StartTopic { topic_id: String },
    PauseTopic { topic_id: String },
    /// Closes a topic for good.
    StopTopic { topic_id: String },
    /// Charges the time elapsed since the previous tick to the active topic.
    Tick,
    /// Freezes the meeting. The live topic is paused, not completed.
    EndMeeting,
    /// Replaces the participants and appends topics for the given titles.
    Import {
        participants: Vec<Participant>,
        topic_titles: Vec<String>,
    },
    /// Back to an empty session.
    Reset,
}

impl SessionAction {
    pub fn name(&self) -> &'static str {
        match self {
            SessionAction::AddTopic { .. } => "add_topic",
            SessionAction::StartTopic { .. } => "start_topic",
            SessionAction::PauseTopic { .. } => "pause_topic",
            SessionAction::StopTopic { .. } => "stop_topic",
            SessionAction::Tick => "tick",
            SessionAction::EndMeeting => "end_meeting",
            SessionAction::Import { .. } => "import",
            SessionAction::Reset => "reset",
        }
    }
}

/// What an accepted action did.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The session changed.
    Applied,
    /// Nothing to do: unknown topic, repeated action, or nothing active.
    Ignored,
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

/// A topic action whose precondition does not hold.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("topic '{requested}' cannot start while topic '{active}' is active")]
    AnotherTopicActive { requested: String, active: String },

    #[error("topic '{topic_id}' is completed")]
    TopicCompleted { topic_id: String },

    #[error("topic '{topic_id}' is not the active topic")]
    TopicNotActive { topic_id: String },

    #[error("the meeting has ended")]
    MeetingEnded,
}

/// Applies `action` to a copy of `state`.
///
/// On error `state` is untouched and no new state exists.
pub fn reduce(
    state: &Session,
    action: SessionAction,
    now: DateTime<Utc>,
) -> Result<(Session, Outcome), TransitionError> {
    let mut next = state.clone();
    let outcome = next.apply(action, now)?;
    Ok((next, outcome))
}

impl Session {
    /// Applies `action` in place.
    ///
    /// A rejected action leaves the session exactly as it was.
    pub fn apply(
        &mut self,
        action: SessionAction,
        now: DateTime<Utc>,
    ) -> Result<Outcome, TransitionError> {
        match action {
            SessionAction::AddTopic { title } => Ok(self.add_topic(&title)),
            SessionAction::StartTopic { topic_id } => self.start_topic(&topic_id, now),
            SessionAction::PauseTopic { topic_id } => self.pause_topic(&topic_id),
            SessionAction::StopTopic { topic_id } => Ok(self.stop_topic(&topic_id)),
            SessionAction::Tick => Ok(self.tick(now)),
            SessionAction::EndMeeting => Ok(self.end_meeting()),
            SessionAction::Import {
                participants,
                topic_titles,
            } => Ok(self.import(participants, topic_titles)),
            SessionAction::Reset => {
                *self = Session::default();
                Ok(Outcome::Applied)
            }
        }
    }

    fn add_topic(&mut self, title: &str) -> Outcome {
        let title = title.trim();
        if title.is_empty() {
            return Outcome::Ignored;
        }
        self.topics.push(Topic::new(title));
        Outcome::Applied
    }

    fn start_topic(
        &mut self,
        topic_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Outcome, TransitionError> {
        let Some(index) = self.topic_index(topic_id) else {
            return Ok(Outcome::Ignored);
        };
        if self.is_meeting_ended {
            return Err(TransitionError::MeetingEnded);
        }
        if self.topics[index].is_completed() {
            return Err(TransitionError::TopicCompleted {
                topic_id: topic_id.to_string(),
            });
        }
        match self.active_topic_id.as_deref() {
            Some(active) if active == topic_id => return Ok(Outcome::Ignored),
            Some(active) => {
                return Err(TransitionError::AnotherTopicActive {
                    requested: topic_id.to_string(),
                    active: active.to_string(),
                });
            }
            None => {}
        }

        self.topics[index].status = TopicStatus::Active;
        self.active_topic_id = Some(topic_id.to_string());
        self.last_tick = Some(now);
        Ok(Outcome::Applied)
    }

    fn pause_topic(&mut self, topic_id: &str) -> Result<Outcome, TransitionError> {
        let Some(index) = self.topic_index(topic_id) else {
            return Ok(Outcome::Ignored);
        };
        if self.active_topic_id.as_deref() != Some(topic_id) {
            return Err(TransitionError::TopicNotActive {
                topic_id: topic_id.to_string(),
            });
        }

        self.topics[index].status = TopicStatus::Paused;
        self.active_topic_id = None;
        self.last_tick = None;
        Ok(Outcome::Applied)
    }

    fn stop_topic(&mut self, topic_id: &str) -> Outcome {
        let Some(index) = self.topic_index(topic_id) else {
            return Outcome::Ignored;
        };
        if self.topics[index].is_completed() {
            return Outcome::Ignored;
        }

        self.topics[index].status = TopicStatus::Completed;
        if self.active_topic_id.as_deref() == Some(topic_id) {
            self.active_topic_id = None;
            self.last_tick = None;
        }
        Outcome::Applied
    }

    fn tick(&mut self, now: DateTime<Utc>) -> Outcome {
        if self.is_meeting_ended {
            return Outcome::Ignored;
        }
        let Some(active_id) = self.active_topic_id.clone() else {
            return Outcome::Ignored;
        };

        let elapsed = cost::elapsed_seconds(self.last_tick, now);
        let increment = cost::accrue(elapsed, self.burn_rate_per_second());

        let Some(topic) = self.topics.iter_mut().find(|t| t.id == active_id) else {
            return Outcome::Ignored;
        };
        topic.accumulated_cost += increment;
        topic.duration_seconds += elapsed;
        self.total_meeting_cost += increment;
        self.last_tick = Some(now);
        Outcome::Applied
    }

    fn end_meeting(&mut self) -> Outcome {
        if self.is_meeting_ended {
            return Outcome::Ignored;
        }
        if let Some(active_id) = self.active_topic_id.take() {
            if let Some(topic) = self.topics.iter_mut().find(|t| t.id == active_id) {
                topic.status = TopicStatus::Paused;
            }
        }
        self.last_tick = None;
        self.is_meeting_ended = true;
        Outcome::Applied
    }

    fn import(&mut self, participants: Vec<Participant>, topic_titles: Vec<String>) -> Outcome {
        self.participants = participants;
        self.topics.extend(
            topic_titles
                .iter()
                .map(|title| title.trim())
                .filter(|title| !title.is_empty())
                .map(Topic::new),
        );
        Outcome::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::WORKING_SECONDS_PER_YEAR;
    use chrono::Duration;

    fn t0() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn at(seconds: i64) -> DateTime<Utc> {
        t0() + Duration::seconds(seconds)
    }

    /// One participant whose salary yields exactly `rate` per second.
    fn session_with(rate: f64, titles: &[&str]) -> Session {
        let mut session = Session::new();
        let participants = vec![Participant::new("Ugo", "Host", rate * WORKING_SECONDS_PER_YEAR)];
        let titles = titles.iter().map(|t| t.to_string()).collect();
        let _ = session.apply(
            SessionAction::Import {
                participants,
                topic_titles: titles,
            },
            t0(),
        );
        session
    }

    fn id(session: &Session, index: usize) -> String {
        session.topics[index].id.clone()
    }

    fn start(session: &mut Session, index: usize, now: DateTime<Utc>) -> Result<Outcome, TransitionError> {
        let topic_id = id(session, index);
        session.apply(SessionAction::StartTopic { topic_id }, now)
    }

    fn active_count(session: &Session) -> usize {
        session.topics.iter().filter(|t| t.is_active()).count()
    }

    fn assert_conserved(session: &Session) {
        assert!((session.itemized_cost() - session.total_meeting_cost).abs() < 1e-9);
    }

    #[test]
    fn test_end_to_end_scenario() {
        let mut session = session_with(0.05, &["T1"]);
        assert!((session.burn_rate_per_second() - 0.05).abs() < 1e-12);

        start(&mut session, 0, t0()).unwrap();
        session.apply(SessionAction::Tick, at(100)).unwrap();

        let topic = &session.topics[0];
        assert!((topic.accumulated_cost - 5.0).abs() < 1e-9);
        assert!((session.total_meeting_cost - 5.0).abs() < 1e-9);
        assert!((topic.duration_seconds - 100.0).abs() < 1e-9);

        let topic_id = id(&session, 0);
        session
            .apply(SessionAction::PauseTopic { topic_id }, at(100))
            .unwrap();
        let outcome = session.apply(SessionAction::Tick, at(150)).unwrap();
        assert_eq!(outcome, Outcome::Ignored);
        assert!((session.total_meeting_cost - 5.0).abs() < 1e-9);
        assert!((session.topics[0].duration_seconds - 100.0).abs() < 1e-9);

        session.apply(SessionAction::EndMeeting, at(150)).unwrap();
        assert!(session.active_topic_id.is_none());
        assert!(session.is_meeting_ended);
    }

    #[test]
    fn test_second_start_is_rejected() {
        let mut session = session_with(0.05, &["A", "B"]);
        start(&mut session, 0, t0()).unwrap();

        let before = session.clone();
        let err = start(&mut session, 1, at(5)).unwrap_err();
        assert_eq!(
            err,
            TransitionError::AnotherTopicActive {
                requested: id(&session, 1),
                active: id(&session, 0),
            }
        );
        assert_eq!(session, before);
        assert_eq!(active_count(&session), 1);
        assert_eq!(session.active_topic_id, Some(id(&session, 0)));
    }

    #[test]
    fn test_switching_topics_after_pause() {
        let mut session = session_with(0.05, &["A", "B"]);
        start(&mut session, 0, t0()).unwrap();
        let a = id(&session, 0);
        session
            .apply(SessionAction::PauseTopic { topic_id: a }, at(10))
            .unwrap();
        start(&mut session, 1, at(10)).unwrap();

        assert_eq!(active_count(&session), 1);
        assert_eq!(session.topics[0].status, TopicStatus::Paused);
        assert_eq!(session.active_topic_id, Some(id(&session, 1)));
    }

    #[test]
    fn test_restarting_active_topic_keeps_tick_instant() {
        let mut session = session_with(0.05, &["A"]);
        start(&mut session, 0, t0()).unwrap();
        assert_eq!(start(&mut session, 0, at(30)).unwrap(), Outcome::Ignored);
        assert_eq!(session.last_tick, Some(t0()));
    }

    #[test]
    fn test_start_sets_tick_instant() {
        let mut session = session_with(0.05, &["A"]);
        start(&mut session, 0, at(7)).unwrap();
        assert_eq!(session.last_tick, Some(at(7)));
        assert_eq!(session.topics[0].status, TopicStatus::Active);
    }

    #[test]
    fn test_start_completed_topic_is_rejected() {
        let mut session = session_with(0.05, &["A"]);
        let topic_id = id(&session, 0);
        session
            .apply(SessionAction::StopTopic { topic_id: topic_id.clone() }, t0())
            .unwrap();
        let err = start(&mut session, 0, t0()).unwrap_err();
        assert_eq!(err, TransitionError::TopicCompleted { topic_id });
    }

    #[test]
    fn test_start_after_end_is_rejected() {
        let mut session = session_with(0.05, &["A"]);
        session.apply(SessionAction::EndMeeting, t0()).unwrap();
        assert_eq!(
            start(&mut session, 0, t0()).unwrap_err(),
            TransitionError::MeetingEnded
        );
    }

    #[test]
    fn test_unknown_topic_is_a_noop() {
        let mut session = session_with(0.05, &["A"]);
        let before = session.clone();
        for action in [
            SessionAction::StartTopic { topic_id: "nope".into() },
            SessionAction::PauseTopic { topic_id: "nope".into() },
            SessionAction::StopTopic { topic_id: "nope".into() },
        ] {
            assert_eq!(session.apply(action, at(1)).unwrap(), Outcome::Ignored);
        }
        assert_eq!(session, before);
    }

    #[test]
    fn test_pause_requires_active_topic() {
        let mut session = session_with(0.05, &["A", "B"]);
        start(&mut session, 0, t0()).unwrap();
        let b = id(&session, 1);
        let err = session
            .apply(SessionAction::PauseTopic { topic_id: b.clone() }, at(1))
            .unwrap_err();
        assert_eq!(err, TransitionError::TopicNotActive { topic_id: b });
        assert!(session.is_accruing());
    }

    #[test]
    fn test_stop_active_topic_clears_pointer() {
        let mut session = session_with(0.05, &["A"]);
        start(&mut session, 0, t0()).unwrap();
        let a = id(&session, 0);
        let outcome = session
            .apply(SessionAction::StopTopic { topic_id: a.clone() }, at(3))
            .unwrap();
        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(session.topics[0].status, TopicStatus::Completed);
        assert!(session.active_topic_id.is_none());
        assert!(session.last_tick.is_none());

        let again = session
            .apply(SessionAction::StopTopic { topic_id: a }, at(4))
            .unwrap();
        assert_eq!(again, Outcome::Ignored);
    }

    #[test]
    fn test_stop_other_topic_keeps_active_pointer() {
        let mut session = session_with(0.05, &["A", "B"]);
        start(&mut session, 0, t0()).unwrap();
        let b = id(&session, 1);
        session
            .apply(SessionAction::StopTopic { topic_id: b }, at(5))
            .unwrap();

        assert_eq!(session.active_topic_id, Some(id(&session, 0)));
        assert_eq!(session.last_tick, Some(t0()));
        assert_eq!(session.topics[1].status, TopicStatus::Completed);

        session.apply(SessionAction::Tick, at(10)).unwrap();
        assert!((session.topics[0].duration_seconds - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_tick_twice_at_same_instant_adds_nothing() {
        let mut session = session_with(0.05, &["A"]);
        start(&mut session, 0, t0()).unwrap();
        session.apply(SessionAction::Tick, at(20)).unwrap();
        let after_first = session.clone();
        session.apply(SessionAction::Tick, at(20)).unwrap();

        assert_eq!(session.total_meeting_cost, after_first.total_meeting_cost);
        assert_eq!(
            session.topics[0].duration_seconds,
            after_first.topics[0].duration_seconds
        );
    }

    #[test]
    fn test_tick_without_previous_instant_charges_nothing() {
        let mut session = session_with(0.05, &["A"]);
        start(&mut session, 0, t0()).unwrap();
        let mut session = session.restored();

        session.apply(SessionAction::Tick, at(3600)).unwrap();
        assert_eq!(session.total_meeting_cost, 0.0);
        assert_eq!(session.last_tick, Some(at(3600)));

        session.apply(SessionAction::Tick, at(3610)).unwrap();
        assert!((session.total_meeting_cost - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_end_meeting_freezes_live_topic() {
        let mut session = session_with(0.05, &["A"]);
        start(&mut session, 0, t0()).unwrap();
        session.apply(SessionAction::Tick, at(10)).unwrap();
        session.apply(SessionAction::EndMeeting, at(10)).unwrap();

        assert_eq!(session.topics[0].status, TopicStatus::Paused);
        assert!(session.active_topic_id.is_none());
        assert!(session.last_tick.is_none());

        assert_eq!(
            session.apply(SessionAction::Tick, at(60)).unwrap(),
            Outcome::Ignored
        );
        assert!((session.total_meeting_cost - 0.5).abs() < 1e-9);
        assert_eq!(
            session.apply(SessionAction::EndMeeting, at(60)).unwrap(),
            Outcome::Ignored
        );
    }

    #[test]
    fn test_import_replaces_participants_and_appends_topics() {
        let mut session = session_with(0.05, &["A"]);
        let newcomers = vec![
            Participant::new("Marie", "Lead", 95_000.0),
            Participant::new("Paul", "Intern", 20_000.0),
        ];
        session
            .apply(
                SessionAction::Import {
                    participants: newcomers,
                    topic_titles: vec!["B".into(), "  ".into(), " C ".into()],
                },
                t0(),
            )
            .unwrap();

        let names: Vec<&str> = session.participants.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Marie", "Paul"]);
        let titles: Vec<&str> = session.topics.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
        assert!(session.topics.iter().all(|t| t.status == TopicStatus::Pending));
    }

    #[test]
    fn test_add_topic() {
        let mut session = Session::new();
        let outcome = session
            .apply(SessionAction::AddTopic { title: " Budget ".into() }, t0())
            .unwrap();
        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(session.topics[0].title, "Budget");
        assert_eq!(
            session
                .apply(SessionAction::AddTopic { title: "   ".into() }, t0())
                .unwrap(),
            Outcome::Ignored
        );
        assert_eq!(session.topics.len(), 1);
    }

    #[test]
    fn test_reset_discards_everything() {
        let mut session = session_with(0.05, &["A"]);
        start(&mut session, 0, t0()).unwrap();
        session.apply(SessionAction::Tick, at(10)).unwrap();
        session.apply(SessionAction::Reset, at(10)).unwrap();
        assert_eq!(session, Session::default());
    }

    #[test]
    fn test_reduce_leaves_input_untouched() {
        let session = session_with(0.05, &["A"]);
        let topic_id = id(&session, 0);
        let (next, outcome) =
            reduce(&session, SessionAction::StartTopic { topic_id }, t0()).unwrap();
        assert_eq!(outcome, Outcome::Applied);
        assert!(session.active_topic_id.is_none());
        assert!(next.active_topic_id.is_some());
    }

    #[test]
    fn test_conservation_over_mixed_sequence() {
        let mut session = session_with(0.037, &["A", "B", "C"]);
        let (a, b, c) = (id(&session, 0), id(&session, 1), id(&session, 2));
        let script = vec![
            (0, SessionAction::StartTopic { topic_id: a.clone() }),
            (13, SessionAction::Tick),
            (14, SessionAction::Tick),
            (20, SessionAction::PauseTopic { topic_id: a.clone() }),
            (25, SessionAction::StartTopic { topic_id: b.clone() }),
            (31, SessionAction::Tick),
            (47, SessionAction::Tick),
            (50, SessionAction::StopTopic { topic_id: b }),
            (55, SessionAction::StartTopic { topic_id: c }),
            (90, SessionAction::Tick),
            (91, SessionAction::StartTopic { topic_id: a }),
            (120, SessionAction::Tick),
            (121, SessionAction::EndMeeting),
            (200, SessionAction::Tick),
        ];

        let mut last_total = 0.0;
        for (second, action) in script {
            let _ = session.apply(action, at(second));
            assert_conserved(&session);
            assert!(session.total_meeting_cost >= last_total);
            assert!(active_count(&session) <= 1);
            last_total = session.total_meeting_cost;
        }
        assert!(session.is_meeting_ended);
        assert!(session.active_topic_id.is_none());
    }
}
