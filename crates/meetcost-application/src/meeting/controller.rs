//! Meeting controller.
//!
//! Single writer of the live session. Every action goes through
//! [`Session::apply`] under one lock, is persisted when it changed something,
//! and keeps the background ticker running exactly while cost is accruing.

use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use meetcost_core::clock::{Clock, SystemClock};
use meetcost_core::config::MeetcostConfig;
use meetcost_core::error::Result;
use meetcost_core::participant::Participant;
use meetcost_core::session::{Outcome, Screen, Session, SessionAction, SnapshotRepository};
use meetcost_infrastructure::{JsonSnapshotRepository, MeetcostPaths};
use tokio::sync::Mutex;

use super::ticker::Ticker;

/// State shared with the ticker task.
pub(super) struct ControllerState {
    session: Mutex<Session>,
    repository: Arc<dyn SnapshotRepository>,
    clock: Arc<dyn Clock>,
}

impl ControllerState {
    /// Applies one action and persists the result.
    ///
    /// Returns the outcome and whether the session is still accruing. The
    /// session lock is held across the save so a tick never interleaves with
    /// a user action.
    ///
    /// The accruing flag reflects the in-memory session even when persisting
    /// it failed, so the caller can keep the ticker in step either way.
    async fn apply(&self, action: SessionAction) -> (Result<Outcome>, bool) {
        let name = action.name();
        let is_reset = matches!(action, SessionAction::Reset);

        let mut session = self.session.lock().await;
        let result = match session.apply(action, self.clock.now()) {
            Ok(outcome) if outcome.is_applied() => {
                let persisted = if is_reset {
                    self.repository.clear().await
                } else {
                    self.repository.save(&session).await
                };
                persisted.map(|()| outcome)
            }
            Ok(outcome) => Ok(outcome),
            Err(e) => Err(e.into()),
        };

        tracing::debug!(action = name, ?result, total = session.total_meeting_cost, "action");
        (result, session.is_accruing())
    }

    pub(super) async fn tick(&self) -> Result<Outcome> {
        self.apply(SessionAction::Tick).await.0
    }
}

/// Owns the live session and its ticker.
///
/// Must be created inside a Tokio runtime: the ticker is a spawned task.
/// Dropping the controller cancels the ticker.
pub struct MeetingController {
    state: Arc<ControllerState>,
    ticker: StdMutex<Option<Ticker>>,
    tick_interval: Duration,
}

impl MeetingController {
    /// Creates a controller around an existing session without touching storage.
    pub fn new(
        session: Session,
        repository: Arc<dyn SnapshotRepository>,
        clock: Arc<dyn Clock>,
        tick_interval: Duration,
    ) -> Self {
        let accruing = session.is_accruing();
        let controller = Self {
            state: Arc::new(ControllerState {
                session: Mutex::new(session),
                repository,
                clock,
            }),
            ticker: StdMutex::new(None),
            tick_interval,
        };
        controller.sync_ticker(accruing);
        controller
    }

    /// Restores the last snapshot, or starts empty.
    ///
    /// The stored tick instant is dropped so the time the tool was closed is
    /// never charged. Unreadable or incompatible snapshots are logged and
    /// replaced by an empty session on the next save.
    pub async fn open(
        repository: Arc<dyn SnapshotRepository>,
        clock: Arc<dyn Clock>,
        tick_interval: Duration,
    ) -> Self {
        let session = match repository.load().await {
            Ok(Some(session)) => {
                let session = session.restored();
                tracing::info!(
                    participants = session.participants.len(),
                    topics = session.topics.len(),
                    "restored meeting snapshot"
                );
                session
            }
            Ok(None) => Session::new(),
            Err(e) => {
                tracing::warn!("ignoring unreadable meeting snapshot: {}", e);
                Session::new()
            }
        };
        Self::new(session, repository, clock, tick_interval)
    }

    /// Opens the file-backed session described by `config` on the system clock.
    pub async fn from_config(config: &MeetcostConfig) -> Result<Self> {
        let paths = MeetcostPaths::from_config(config);
        let repository = JsonSnapshotRepository::for_key(&paths, &config.snapshot_key)?;
        tracing::debug!(path = %repository.path().display(), "using snapshot file");
        Ok(Self::open(
            Arc::new(repository),
            Arc::new(SystemClock),
            config.tick_interval(),
        )
        .await)
    }

    /// Applies an action, persists it and adjusts the ticker.
    pub async fn dispatch(&self, action: SessionAction) -> Result<Outcome> {
        let (result, accruing) = self.state.apply(action).await;
        self.sync_ticker(accruing);
        result
    }

    pub async fn add_topic(&self, title: impl Into<String>) -> Result<Outcome> {
        self.dispatch(SessionAction::AddTopic {
            title: title.into(),
        })
        .await
    }

    pub async fn start_topic(&self, topic_id: impl Into<String>) -> Result<Outcome> {
        self.dispatch(SessionAction::StartTopic {
            topic_id: topic_id.into(),
        })
        .await
    }

    pub async fn pause_topic(&self, topic_id: impl Into<String>) -> Result<Outcome> {
        self.dispatch(SessionAction::PauseTopic {
            topic_id: topic_id.into(),
        })
        .await
    }

    pub async fn stop_topic(&self, topic_id: impl Into<String>) -> Result<Outcome> {
        self.dispatch(SessionAction::StopTopic {
            topic_id: topic_id.into(),
        })
        .await
    }

    /// Accrues up to now. The ticker calls the same path once per period.
    pub async fn tick(&self) -> Result<Outcome> {
        self.dispatch(SessionAction::Tick).await
    }

    pub async fn end_meeting(&self) -> Result<Outcome> {
        let outcome = self.dispatch(SessionAction::EndMeeting).await?;
        if outcome.is_applied() {
            tracing::info!("meeting ended");
        }
        Ok(outcome)
    }

    /// Replaces the participants and appends the agenda titles.
    pub async fn import(
        &self,
        participants: Vec<Participant>,
        topic_titles: Vec<String>,
    ) -> Result<Outcome> {
        self.dispatch(SessionAction::Import {
            participants,
            topic_titles,
        })
        .await
    }

    /// Discards the session and deletes the snapshot.
    pub async fn reset(&self) -> Result<Outcome> {
        let outcome = self.dispatch(SessionAction::Reset).await?;
        tracing::info!("meeting reset");
        Ok(outcome)
    }

    /// A copy of the current session.
    pub async fn snapshot(&self) -> Session {
        self.state.session.lock().await.clone()
    }

    pub async fn screen(&self) -> Screen {
        Screen::for_session(&*self.state.session.lock().await)
    }

    /// Whether the background ticker is currently running.
    pub fn is_ticking(&self) -> bool {
        self.ticker_slot()
            .as_ref()
            .is_some_and(|ticker| !ticker.is_finished())
    }

    /// Stops the ticker. The session and its snapshot are left as they are.
    pub fn shutdown(&self) {
        if let Some(ticker) = self.ticker_slot().take() {
            ticker.cancel();
        }
    }

    fn sync_ticker(&self, accruing: bool) {
        let mut slot = self.ticker_slot();
        match (accruing, slot.is_some()) {
            (true, false) => {
                *slot = Some(Ticker::spawn(
                    Arc::downgrade(&self.state),
                    self.tick_interval,
                ));
            }
            (false, true) => {
                if let Some(ticker) = slot.take() {
                    ticker.cancel();
                }
            }
            _ => {}
        }
    }

    fn ticker_slot(&self) -> std::sync::MutexGuard<'_, Option<Ticker>> {
        self.ticker.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for MeetingController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
