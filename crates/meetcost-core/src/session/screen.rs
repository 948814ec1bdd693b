//! Which view a front end should show for a session.

use serde::{Deserialize, Serialize};

use super::model::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    /// Nobody imported yet: ask for participants and agenda.
    Setup,
    /// Meeting running or about to run.
    Dashboard,
    /// Meeting ended: show the receipt.
    Summary,
}

impl Screen {
    /// A restored session with participants skips the setup view.
    pub fn for_session(session: &Session) -> Self {
        if !session.has_participants() {
            Screen::Setup
        } else if session.is_meeting_ended {
            Screen::Summary
        } else {
            Screen::Dashboard
        }
    }
}
