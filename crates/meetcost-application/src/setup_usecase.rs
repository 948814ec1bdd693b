//! Setup use case: pasted participant rows and agenda into a ready meeting.

use std::sync::Arc;

use meetcost_core::error::{MeetcostError, Result};
use meetcost_core::participant::{parse_agenda, parse_participants};

use crate::meeting::MeetingController;

/// What an import brought in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub participants: usize,
    pub topics: usize,
}

/// Validates pasted setup text and hands it to the controller.
pub struct SetupUseCase {
    controller: Arc<MeetingController>,
}

impl SetupUseCase {
    pub fn new(controller: Arc<MeetingController>) -> Self {
        Self { controller }
    }

    /// Parses both texts and imports them.
    ///
    /// Unreadable participant rows are skipped; only an import with no valid
    /// participant at all is refused. Participants replace the current ones,
    /// agenda titles are appended.
    pub async fn import(&self, participants_text: &str, agenda_text: &str) -> Result<ImportSummary> {
        if participants_text.trim().is_empty() {
            return Err(MeetcostError::validation("please paste participant data"));
        }

        let participants = parse_participants(participants_text);
        if participants.is_empty() {
            return Err(MeetcostError::validation(
                "no valid participants found, check the format (Name, Title, Salary)",
            ));
        }

        let topic_titles = parse_agenda(agenda_text);
        let summary = ImportSummary {
            participants: participants.len(),
            topics: topic_titles.len(),
        };

        let _ = self.controller.import(participants, topic_titles).await?;
        tracing::info!(
            participants = summary.participants,
            topics = summary.topics,
            "imported meeting setup"
        );
        Ok(summary)
    }
}
