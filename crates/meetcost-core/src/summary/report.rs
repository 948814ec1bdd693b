//! Read-only views of a session: the live dashboard and the final receipt.

use std::fmt::Write as _;

use chrono::{DateTime, Local};

use super::format::{cost_remark, format_currency, format_duration};
use crate::session::Session;
use crate::topic::{Topic, TopicStatus};

const TITLE_WIDTH: usize = 28;
const RULE_WIDTH: usize = 54;
const STAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// One topic row, as displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicLine {
    pub id: String,
    pub title: String,
    pub status: TopicStatus,
    pub duration_seconds: f64,
    pub cost: f64,
}

impl From<&Topic> for TopicLine {
    fn from(topic: &Topic) -> Self {
        Self {
            id: topic.id.clone(),
            title: topic.title.clone(),
            status: topic.status,
            duration_seconds: topic.duration_seconds,
            cost: topic.accumulated_cost,
        }
    }
}

/// The itemized bill shown once the meeting has ended.
///
/// Only topics that actually ran are itemized, whatever their status: a topic
/// frozen by the end of the meeting is billed like a completed one.
#[derive(Debug, Clone, PartialEq)]
pub struct MeetingSummary {
    pub participant_names: Vec<String>,
    pub lines: Vec<TopicLine>,
    pub total_cost: f64,
    /// Sum of all topic durations
    pub total_duration_seconds: f64,
    pub completed_topics: usize,
    pub total_topics: usize,
}

impl MeetingSummary {
    pub fn from_session(session: &Session) -> Self {
        Self {
            participant_names: session.participants.iter().map(|p| p.name.clone()).collect(),
            lines: session
                .topics
                .iter()
                .filter(|t| t.has_run())
                .map(TopicLine::from)
                .collect(),
            total_cost: session.total_meeting_cost,
            total_duration_seconds: session.total_duration_seconds(),
            completed_topics: session.completed_topic_count(),
            total_topics: session.topics.len(),
        }
    }

    /// Nothing was ever timed.
    pub fn is_ghost_meeting(&self) -> bool {
        self.lines.is_empty()
    }

    /// Renders a printable receipt stamped with the current local time.
    pub fn render(&self, currency_symbol: &str) -> String {
        self.render_at(currency_symbol, Local::now())
    }

    pub fn render_at(&self, currency_symbol: &str, printed_at: DateTime<Local>) -> String {
        let mut out = String::new();
        let rule = "-".repeat(RULE_WIDTH);
        let stamp = printed_at.format(STAMP_FORMAT).to_string();

        let _ = writeln!(
            out,
            "{:<width$}{stamp}",
            "MEETING RECEIPT",
            width = RULE_WIDTH.saturating_sub(stamp.len())
        );
        let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
        let _ = writeln!(out, "Participants: {}", self.participant_names.join(", "));
        let _ = writeln!(out);
        let _ = writeln!(out, "{:<TITLE_WIDTH$} {:>10} {:>14}", "Topic", "Duration", "Cost");
        let _ = writeln!(out, "{rule}");

        if self.is_ghost_meeting() {
            let _ = writeln!(out, "Ghost meeting (nothing was recorded)");
        }
        for line in &self.lines {
            let _ = writeln!(
                out,
                "{:<TITLE_WIDTH$} {:>10} {:>14}",
                truncate(&line.title, TITLE_WIDTH),
                format_duration(line.duration_seconds),
                format_currency(line.cost, currency_symbol)
            );
        }

        let _ = writeln!(out, "{rule}");
        let _ = writeln!(
            out,
            "{:<TITLE_WIDTH$} {:>10} {:>14}",
            "TOTAL",
            format_duration(self.total_duration_seconds),
            format_currency(self.total_cost, currency_symbol)
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "Time is money, and here it is mostly yours.");
        out
    }
}

/// What the live view shows while the meeting runs.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStatus {
    pub active_topic: Option<TopicLine>,
    pub topics: Vec<TopicLine>,
    pub total_cost: f64,
    pub burn_rate_per_minute: f64,
    pub participant_count: usize,
    pub completed_topics: usize,
    /// Only while something is being timed
    pub remark: Option<&'static str>,
}

impl DashboardStatus {
    pub fn from_session(session: &Session) -> Self {
        let active_topic = session.active_topic().map(TopicLine::from);
        let remark = active_topic
            .as_ref()
            .map(|_| cost_remark(session.total_meeting_cost));
        Self {
            active_topic,
            topics: session.topics.iter().map(TopicLine::from).collect(),
            total_cost: session.total_meeting_cost,
            burn_rate_per_minute: session.burn_rate_per_minute(),
            participant_count: session.participants.len(),
            completed_topics: session.completed_topic_count(),
            remark,
        }
    }

    /// One line for the live ticker.
    pub fn headline(&self, currency_symbol: &str) -> String {
        let total = format_currency(self.total_cost, currency_symbol);
        match &self.active_topic {
            Some(topic) => format!(
                "[{}] {} | topic {} | total {} | {}",
                format_duration(topic.duration_seconds),
                topic.title,
                format_currency(topic.cost, currency_symbol),
                total,
                self.remark.unwrap_or("...")
            ),
            None => format!("(no active topic) | total {total} | ..."),
        }
    }

    /// The full dashboard: burn rate, agenda with per-topic figures, total.
    pub fn render(&self, currency_symbol: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Burn rate: {} / min ({} participants)",
            format_currency(self.burn_rate_per_minute, currency_symbol),
            self.participant_count
        );
        let _ = writeln!(
            out,
            "Agenda: {} / {} done",
            self.completed_topics,
            self.topics.len()
        );
        for (i, topic) in self.topics.iter().enumerate() {
            let _ = writeln!(
                out,
                "{:>3}. {:<TITLE_WIDTH$} {:<9} {:>10} {:>14}",
                i + 1,
                truncate(&topic.title, TITLE_WIDTH),
                topic.status.as_str(),
                format_duration(topic.duration_seconds),
                format_currency(topic.cost, currency_symbol)
            );
        }
        let _ = writeln!(out, "{}", self.headline(currency_symbol));
        out
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
