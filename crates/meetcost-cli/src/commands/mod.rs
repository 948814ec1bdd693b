pub mod live;
pub mod report;
pub mod reset;
pub mod setup;
pub mod topic;

use meetcost_core::session::Session;

/// Turns a 1-based agenda number or a topic id into a topic id.
///
/// Anything else is passed through unchanged; the controller treats unknown
/// ids as a no-op.
pub fn resolve_topic(session: &Session, selector: &str) -> String {
    let selector = selector.trim();
    if let Ok(number) = selector.parse::<usize>() {
        if let Some(topic) = number.checked_sub(1).and_then(|i| session.topics.get(i)) {
            return topic.id.clone();
        }
    }
    selector.to_string()
}

/// Title of a topic for messages, falling back to the raw selector.
pub fn topic_title(session: &Session, topic_id: &str) -> String {
    session
        .topic(topic_id)
        .map(|t| t.title.clone())
        .unwrap_or_else(|| topic_id.to_string())
}
