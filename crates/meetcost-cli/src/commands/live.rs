//! Live meter: prints the running cost every tick and takes commands on stdin.

use std::fmt::Write as _;

use anyhow::Result;
use meetcost_application::MeetingController;
use meetcost_core::MeetcostError;
use meetcost_core::session::Session;
use meetcost_core::summary::{DashboardStatus, MeetingSummary};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{resolve_topic, topic_title};

const HELP: &str = "commands: start <n>, pause [n], stop [n], add <title>, end, status, help, quit";
const NO_ACTIVE_TOPIC: &str = "No active topic.\n";

/// One line typed at the live prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LiveCommand {
    Start(String),
    /// Defaults to the active topic
    Pause(Option<String>),
    Stop(Option<String>),
    Add(String),
    End,
    Status,
    Help,
    Quit,
}

impl LiveCommand {
    fn parse(line: &str) -> std::result::Result<Self, String> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };
        let arg = (!rest.is_empty()).then(|| rest.to_string());

        match (verb.to_ascii_lowercase().as_str(), arg) {
            ("start" | "s", Some(topic)) => Ok(Self::Start(topic)),
            ("start" | "s", None) => Err("start needs a topic number".to_string()),
            ("pause" | "p", topic) => Ok(Self::Pause(topic)),
            ("stop" | "done", topic) => Ok(Self::Stop(topic)),
            ("add", Some(title)) => Ok(Self::Add(title)),
            ("add", None) => Err("add needs a title".to_string()),
            ("end", None) => Ok(Self::End),
            ("status" | "", None) => Ok(Self::Status),
            ("help" | "?", None) => Ok(Self::Help),
            ("quit" | "q" | "exit", None) => Ok(Self::Quit),
            _ => Err(format!("unknown command '{line}'")),
        }
    }
}

/// Picks the explicit selector, or the active topic when there is none.
fn target(session: &Session, selector: Option<&str>) -> Option<String> {
    match selector {
        Some(selector) => Some(resolve_topic(session, selector)),
        None => session.active_topic_id.clone(),
    }
}

pub async fn run(controller: &MeetingController, currency: &str) -> Result<()> {
    let session = controller.snapshot().await;
    if !session.has_participants() {
        println!("No participants yet. Start with `meetcost setup --participants <file>`.");
        return Ok(());
    }
    print!("{}", DashboardStatus::from_session(&session).render(currency));
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut display = tokio::time::interval(std::time::Duration::from_secs(1));

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = display.tick() => {
                if controller.is_ticking() {
                    let session = controller.snapshot().await;
                    println!("{}", DashboardStatus::from_session(&session).headline(currency));
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match LiveCommand::parse(&line) {
                    Ok(LiveCommand::Quit) => break,
                    Ok(command) => {
                        match execute(controller, command, currency).await {
                            Ok(output) => print!("{output}"),
                            Err(e) => println!("! {e}"),
                        }
                    }
                    Err(message) => println!("! {message}. {HELP}"),
                }
            }
        }
    }

    // Charge the time since the last tick before leaving.
    let _ = controller.tick().await?;
    controller.shutdown();
    Ok(())
}

/// Runs one command and returns what it has to say.
async fn execute(
    controller: &MeetingController,
    command: LiveCommand,
    currency: &str,
) -> std::result::Result<String, MeetcostError> {
    let session = controller.snapshot().await;
    let mut out = String::new();
    match command {
        LiveCommand::Start(selector) => {
            let topic_id = resolve_topic(&session, &selector);
            if controller.start_topic(&topic_id).await?.is_applied() {
                let _ = writeln!(out, "> {}", topic_title(&session, &topic_id));
            }
        }
        LiveCommand::Pause(selector) => match target(&session, selector.as_deref()) {
            Some(topic_id) => {
                // Charge up to now before the meter stops.
                let _ = controller.tick().await?;
                if controller.pause_topic(&topic_id).await?.is_applied() {
                    let _ = writeln!(out, "|| {}", topic_title(&session, &topic_id));
                }
            }
            None => out.push_str(NO_ACTIVE_TOPIC),
        },
        LiveCommand::Stop(selector) => match target(&session, selector.as_deref()) {
            Some(topic_id) => {
                let _ = controller.tick().await?;
                if controller.stop_topic(&topic_id).await?.is_applied() {
                    let _ = writeln!(out, "done: {}", topic_title(&session, &topic_id));
                }
            }
            None => out.push_str(NO_ACTIVE_TOPIC),
        },
        LiveCommand::Add(title) => {
            let _ = controller.add_topic(title).await?;
        }
        LiveCommand::End => {
            let _ = controller.tick().await?;
            let _ = controller.end_meeting().await?;
            let session = controller.snapshot().await;
            out.push_str(&MeetingSummary::from_session(&session).render(currency));
        }
        LiveCommand::Status => {
            out.push_str(&DashboardStatus::from_session(&session).render(currency));
        }
        LiveCommand::Help => {
            let _ = writeln!(out, "{HELP}");
        }
        LiveCommand::Quit => {}
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use meetcost_core::clock::ManualClock;
    use meetcost_core::topic::Topic;
    use meetcost_infrastructure::InMemorySnapshotRepository;

    fn controller() -> MeetingController {
        MeetingController::new(
            Session::new(),
            Arc::new(InMemorySnapshotRepository::new()),
            Arc::new(ManualClock::default()),
            Duration::from_secs(1),
        )
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(LiveCommand::parse("start 2"), Ok(LiveCommand::Start("2".to_string())));
        assert_eq!(LiveCommand::parse("  PAUSE "), Ok(LiveCommand::Pause(None)));
        assert_eq!(
            LiveCommand::parse("add Budget review"),
            Ok(LiveCommand::Add("Budget review".to_string()))
        );
        assert_eq!(LiveCommand::parse("done 1"), Ok(LiveCommand::Stop(Some("1".to_string()))));
        assert_eq!(LiveCommand::parse(""), Ok(LiveCommand::Status));
        assert_eq!(LiveCommand::parse("q"), Ok(LiveCommand::Quit));
    }

    #[test]
    fn test_parse_rejects_incomplete_commands() {
        assert!(LiveCommand::parse("start").is_err());
        assert!(LiveCommand::parse("add").is_err());
        assert!(LiveCommand::parse("end now").is_err());
        assert!(LiveCommand::parse("dance").is_err());
    }

    #[test]
    fn test_target_defaults_to_active_topic() {
        let mut session = Session {
            topics: vec![Topic::new("Intro"), Topic::new("Budget")],
            ..Session::default()
        };
        assert_eq!(target(&session, None), None);

        session.active_topic_id = Some(session.topics[1].id.clone());
        assert_eq!(target(&session, None), session.active_topic_id);
        assert_eq!(target(&session, Some("1")), Some(session.topics[0].id.clone()));
    }

    #[tokio::test]
    async fn test_pause_and_stop_without_active_topic_say_so() {
        let controller = controller();
        let _ = controller.add_topic("Intro").await.unwrap();

        for command in [LiveCommand::Pause(None), LiveCommand::Stop(None)] {
            let output = execute(&controller, command, "$").await.unwrap();
            assert_eq!(output, "No active topic.\n");
        }
        assert!(!controller.is_ticking());
    }

    #[tokio::test]
    async fn test_pause_defaults_to_active_topic() {
        let controller = controller();
        let _ = controller.add_topic("Intro").await.unwrap();

        let output = execute(&controller, LiveCommand::Start("1".to_string()), "$")
            .await
            .unwrap();
        assert_eq!(output, "> Intro\n");
        assert!(controller.is_ticking());

        let output = execute(&controller, LiveCommand::Pause(None), "$").await.unwrap();
        assert_eq!(output, "|| Intro\n");
        assert!(!controller.is_ticking());
    }
}
