use anyhow::Result;
use meetcost_application::MeetingController;
use meetcost_core::session::Outcome;
use meetcost_core::summary::format_currency;

use super::{resolve_topic, topic_title};

fn report(outcome: Outcome, done: String) {
    match outcome {
        Outcome::Applied => println!("{done}"),
        Outcome::Ignored => println!("Nothing to do."),
    }
}

pub async fn add(controller: &MeetingController, title: &str) -> Result<()> {
    let outcome = controller.add_topic(title).await?;
    let count = controller.snapshot().await.topics.len();
    report(outcome, format!("Added topic {count}: {}", title.trim()));
    Ok(())
}

pub async fn start(controller: &MeetingController, selector: &str) -> Result<()> {
    let session = controller.snapshot().await;
    let topic_id = resolve_topic(&session, selector);
    let outcome = controller.start_topic(&topic_id).await?;
    report(outcome, format!("Started '{}'", topic_title(&session, &topic_id)));
    Ok(())
}

pub async fn pause(controller: &MeetingController, selector: &str) -> Result<()> {
    let session = controller.snapshot().await;
    let topic_id = resolve_topic(&session, selector);
    let outcome = controller.pause_topic(&topic_id).await?;
    report(outcome, format!("Paused '{}'", topic_title(&session, &topic_id)));
    Ok(())
}

pub async fn stop(controller: &MeetingController, selector: &str) -> Result<()> {
    let session = controller.snapshot().await;
    let topic_id = resolve_topic(&session, selector);
    let outcome = controller.stop_topic(&topic_id).await?;
    report(outcome, format!("Completed '{}'", topic_title(&session, &topic_id)));
    Ok(())
}

pub async fn end(controller: &MeetingController, currency: &str) -> Result<()> {
    let outcome = controller.end_meeting().await?;
    let total = controller.snapshot().await.total_meeting_cost;
    report(
        outcome,
        format!("Meeting ended. Total: {}", format_currency(total, currency)),
    );
    Ok(())
}
