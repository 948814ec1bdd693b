use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use meetcost_application::{MeetingController, SetupUseCase};
use meetcost_core::summary::format_currency;
use tokio::io::AsyncReadExt;

async fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("Failed to read stdin")?;
        return Ok(text);
    }
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

pub async fn run(
    controller: &Arc<MeetingController>,
    participants: &Path,
    agenda: Option<&Path>,
    currency: &str,
) -> Result<()> {
    let participants_text = read_input(participants).await?;
    let agenda_text = match agenda {
        Some(path) => read_input(path).await?,
        None => String::new(),
    };

    let summary = SetupUseCase::new(Arc::clone(controller))
        .import(&participants_text, &agenda_text)
        .await?;
    let burn = controller.snapshot().await.burn_rate_per_minute();

    println!(
        "Imported {} participants and {} topics. Burn rate: {} / min",
        summary.participants,
        summary.topics,
        format_currency(burn, currency)
    );
    Ok(())
}
