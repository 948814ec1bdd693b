use anyhow::{Result, bail};
use meetcost_application::MeetingController;

pub async fn run(controller: &MeetingController, confirmed: bool) -> Result<()> {
    if !confirmed {
        bail!("reset discards the whole meeting; pass --yes to confirm");
    }
    let _ = controller.reset().await?;
    println!("Meeting discarded.");
    Ok(())
}
