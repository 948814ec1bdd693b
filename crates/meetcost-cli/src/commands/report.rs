use meetcost_application::MeetingController;
use meetcost_core::session::Screen;
use meetcost_core::summary::{DashboardStatus, MeetingSummary};

pub async fn status(controller: &MeetingController, currency: &str) {
    let session = controller.snapshot().await;
    if Screen::for_session(&session) == Screen::Setup {
        println!("No participants yet. Start with `meetcost setup --participants <file>`.");
        return;
    }
    print!("{}", DashboardStatus::from_session(&session).render(currency));
}

pub async fn summary(controller: &MeetingController, currency: &str) {
    let session = controller.snapshot().await;
    if !session.is_meeting_ended {
        println!("(meeting still open, figures so far)");
    }
    print!("{}", MeetingSummary::from_session(&session).render(currency));
}
