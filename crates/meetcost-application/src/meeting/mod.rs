//! The live meeting: controller and its periodic ticker.

mod controller;
mod ticker;

pub use controller::MeetingController;
