//! Read-side views: formatting helpers, the live dashboard and the receipt.

mod format;
mod report;

pub use format::{cost_remark, format_currency, format_duration};
pub use report::{DashboardStatus, MeetingSummary, TopicLine};
