//! Topic domain module.

mod model;

pub use model::{Topic, TopicStatus};
