//! Participant domain module.
//!
//! - `model`: the `Participant` entity
//! - `parser`: pasted spreadsheet text and agenda text parsing

mod model;
mod parser;

pub use model::Participant;
pub use parser::{normalize_salary, parse_agenda, parse_participants};
