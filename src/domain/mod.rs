pub mod diagnostics;
pub mod models;
mod roster;

pub use diagnostics::{Diagnostics, Outcome, Warning};
pub use models::*;
pub use roster::{Roster, RosterEntry};
