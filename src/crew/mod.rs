//! Sequential crew: runs each task with its agent, in list order.

pub mod crew;
pub mod output;

pub use crew::{Crew, CrewError};
pub use output::CrewOutput;
