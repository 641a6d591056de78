pub mod task;

pub use task::{interpolate, Task, TaskInputs, TaskOutput};
