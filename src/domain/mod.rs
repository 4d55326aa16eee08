pub mod enums;
pub mod task;
pub mod views;

pub use enums::{TimerStatus, UiMode};
pub use task::{millis_between, Task};
pub use views::{activity_report, format_time, total_elapsed};
