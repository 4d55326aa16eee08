use super::task::Task;
use chrono::{DateTime, Utc};

/// Format a duration in milliseconds as `HH:MM:SS`
///
/// Truncates to whole seconds. Hours are not wrapped at 24.
pub fn format_time(ms: u64) -> String {
    let total_seconds = ms / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Sum of every task's elapsed time, including open intervals
pub fn total_elapsed(tasks: &[Task], now: DateTime<Utc>) -> u64 {
    tasks
        .iter()
        .fold(0u64, |total, task| total.saturating_add(task.live_elapsed(now)))
}

/// Plain-text activity report: one `"<title>, <HH:MM:SS>"` line per task
///
/// Uses stored elapsed time, so a running task reports only its closed intervals.
pub fn activity_report(tasks: &[Task]) -> String {
    tasks
        .iter()
        .map(|task| format!("{}, {}", task.title, format_time(task.elapsed_time)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn task(id: u64, title: &str, elapsed: u64) -> Task {
        let mut task = Task::new(id, title.to_string());
        task.elapsed_time = elapsed;
        task
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "00:00:00");
        assert_eq!(format_time(3_661_000), "01:01:01");
        assert_eq!(format_time(90_000), "00:01:30");
    }

    #[test]
    fn test_format_time_truncates_and_does_not_wrap() {
        assert_eq!(format_time(1_999), "00:00:01");
        assert_eq!(format_time(999), "00:00:00");
        assert_eq!(format_time(360_000_000), "100:00:00");
    }

    #[test]
    fn test_total_elapsed_of_stopped_tasks_is_exact_sum() {
        let now = Utc::now();
        let tasks = vec![task(1, "A", 1_500), task(2, "B", 60_000), task(3, "C", 7)];
        assert_eq!(total_elapsed(&tasks, now), 61_507);
        assert_eq!(total_elapsed(&[], now), 0);
    }

    #[test]
    fn test_total_elapsed_includes_running_interval() {
        let start = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let mut running = task(1, "A", 1_000);
        running.start(start);
        let tasks = vec![running, task(2, "B", 2_000)];

        let now = start + chrono::Duration::seconds(4);
        assert_eq!(total_elapsed(&tasks, now), 7_000);
    }

    #[test]
    fn test_total_elapsed_saturates() {
        let tasks = vec![task(1, "A", u64::MAX - 5), task(2, "B", 10)];
        assert_eq!(total_elapsed(&tasks, Utc::now()), u64::MAX);
    }

    #[test]
    fn test_activity_report() {
        let tasks = vec![task(1, "Write report", 2_000), task(2, "Review, PR", 3_661_000)];
        assert_eq!(
            activity_report(&tasks),
            "Write report, 00:00:02\nReview, PR, 01:01:01"
        );
    }

    #[test]
    fn test_activity_report_empty() {
        assert_eq!(activity_report(&[]), "");
    }
}
