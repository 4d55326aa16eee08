use crate::domain::Task;
use std::collections::HashSet;

/// Storage key holding the task list
pub const TASKS_KEY: &str = "tasks";

/// Storage key holding the next id to hand out
pub const NEXT_ID_KEY: &str = "nextTaskId";

/// Decode the stored task list
///
/// Absent, malformed, or non-array content decodes to an empty list.
pub fn decode_tasks(raw: Option<&str>) -> Vec<Task> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    match serde_json::from_str::<Vec<Task>>(raw) {
        Ok(tasks) => tasks,
        Err(e) => {
            log::warn!("Stored task list is not well-formed, starting empty: {}", e);
            Vec::new()
        }
    }
}

/// Encode the task list as a JSON array
pub fn encode_tasks(tasks: &[Task]) -> Result<String, serde_json::Error> {
    serde_json::to_string(tasks)
}

/// Highest id in the list, 0 when empty
pub fn max_id(tasks: &[Task]) -> u64 {
    tasks.iter().map(|task| task.id).max().unwrap_or(0)
}

/// Decode the id counter, never handing back an id already in use
pub fn decode_next_id(raw: Option<&str>, tasks: &[Task]) -> u64 {
    let floor = max_id(tasks) + 1;
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .map_or(floor, |stored| stored.max(floor))
}

/// Give fresh ids to tasks whose id repeats an earlier one (or is zero)
///
/// Lists written with count-based ids can hold duplicates after a delete
/// followed by an add. Returns the number of tasks renumbered.
pub fn repair_duplicate_ids(tasks: &mut [Task]) -> usize {
    let mut next = max_id(tasks) + 1;
    let mut seen = HashSet::new();
    let mut repaired = 0;

    for task in tasks.iter_mut() {
        if task.id == 0 || !seen.insert(task.id) {
            task.id = next;
            seen.insert(next);
            next += 1;
            repaired += 1;
        }
    }

    repaired
}
