use crate::clock::Clock;
use crate::domain::{activity_report, total_elapsed, Task, TimerStatus};
use crate::persistence::{
    decode_next_id, decode_tasks, encode_tasks, repair_duplicate_ids, KeyValueStorage,
    StorageError, NEXT_ID_KEY, TASKS_KEY,
};

/// Authoritative task list mirrored into key-value storage
///
/// Every mutation re-reads storage, applies the change, and writes the
/// full list back before returning.
pub struct TaskStore<S: KeyValueStorage, C: Clock> {
    storage: S,
    clock: C,
    tasks: Vec<Task>,
    next_id: u64,
    editing_task_id: Option<u64>,
}

impl<S: KeyValueStorage, C: Clock> TaskStore<S, C> {
    /// Load the store from storage
    pub fn open(storage: S, clock: C) -> Result<Self, StorageError> {
        let mut store = Self {
            storage,
            clock,
            tasks: Vec::new(),
            next_id: 1,
            editing_task_id: None,
        };
        store.reload()?;
        Ok(store)
    }

    /// Re-read the list and id counter from storage
    ///
    /// A pending edit whose target no longer exists is dropped.
    pub fn reload(&mut self) -> Result<(), StorageError> {
        self.load_from_storage()?;

        if self
            .editing_task_id
            .is_some_and(|id| self.get(id).is_none())
        {
            self.editing_task_id = None;
        }
        Ok(())
    }

    /// Replace the cached list and counter with what storage holds now
    fn load_from_storage(&mut self) -> Result<(), StorageError> {
        let raw_tasks = self.storage.get(TASKS_KEY)?;
        let mut tasks = decode_tasks(raw_tasks.as_deref());
        let repaired = repair_duplicate_ids(&mut tasks);

        let raw_next_id = self.storage.get(NEXT_ID_KEY)?;
        self.next_id = decode_next_id(raw_next_id.as_deref(), &tasks);
        self.tasks = tasks;

        if repaired > 0 {
            log::warn!("Renumbered {} tasks with duplicate ids", repaired);
            self.persist()?;
        }
        Ok(())
    }

    // Counter first: a failed list write then leaves ids skipped, never reused
    fn persist(&mut self) -> Result<(), StorageError> {
        let encoded = encode_tasks(&self.tasks)?;
        self.storage.set(NEXT_ID_KEY, &self.next_id.to_string())?;
        self.storage.set(TASKS_KEY, &encoded)?;
        Ok(())
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn running_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|task| task.is_running())
    }

    #[cfg(test)]
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn editing_task_id(&self) -> Option<u64> {
        self.editing_task_id
    }

    /// Mark a task as the target of the next `add_or_update_task`
    ///
    /// Returns the current title, or `None` (and no edit) if the id is unknown.
    pub fn begin_edit(&mut self, id: u64) -> Option<&str> {
        let index = self.tasks.iter().position(|task| task.id == id)?;
        self.editing_task_id = Some(id);
        Some(self.tasks[index].title.as_str())
    }

    pub fn cancel_edit(&mut self) {
        self.editing_task_id = None;
    }

    /// Rename the task being edited, or append a new stopped task
    ///
    /// Blank titles are ignored. Returns the id of the task written.
    pub fn add_or_update_task(&mut self, title: &str) -> Result<Option<u64>, StorageError> {
        if title.trim().is_empty() {
            return Ok(None);
        }
        self.load_from_storage()?;

        let id = match self.editing_task_id.take() {
            Some(id) => {
                match self.tasks.iter_mut().find(|task| task.id == id) {
                    Some(task) => {
                        task.title = title.to_string();
                        log::debug!("Renamed task {} to {:?}", id, title);
                    }
                    // Target vanished since the edit began; nothing to rename
                    None => return Ok(None),
                }
                id
            }
            None => {
                let id = self.next_id;
                self.next_id += 1;
                self.tasks.push(Task::new(id, title.to_string()));
                log::debug!("Added task {} {:?}", id, title);
                id
            }
        };

        self.persist()?;
        Ok(Some(id))
    }

    /// Remove a task. Unknown ids are a no-op returning `false`.
    pub fn delete_task(&mut self, id: u64) -> Result<bool, StorageError> {
        self.load_from_storage()?;
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        if self.tasks.len() == before {
            return Ok(false);
        }

        if self.editing_task_id == Some(id) {
            self.editing_task_id = None;
        }

        log::debug!("Deleted task {}", id);
        self.persist()?;
        Ok(true)
    }

    /// Start or stop a task's timer. Unknown ids are a no-op returning `None`.
    pub fn toggle_timer(&mut self, id: u64) -> Result<Option<TimerStatus>, StorageError> {
        self.load_from_storage()?;
        let now = self.clock.now();
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            return Ok(None);
        };

        let status = task.toggle(now);
        log::debug!("Task {} is now {}", id, status.label());
        self.persist()?;
        Ok(Some(status))
    }

    /// Sum of all elapsed time, including running intervals
    pub fn total_elapsed(&self) -> u64 {
        total_elapsed(&self.tasks, self.clock.now())
    }

    pub fn activity_report(&self) -> String {
        activity_report(&self.tasks)
    }
}
