use crate::clipboard::Clipboard;
use crate::clock::Clock;
use crate::domain::{format_time, TimerStatus, UiMode};
use crate::persistence::KeyValueStorage;
use crate::store::TaskStore;
use crate::ticker::TickerSet;
use anyhow::Result;

/// Store type used by the application
pub type AppStore = TaskStore<Box<dyn KeyValueStorage>, Box<dyn Clock>>;

/// Transient message shown in the status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// One rendered row of the task list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: u64,
    pub status: TimerStatus,
    pub title: String,
    pub timer_text: String,
}

/// Main application state
pub struct AppState {
    pub store: AppStore,
    pub tickers: TickerSet,
    pub clipboard: Box<dyn Clipboard>,
    pub input: String,
    pub selected_index: usize,
    pub ui_mode: UiMode,
    pub status: Option<StatusMessage>,
    /// False while the terminal has lost focus and tickers are suspended
    pub active: bool,
}

impl AppState {
    pub fn new(store: AppStore, clipboard: Box<dyn Clipboard>) -> Self {
        let mut app = Self {
            store,
            tickers: TickerSet::new(),
            clipboard,
            input: String::new(),
            selected_index: 0,
            ui_mode: UiMode::Normal,
            status: None,
            active: true,
        };
        app.restart_tickers();
        app
    }

    fn restart_tickers(&mut self) {
        let now = self.store.clock().now();
        self.tickers.restart_running(self.store.running_tasks(), now);
    }

    /// Rows to display, in list order
    pub fn task_rows(&self) -> Vec<TaskRow> {
        let now = self.store.clock().now();
        self.store
            .tasks()
            .iter()
            .map(|task| {
                let timer_text = match self.tickers.display(task.id) {
                    Some(text) => text.to_string(),
                    None => format_time(task.live_elapsed(now)),
                };
                TaskRow {
                    id: task.id,
                    status: task.status(),
                    title: task.title.clone(),
                    timer_text,
                }
            })
            .collect()
    }

    /// Aggregate elapsed time across all tasks, formatted
    pub fn total_text(&self) -> String {
        format_time(self.store.total_elapsed())
    }

    pub fn selected_task_id(&self) -> Option<u64> {
        self.store.tasks().get(self.selected_index).map(|task| task.id)
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.store.tasks().len() {
            self.selected_index += 1;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.store.tasks().len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }

    /// Open the title input for a new task
    pub fn start_add_task(&mut self) {
        self.store.cancel_edit();
        self.input.clear();
        self.ui_mode = UiMode::AddingTask;
    }

    /// Put a task's title in the input and make it the pending edit target
    pub fn edit_task(&mut self, id: u64) {
        if let Some(title) = self.store.begin_edit(id) {
            self.input = title.to_string();
            self.ui_mode = UiMode::EditingTask;
        }
    }

    pub fn edit_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.edit_task(id);
        }
    }

    pub fn input_add_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn input_backspace(&mut self) {
        self.input.pop();
    }

    /// Add or rename from the input. Blank input keeps the form open.
    pub fn submit_input(&mut self) -> Result<()> {
        if self.input.trim().is_empty() {
            return Ok(());
        }

        let was_adding = self.store.editing_task_id().is_none();
        if let Some(id) = self.store.add_or_update_task(&self.input)? {
            if was_adding {
                if let Some(index) = self.store.tasks().iter().position(|t| t.id == id) {
                    self.selected_index = index;
                }
            }
        }

        self.input.clear();
        self.ui_mode = UiMode::Normal;
        Ok(())
    }

    pub fn cancel_input(&mut self) {
        self.store.cancel_edit();
        self.input.clear();
        self.ui_mode = UiMode::Normal;
    }

    /// Start or stop a task's timer and its ticker
    pub fn toggle_task(&mut self, id: u64) -> Result<()> {
        match self.store.toggle_timer(id)? {
            Some(TimerStatus::Running) => {
                if self.active {
                    let now = self.store.clock().now();
                    if let Some(task) = self.store.get(id) {
                        self.tickers.start(task, now);
                    }
                }
            }
            Some(TimerStatus::Stopped) => {
                self.tickers.stop(id);
            }
            None => {}
        }
        Ok(())
    }

    pub fn toggle_selected(&mut self) -> Result<()> {
        match self.selected_task_id() {
            Some(id) => self.toggle_task(id),
            None => Ok(()),
        }
    }

    /// Delete a task, stopping its ticker
    pub fn delete_task(&mut self, id: u64) -> Result<()> {
        self.tickers.stop(id);
        self.store.delete_task(id)?;
        self.clamp_selection();
        Ok(())
    }

    pub fn delete_selected(&mut self) -> Result<()> {
        match self.selected_task_id() {
            Some(id) => self.delete_task(id),
            None => Ok(()),
        }
    }

    /// Put the activity report on the clipboard and report the outcome
    pub fn copy_activities(&mut self) {
        let report = self.store.activity_report();
        self.status = Some(match self.clipboard.set_text(&report) {
            Ok(()) => StatusMessage {
                text: "Activities copied to clipboard!".to_string(),
                is_error: false,
            },
            Err(e) => {
                log::error!("Failed to copy activities: {}", e);
                StatusMessage {
                    text: format!("Could not copy activities: {}", e),
                    is_error: true,
                }
            }
        });
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Going inactive: drop all tickers, stored state untouched
    pub fn suspend(&mut self) {
        self.tickers.cancel_all();
        self.active = false;
    }

    /// Becoming active again: reload storage and restart tickers for running tasks
    pub fn resume(&mut self) -> Result<()> {
        self.store.reload()?;
        // The rename target may have been deleted by another instance
        if self.ui_mode == UiMode::EditingTask && self.store.editing_task_id().is_none() {
            self.cancel_input();
        }
        self.clamp_selection();
        self.active = true;
        self.restart_tickers();
        Ok(())
    }

    /// Refresh due tickers
    pub fn tick(&mut self) -> usize {
        let now = self.store.clock().now();
        self.tickers.poll(now)
    }
}
