use crate::domain::{format_time, millis_between, Task};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::time::Duration;

/// How often the event loop wakes up, in milliseconds
pub const POLL_INTERVAL_MS: u64 = 250;

/// How often a running task's timer text is refreshed
pub const TICK_INTERVAL_MS: i64 = 1_000;

/// Get event loop poll duration
pub fn poll_interval() -> Duration {
    Duration::from_millis(POLL_INTERVAL_MS)
}

/// Display-only refresher for one running task
#[derive(Debug, Clone)]
struct Ticker {
    elapsed_base: u64,
    started_at: DateTime<Utc>,
    next_refresh: DateTime<Utc>,
    text: String,
}

impl Ticker {
    fn refresh(&mut self, now: DateTime<Utc>) {
        self.text = format_time(
            self.elapsed_base
                .saturating_add(millis_between(self.started_at, now)),
        );
        self.next_refresh = now + chrono::Duration::milliseconds(TICK_INTERVAL_MS);
    }
}

/// Live timers keyed by task id, at most one per task
///
/// Tickers only hold a copy of what they need for display; they never
/// write back to the task list.
#[derive(Debug, Default)]
pub struct TickerSet {
    tickers: HashMap<u64, Ticker>,
}

impl TickerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start ticking for a running task, replacing any existing ticker for it
    ///
    /// Stopped tasks are ignored.
    pub fn start(&mut self, task: &Task, now: DateTime<Utc>) {
        self.stop(task.id);

        let Some(started_at) = task.start_date.filter(|_| task.is_running()) else {
            return;
        };

        let mut ticker = Ticker {
            elapsed_base: task.elapsed_time,
            started_at,
            next_refresh: now,
            text: String::new(),
        };
        ticker.refresh(now);
        self.tickers.insert(task.id, ticker);
    }

    /// Remove a task's ticker. Returns whether one existed.
    pub fn stop(&mut self, id: u64) -> bool {
        self.tickers.remove(&id).is_some()
    }

    /// Drop every ticker
    pub fn cancel_all(&mut self) {
        self.tickers.clear();
    }

    /// Replace all tickers with one per running task
    pub fn restart_running<'a, I>(&mut self, tasks: I, now: DateTime<Utc>)
    where
        I: IntoIterator<Item = &'a Task>,
    {
        self.cancel_all();
        for task in tasks {
            self.start(task, now);
        }
    }

    /// Refresh every ticker that is due. Returns how many refreshed.
    pub fn poll(&mut self, now: DateTime<Utc>) -> usize {
        let mut refreshed = 0;
        for ticker in self.tickers.values_mut() {
            if now >= ticker.next_refresh {
                ticker.refresh(now);
                refreshed += 1;
            }
        }
        refreshed
    }

    /// Current timer text for a task, if it is ticking
    pub fn display(&self, id: u64) -> Option<&str> {
        self.tickers.get(&id).map(|ticker| ticker.text.as_str())
    }

    pub fn is_active(&self, id: u64) -> bool {
        self.tickers.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }
}
