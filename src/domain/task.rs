use super::enums::TimerStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Milliseconds between two instants, clamped at zero when the clock went backwards
pub fn millis_between(start: DateTime<Utc>, end: DateTime<Utc>) -> u64 {
    end.signed_duration_since(start).num_milliseconds().max(0) as u64
}

/// A named activity whose running time is tracked
///
/// Field names are camelCase on the wire so records written by the
/// browser popup load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub title: String,
    /// Set when the timer starts
    pub start_date: Option<DateTime<Utc>>,
    /// Set when the timer stops, cleared on the next start
    pub end_date: Option<DateTime<Utc>>,
    /// Accumulated milliseconds over closed intervals only
    pub elapsed_time: u64,
}

impl Task {
    pub fn new(id: u64, title: String) -> Self {
        Self {
            id,
            title,
            start_date: None,
            end_date: None,
            elapsed_time: 0,
        }
    }

    pub fn status(&self) -> TimerStatus {
        if self.start_date.is_some() && self.end_date.is_none() {
            TimerStatus::Running
        } else {
            TimerStatus::Stopped
        }
    }

    pub fn is_running(&self) -> bool {
        self.status() == TimerStatus::Running
    }

    /// Stopped -> Running
    pub fn start(&mut self, now: DateTime<Utc>) {
        if !self.is_running() {
            self.start_date = Some(now);
            self.end_date = None;
        }
    }

    /// Running -> Stopped, folding the open interval into `elapsed_time`
    pub fn stop(&mut self, now: DateTime<Utc>) {
        if let (Some(started), None) = (self.start_date, self.end_date) {
            self.end_date = Some(now);
            self.elapsed_time = self.elapsed_time.saturating_add(millis_between(started, now));
        }
    }

    /// Flip the timer and return the new status
    pub fn toggle(&mut self, now: DateTime<Utc>) -> TimerStatus {
        match self.status() {
            TimerStatus::Running => self.stop(now),
            TimerStatus::Stopped => self.start(now),
        }
        self.status()
    }

    /// Elapsed time including the currently open interval, if any
    pub fn live_elapsed(&self, now: DateTime<Utc>) -> u64 {
        match (self.status(), self.start_date) {
            (TimerStatus::Running, Some(started)) => {
                self.elapsed_time.saturating_add(millis_between(started, now))
            }
            _ => self.elapsed_time,
        }
    }
}
