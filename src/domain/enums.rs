/// Timer state of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStatus {
    Stopped,
    Running,
}

impl TimerStatus {
    /// Glyph for the play/pause control: pause while running, play otherwise
    pub fn control_glyph(&self) -> &'static str {
        match self {
            Self::Running => "⏸",
            Self::Stopped => "▶",
        }
    }

    /// Short label for the status column
    pub fn label(&self) -> &'static str {
        match self {
            Self::Running => "RUNNING",
            Self::Stopped => "STOPPED",
        }
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    EditingTask, // Renaming an existing task
}

impl UiMode {
    /// Whether keystrokes go to the title input
    pub fn is_input(&self) -> bool {
        matches!(self, Self::AddingTask | Self::EditingTask)
    }
}
